//! Copy orchestrator for clipboard operations.

use tracing::debug;

use super::error::ClipboardError;
use super::result::CopyResult;
use super::tool::{CopyTool, CopyToolError};
use super::tools::platform_tools;

/// Orchestrates clipboard copy operations using available tools.
///
/// Tools are tried in priority order; the first one that accepts the text
/// wins. The last tool failure is reported when none succeeds.
pub struct Copy {
    tools: Vec<Box<dyn CopyTool>>,
}

impl Copy {
    /// Create with platform-appropriate tools.
    pub fn new() -> Self {
        Self {
            tools: platform_tools(),
        }
    }

    /// Create with specific tools (for testing).
    pub fn with_tools(tools: Vec<Box<dyn CopyTool>>) -> Self {
        Self { tools }
    }

    /// Copy text to the clipboard.
    pub fn text(&self, text: &str) -> Result<CopyResult, ClipboardError> {
        if self.tools.is_empty() {
            return Err(ClipboardError::UnsupportedPlatform);
        }

        let mut last_failure = None;
        for tool in self.tools.iter().filter(|t| t.is_available()) {
            match tool.try_copy_text(text) {
                Ok(()) => return Ok(CopyResult::new(tool.method(), text.len())),
                Err(CopyToolError::NotFound) => continue,
                Err(CopyToolError::Failed(message)) => {
                    debug!(tool = tool.name(), %message, "clipboard tool failed, trying next");
                    last_failure = Some(ClipboardError::ToolFailed {
                        tool: tool.name(),
                        message,
                    });
                }
            }
        }

        Err(last_failure.unwrap_or(ClipboardError::NoToolAvailable))
    }
}

impl Default for Copy {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clipboard::result::CopyMethod;
    use std::cell::RefCell;

    struct FakeTool {
        method: CopyMethod,
        available: bool,
        outcome: Result<(), CopyToolError>,
        copied: RefCell<Vec<String>>,
    }

    impl FakeTool {
        fn boxed(method: CopyMethod, available: bool, outcome: Result<(), CopyToolError>) -> Box<Self> {
            Box::new(Self {
                method,
                available,
                outcome,
                copied: RefCell::new(Vec::new()),
            })
        }
    }

    impl CopyTool for FakeTool {
        fn method(&self) -> CopyMethod {
            self.method
        }

        fn is_available(&self) -> bool {
            self.available
        }

        fn try_copy_text(&self, text: &str) -> Result<(), CopyToolError> {
            self.copied.borrow_mut().push(text.to_string());
            self.outcome.clone()
        }
    }

    #[test]
    fn first_available_tool_wins() {
        let copy = Copy::with_tools(vec![
            FakeTool::boxed(CopyMethod::Xclip, false, Ok(())),
            FakeTool::boxed(CopyMethod::Xsel, true, Ok(())),
            FakeTool::boxed(CopyMethod::WlCopy, true, Ok(())),
        ]);
        let result = copy.text("echo woo").unwrap();
        assert_eq!(result, CopyResult::new(CopyMethod::Xsel, 8));
    }

    #[test]
    fn falls_through_failed_tools() {
        let copy = Copy::with_tools(vec![
            FakeTool::boxed(CopyMethod::Xclip, true, Err(CopyToolError::Failed("no display".into()))),
            FakeTool::boxed(CopyMethod::WlCopy, true, Ok(())),
        ]);
        assert_eq!(copy.text("ls").unwrap().tool, CopyMethod::WlCopy);
    }

    #[test]
    fn reports_last_failure() {
        let copy = Copy::with_tools(vec![FakeTool::boxed(
            CopyMethod::Xclip,
            true,
            Err(CopyToolError::Failed("no display".into())),
        )]);
        let err = copy.text("ls").unwrap_err();
        assert!(matches!(err, ClipboardError::ToolFailed { tool: "xclip", .. }));
        assert!(err.to_string().contains("no display"));
    }

    #[test]
    fn no_available_tool() {
        let copy = Copy::with_tools(vec![FakeTool::boxed(CopyMethod::Xsel, false, Ok(()))]);
        assert!(matches!(copy.text("ls"), Err(ClipboardError::NoToolAvailable)));
    }

    #[test]
    fn no_tools_is_unsupported_platform() {
        let copy = Copy::with_tools(vec![]);
        assert!(matches!(copy.text("ls"), Err(ClipboardError::UnsupportedPlatform)));
    }
}
