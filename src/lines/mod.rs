//! Line model and the classify → render pipeline.
//!
//! - `classify`: raw container content to an ordered `LineData` sequence
//! - `render`: one `LineData` to one attributed template element
//! - `decorate`: prompt, copy button and output-area wrappers applied to a
//!   cloned template right before it is displayed

pub mod classify;
pub mod decorate;
pub mod render;

use serde::{Deserialize, Serialize};

pub use classify::Classifier;
pub use render::LineRenderer;

/// Kind of animated line. Absent means a static output line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineType {
    /// Typed character by character after a prompt
    Input,
    /// Filled in steps like a progress bar
    Progress,
}

impl LineType {
    pub fn as_str(&self) -> &'static str {
        match self {
            LineType::Input => "input",
            LineType::Progress => "progress",
        }
    }

    /// Parse the value of the bare `data-<prefix>` attribute.
    pub fn from_attr(value: &str) -> Option<Self> {
        match value {
            "input" => Some(LineType::Input),
            "progress" => Some(LineType::Progress),
            _ => None,
        }
    }
}

impl std::fmt::Display for LineType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One parsed line of a terminal transcript.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineData {
    /// Text content, possibly markup
    #[serde(default)]
    pub value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class: Option<String>,
    /// Pause after this line, in ms
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delay: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prompt: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub line_type: Option<LineType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub carriage_return: Option<bool>,
}

impl LineData {
    /// A static output line.
    pub fn output(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            ..Self::default()
        }
    }

    /// An input line with the default prompt.
    pub fn input(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            line_type: Some(LineType::Input),
            ..Self::default()
        }
    }

    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = Some(prompt.into());
        self
    }

    pub fn is_input(&self) -> bool {
        self.line_type == Some(LineType::Input)
    }
}
