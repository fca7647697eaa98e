//! Library error types.

use thiserror::Error;

/// Errors raised while constructing a player.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TermynalError {
    #[error("container not found: {selector}")]
    ContainerNotFound { selector: String },

    #[error("invalid selector {selector:?}: {reason}")]
    InvalidSelector { selector: String, reason: String },
}

impl TermynalError {
    pub(crate) fn invalid_selector(selector: &str, reason: impl Into<String>) -> Self {
        Self::InvalidSelector {
            selector: selector.to_string(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_selector() {
        let err = TermynalError::ContainerNotFound {
            selector: "#termynal".to_string(),
        };
        assert_eq!(err.to_string(), "container not found: #termynal");

        let err = TermynalError::invalid_selector("#", "empty id");
        assert_eq!(err.to_string(), "invalid selector \"#\": empty id");
    }
}
