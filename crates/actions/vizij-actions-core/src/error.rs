//! Error types for action construction and loading.

/// Errors raised while building, transforming, or loading actions.
///
/// Every error is local to the construction call that produced it; nothing
/// here crosses into the host once an [`Action`](crate::Action) exists.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum ActionError {
    /// A leaf constructor or modifier received an out-of-range value.
    #[error("invalid {parameter} for {action}: {value} ({reason})")]
    InvalidParameter {
        action: &'static str,
        parameter: &'static str,
        value: f32,
        reason: &'static str,
    },

    /// The requested transformation has no meaning for this action kind.
    #[error("{operation} is not supported by {action}")]
    UnsupportedOperation {
        action: &'static str,
        operation: &'static str,
    },

    /// Malformed JSON action graph.
    #[error("action json parse error: {0}")]
    Parse(String),

    /// JSON named a kind that can only be built in code (callbacks).
    #[error("action kind '{kind}' cannot be loaded from json")]
    UnsupportedJson { kind: String },
}

/// Result alias used throughout the crate.
pub type Result<T> = core::result::Result<T, ActionError>;

impl ActionError {
    pub(crate) fn unsupported(action: &'static str, operation: &'static str) -> Self {
        ActionError::UnsupportedOperation { action, operation }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_offending_parameter() {
        let err = ActionError::InvalidParameter {
            action: "wait",
            parameter: "duration",
            value: -1.0,
            reason: "must be >= 0",
        };
        assert_eq!(
            err.to_string(),
            "invalid duration for wait: -1 (must be >= 0)"
        );

        let err = ActionError::unsupported("remove", "reversal");
        assert_eq!(err.to_string(), "reversal is not supported by remove");
    }
}
