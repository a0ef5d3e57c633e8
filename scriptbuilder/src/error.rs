//! Errors raised while building or rendering a statement tree.

use crate::os_family::OsFamily;
use thiserror::Error;

/// Every failure is reported before any text is returned, so a caller never
/// sees a partially rendered script.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScriptError {
    /// The statement's own data cannot be rendered correctly in any dialect
    /// (a heredoc delimiter inside the payload, colliding switch labels, ...)
    #[error("malformed {kind}: {reason}")]
    Malformed { kind: &'static str, reason: String },

    /// The statement needs something the requested dialect does not have
    #[error("{kind} cannot be rendered for {family}: {feature} is not supported")]
    Unsupported {
        kind: &'static str,
        feature: String,
        family: OsFamily,
    },

    /// A constructor was given an argument outside its contract
    #[error("invalid argument to {kind}: {reason}")]
    InvalidArgument { kind: &'static str, reason: String },
}

impl ScriptError {
    pub(crate) fn malformed(kind: &'static str, reason: impl Into<String>) -> Self {
        ScriptError::Malformed {
            kind,
            reason: reason.into(),
        }
    }

    pub(crate) fn unsupported(kind: &'static str, feature: impl Into<String>, family: OsFamily) -> Self {
        ScriptError::Unsupported {
            kind,
            feature: feature.into(),
            family,
        }
    }

    pub(crate) fn invalid_argument(kind: &'static str, reason: impl Into<String>) -> Self {
        ScriptError::InvalidArgument {
            kind,
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ScriptError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_names_kind_and_family() {
        let err = ScriptError::unsupported("exec", "process replacement", OsFamily::Windows);
        assert_eq!(
            err.to_string(),
            "exec cannot be rendered for WINDOWS: process replacement is not supported"
        );
    }

    #[test]
    fn test_malformed_message() {
        let err = ScriptError::malformed("append_file", "line 2 equals the heredoc delimiter");
        assert_eq!(
            err.to_string(),
            "malformed append_file: line 2 equals the heredoc delimiter"
        );
    }
}
