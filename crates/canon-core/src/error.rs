//! Error types for canonical name generation and parsing.
//!
//! Generation has a single failure mode, a malformed hierarchy: either a
//! hierarchy link points at an element the model does not contain, or the
//! deployment parent chain never terminates. Both are reported through
//! [`NamingError`] at the point of traversal; no partial name is ever
//! produced.

use thiserror::Error;

use crate::model::ElementKind;

/// Error raised when a canonical name cannot be generated because the
/// element hierarchy is malformed.
///
/// Callers are expected to hand the generator a fully linked model; these
/// errors indicate a broken model, not a transient condition, so there is
/// nothing to retry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NamingError {
    /// A parent, owner, or instance reference points at an element that is
    /// not present in the model.
    #[error("dangling {kind} reference (index {index}) in the element hierarchy")]
    DanglingReference { kind: ElementKind, index: usize },

    /// The deployment node parent chain revisited a node instead of
    /// terminating at a root.
    #[error("deployment node parent chain cycles through `{name}`")]
    HierarchyCycle { name: String },
}

impl NamingError {
    /// Create a `DanglingReference` error for the given kind and handle
    /// index.
    pub(crate) fn dangling(kind: ElementKind, index: usize) -> Self {
        Self::DanglingReference { kind, index }
    }
}

/// Error raised when a string cannot be parsed back into a
/// [`CanonicalName`](crate::CanonicalName).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("`{input}` does not start with a recognized canonical name prefix")]
pub struct ParseNameError {
    pub(crate) input: String,
}

impl ParseNameError {
    /// The string that failed to parse.
    pub fn input(&self) -> &str {
        &self.input
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_naming_error_display() {
        let err = NamingError::dangling(ElementKind::SoftwareSystem, 7);
        assert_eq!(
            err.to_string(),
            "dangling SoftwareSystem reference (index 7) in the element hierarchy"
        );

        let err = NamingError::HierarchyCycle {
            name: "Server1".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "deployment node parent chain cycles through `Server1`"
        );
    }

    #[test]
    fn test_parse_name_error_display() {
        let err = ParseNameError {
            input: "Widget://Thing".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "`Widget://Thing` does not start with a recognized canonical name prefix"
        );
        assert_eq!(err.input(), "Widget://Thing");
    }
}
