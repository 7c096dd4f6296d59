//! Error types for attribute_core

use crate::operation::OperationKind;
use thiserror::Error;

/// Error from the attribute/modifier API
///
/// Only string-keyed operation lookups can fail; numeric evaluation never
/// errors (floating-point special values propagate arithmetically) and
/// removing an absent modifier is a defined no-op.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AttributeError {
    #[error(
        "unknown attribute modifier operation '{}', expected one of: {}",
        .0,
        OperationKind::names().join(", ")
    )]
    InvalidOperationName(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_operation_name_message() {
        let err = AttributeError::InvalidOperationName("AddBass".to_string());
        let message = err.to_string();
        assert!(message.contains("'AddBass'"));
        assert!(message.contains("AddBaseEarly"));
        assert!(message.contains("SetTotal"));
    }
}
