//! Error types for SGR parameter parsing.

use thiserror::Error;

/// Errors that can occur when parsing a single SGR parameter unit.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParamParseError {
    /// Empty parameter text.
    #[error("empty SGR parameter")]
    Empty,

    /// Text that does not match any parameter form.
    #[error("invalid SGR parameter: {0:?}")]
    Invalid(String),

    /// A numeric component outside its allowed range.
    #[error("SGR parameter component out of range: {0:?}")]
    OutOfRange(String),
}
