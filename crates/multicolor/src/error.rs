//! Error types for multicolor sequence parsing.

use thiserror::Error;

/// Errors that can occur when parsing a multicolor sequence.
///
/// Parsing fails fast: a malformed instruction rejects the whole
/// sequence and nothing is applied.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ParseError {
    /// The sequence contained no commands at all.
    #[error("empty multicolor sequence")]
    Empty,

    /// A command did not match the instruction grammar.
    #[error("syntax error in command {command:?}: {detail}")]
    InvalidCommand { command: String, detail: String },

    /// A command parsed but left unconsumed text behind.
    #[error("unexpected trailing input {trailing:?} in command {command:?}")]
    TrailingInput { command: String, trailing: String },

    /// More than one `$` start-command delimiter.
    #[error("more than one '$' start-command delimiter")]
    MultipleStarts,

    /// The start command used something besides plain `=` assignments.
    #[error("start command may only use '=' assignments, without repeat or reset markers")]
    InvalidStart,
}
