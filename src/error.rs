use thiserror::Error;

/// Errors raised while lexing or parsing source text.
///
/// These are the only hard failures in the crate: once a source file parses,
/// decompilation always runs to completion and degrades locally instead of
/// erroring (unsupported constructs become gaps, rejected connections are
/// logged and dropped).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("unexpected character '{found}' at line {line}, column {column}")]
    UnexpectedChar {
        found: char,
        line: usize,
        column: usize,
    },

    #[error("unexpected token '{found}' at line {line}, column {column}, expected {expected}")]
    UnexpectedToken {
        found: String,
        expected: String,
        line: usize,
        column: usize,
    },

    #[error("unterminated string literal starting at line {line}, column {column}")]
    UnterminatedString { line: usize, column: usize },

    #[error("unterminated block comment starting at line {line}, column {column}")]
    UnterminatedComment { line: usize, column: usize },
}

/// Errors that can escape a [`decompile`](crate::decompile) call.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecompileError {
    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// Errors returned by workspace connection attempts.
///
/// The decompiler never propagates these: the offending child block is
/// disposed, a warning is logged, and the target slot stays empty.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConnectionError {
    #[error("cannot connect '{child_type}' to input '{input}' on block '{block_type}': {reason}")]
    Rejected {
        block_type: String,
        input: String,
        child_type: String,
        reason: String,
    },

    #[error("no '{input}' input on block '{block_type}'")]
    MissingInput { block_type: String, input: String },

    #[error("cannot chain '{first}' and '{second}': {reason}")]
    ChainRejected {
        first: String,
        second: String,
        reason: String,
    },
}
