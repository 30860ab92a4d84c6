//! Tokenizer errors.

use thiserror::Error;

/// Errors that abort tokenization. Positions are 1-based.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexError {
    #[error("unexpected text \"{snippet}\" at {line}:{column}")]
    UnexpectedText {
        snippet: String,
        line: u32,
        column: u32,
    },

    #[error("inconsistent indentation at {line}: expected {expected} columns, got {actual}")]
    InconsistentIndentation {
        line: u32,
        expected: u32,
        actual: u32,
    },

    #[error("attribute block opened at {line}:{column} is never closed")]
    UnclosedAttributeBlock { line: u32, column: u32 },

    #[error("unterminated string literal starting at {line}:{column}")]
    UnterminatedString { line: u32, column: u32 },
}
