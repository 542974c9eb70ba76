//! Decode errors for Intcode programs.

use thiserror::Error;

/// Errors that occur while parsing program text or decoding an instruction word.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// The low two digits of the word do not name a known opcode.
    #[error("unknown opcode in instruction word {0}")]
    UnknownOpcode(i64),

    /// A mode digit is not one of 0 (position), 1 (immediate) or 2 (relative).
    #[error("unknown mode digit {digit} for operand {operand} in instruction word {word}")]
    UnknownMode { word: i64, operand: usize, digit: i64 },

    /// A comma-separated token is not a signed decimal integer.
    #[error("invalid integer {token:?} at position {index}")]
    InvalidInteger { index: usize, token: String },

    /// Program text contained no values at all.
    #[error("empty program")]
    EmptyProgram,
}
