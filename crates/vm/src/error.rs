//! Runtime errors for the Intcode VM.
//!
//! Every error that arises from executing an instruction carries the
//! address of that instruction (`at`) for debugging. All of them are fatal:
//! the machine moves to the faulted state and refuses further steps.

use thiserror::Error;

/// Errors that occur during program execution.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuntimeError {
    /// A read, write or fetch resolved to a negative address.
    #[error("negative address {address} at instruction {at}")]
    Address { at: i64, address: i64 },

    /// A positive address lies beyond the configured memory ceiling.
    #[error("address {address} exceeds memory limit of {limit} cells at instruction {at}")]
    MemoryLimitExceeded { at: i64, address: i64, limit: usize },

    /// The word at the instruction pointer does not name a known opcode.
    #[error("unknown opcode in word {word} at instruction {at}")]
    UnknownOpcode { at: i64, word: i64 },

    /// A mode digit in the instruction word is not 0, 1 or 2.
    #[error("unknown mode digit {digit} in word {word} at instruction {at}")]
    UnknownMode { at: i64, word: i64, digit: i64 },

    /// Immediate mode was used for an operand that names a write target.
    #[error("immediate mode used as write target at instruction {at}")]
    InvalidWriteMode { at: i64 },

    /// `resume`/`step` called after TERMINATE.
    #[error("machine already halted")]
    AlreadyHalted,

    /// `resume`/`step` called after an earlier fatal error.
    #[error("machine stopped after an earlier fault")]
    Faulted,

    /// An input value was supplied while the machine was not waiting for one.
    #[error("input supplied but none requested at instruction {at}")]
    UnexpectedInput { at: i64 },

    /// The driver had no input left to satisfy an INPUT instruction.
    #[error("input exhausted at instruction {at}")]
    InputExhausted { at: i64 },

    /// The machine executed more instructions than its step budget allows.
    #[error("step limit of {limit} instructions exceeded")]
    StepLimitExceeded { limit: u64 },
}
