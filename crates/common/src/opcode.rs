//! Opcode table for the Intcode instruction set.
//!
//! The opcode lives in the low two decimal digits of an instruction word.
//! Each opcode has a fixed operand count; the instruction occupies
//! `operand_count() + 1` memory cells.

use crate::error::DecodeError;

/// Identifies the operation to perform.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Opcode {
    /// `c = a + b`
    Add = 1,
    /// `c = a * b`
    Multiply = 2,
    /// Suspend for one input value and store it at the target.
    Input = 3,
    /// Emit the operand as an output value.
    Output = 4,
    /// Jump to the second operand if the first is non-zero.
    JumpIfTrue = 5,
    /// Jump to the second operand if the first is zero.
    JumpIfFalse = 6,
    /// `c = (a < b) as i64`
    LessThan = 7,
    /// `c = (a == b) as i64`
    Equals = 8,
    /// Add the operand to the relative base.
    AdjustRelativeBase = 9,
    /// Stop execution.
    Halt = 99,
}

/// All valid opcodes, in numeric order. Useful for exhaustive testing.
pub const ALL_OPCODES: [Opcode; 10] = [
    Opcode::Add,
    Opcode::Multiply,
    Opcode::Input,
    Opcode::Output,
    Opcode::JumpIfTrue,
    Opcode::JumpIfFalse,
    Opcode::LessThan,
    Opcode::Equals,
    Opcode::AdjustRelativeBase,
    Opcode::Halt,
];

impl Opcode {
    /// Number of operands that follow the instruction word.
    pub fn operand_count(self) -> usize {
        match self {
            Opcode::Add | Opcode::Multiply | Opcode::LessThan | Opcode::Equals => 3,
            Opcode::JumpIfTrue | Opcode::JumpIfFalse => 2,
            Opcode::Input | Opcode::Output | Opcode::AdjustRelativeBase => 1,
            Opcode::Halt => 0,
        }
    }

    /// The two-digit numeric code.
    pub fn code(self) -> i64 {
        self as u8 as i64
    }

    /// Whether the last operand names a memory cell to write.
    pub fn writes_last_operand(self) -> bool {
        matches!(
            self,
            Opcode::Add | Opcode::Multiply | Opcode::Input | Opcode::LessThan | Opcode::Equals
        )
    }
}

impl TryFrom<i64> for Opcode {
    type Error = DecodeError;

    /// Convert a two-digit code (not a full instruction word) to an opcode.
    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Opcode::Add),
            2 => Ok(Opcode::Multiply),
            3 => Ok(Opcode::Input),
            4 => Ok(Opcode::Output),
            5 => Ok(Opcode::JumpIfTrue),
            6 => Ok(Opcode::JumpIfFalse),
            7 => Ok(Opcode::LessThan),
            8 => Ok(Opcode::Equals),
            9 => Ok(Opcode::AdjustRelativeBase),
            99 => Ok(Opcode::Halt),
            other => Err(DecodeError::UnknownOpcode(other)),
        }
    }
}
