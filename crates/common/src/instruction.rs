//! Decoding of Intcode instruction words.
//!
//! An instruction word is a non-negative decimal number laid out as:
//! ```text
//!   C B A D E
//!   | | | +-+-- opcode (two digits)
//!   | | +------ mode of operand 1
//!   | +-------- mode of operand 2
//!   +---------- mode of operand 3
//! ```
//! Leading zeros are omitted, so a missing mode digit means position mode.
//! Mode digits beyond the opcode's operand count are ignored.

use crate::error::DecodeError;
use crate::mode::Mode;
use crate::opcode::Opcode;

/// The largest operand count of any opcode.
pub const MAX_OPERANDS: usize = 3;

/// A decoded instruction: opcode plus one mode per operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Instruction {
    /// The operation to perform.
    pub opcode: Opcode,
    /// Modes for each operand slot. Slots past `operand_count()` are always
    /// `Mode::Position`.
    modes: [Mode; MAX_OPERANDS],
}

impl Instruction {
    /// Create an instruction. Modes past the opcode's operand count are
    /// normalised to position mode.
    pub fn new(opcode: Opcode, modes: [Mode; MAX_OPERANDS]) -> Self {
        let mut normalised = [Mode::Position; MAX_OPERANDS];
        let count = opcode.operand_count();
        normalised[..count].copy_from_slice(&modes[..count]);
        Self {
            opcode,
            modes: normalised,
        }
    }

    /// Decode a raw instruction word such as `1002`.
    pub fn decode(word: i64) -> Result<Self, DecodeError> {
        if word < 0 {
            return Err(DecodeError::UnknownOpcode(word));
        }

        let opcode = Opcode::try_from(word % 100).map_err(|_| DecodeError::UnknownOpcode(word))?;

        let mut modes = [Mode::Position; MAX_OPERANDS];
        let mut digits = word / 100;
        for (operand, slot) in modes
            .iter_mut()
            .take(opcode.operand_count())
            .enumerate()
        {
            let digit = digits % 10;
            *slot = Mode::from_digit(digit).ok_or(DecodeError::UnknownMode {
                word,
                operand,
                digit,
            })?;
            digits /= 10;
        }

        Ok(Self { opcode, modes })
    }

    /// Encode back to the canonical (shortest) instruction word.
    pub fn encode(&self) -> i64 {
        let mut word = self.opcode.code();
        let mut scale = 100;
        for mode in self.modes() {
            word += mode.digit() * scale;
            scale *= 10;
        }
        word
    }

    /// Number of operands following the instruction word.
    pub fn operand_count(&self) -> usize {
        self.opcode.operand_count()
    }

    /// Number of memory cells the instruction occupies, word included.
    pub fn width(&self) -> usize {
        self.operand_count() + 1
    }

    /// Modes of the operands actually used by this opcode.
    pub fn modes(&self) -> &[Mode] {
        &self.modes[..self.operand_count()]
    }

    /// Mode of operand `index` (0-based).
    pub fn mode(&self, index: usize) -> Mode {
        self.modes.get(index).copied().unwrap_or_default()
    }
}
