//! Operand addressing modes.

use std::fmt;

/// How a raw operand is interpreted.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Mode {
    /// The operand is an address; the value lives in memory there.
    #[default]
    Position = 0,
    /// The operand is the value itself. Never valid as a write target.
    Immediate = 1,
    /// The operand is an offset from the relative base.
    Relative = 2,
}

/// All modes, in digit order.
pub const ALL_MODES: [Mode; 3] = [Mode::Position, Mode::Immediate, Mode::Relative];

impl Mode {
    /// Map a single decimal mode digit to a mode.
    pub fn from_digit(digit: i64) -> Option<Self> {
        match digit {
            0 => Some(Mode::Position),
            1 => Some(Mode::Immediate),
            2 => Some(Mode::Relative),
            _ => None,
        }
    }

    /// The decimal digit this mode is encoded as.
    pub fn digit(self) -> i64 {
        self as u8 as i64
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Position => write!(f, "position"),
            Mode::Immediate => write!(f, "immediate"),
            Mode::Relative => write!(f, "relative"),
        }
    }
}
