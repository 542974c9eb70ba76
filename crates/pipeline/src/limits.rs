//! Phase conventions and search ceilings.

/// Phase settings used by a serial chain of five amplifiers.
pub const SERIAL_PHASES: [i64; 5] = [0, 1, 2, 3, 4];

/// Phase settings used by a five-amplifier feedback loop.
pub const FEEDBACK_PHASES: [i64; 5] = [5, 6, 7, 8, 9];

/// Signal fed to the first stage before anything else.
pub const INITIAL_SIGNAL: i64 = 0;

/// Largest phase set [`crate::search::best_phase_setting`] will permute.
pub const MAX_SEARCH_PHASES: usize = 8;
