//! Intcode common types and instruction decoding.
//!
//! This crate provides the foundational data structures shared by the VM
//! and its drivers:
//!
//! - [`Opcode`] — the ten opcodes and their operand counts
//! - [`Mode`] — position, immediate and relative addressing
//! - [`Instruction`] — a decoded instruction word
//! - [`Program`] — the comma-separated program text format
//! - [`DecodeError`] — errors from parsing or decoding
//!
//! # Dependencies
//!
//! This crate uses `thiserror` (compile-time proc-macro, zero runtime cost)
//! and has no other dependencies.

pub mod error;
pub mod instruction;
pub mod mode;
pub mod opcode;
pub mod program;

// Re-export commonly used types at the crate root.
pub use error::DecodeError;
pub use instruction::{Instruction, MAX_OPERANDS};
pub use mode::Mode;
pub use opcode::Opcode;
pub use program::Program;

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn arb_opcode() -> impl Strategy<Value = Opcode> {
        prop::sample::select(&opcode::ALL_OPCODES[..])
    }

    fn arb_mode() -> impl Strategy<Value = Mode> {
        prop::sample::select(&mode::ALL_MODES[..])
    }

    fn arb_instruction() -> impl Strategy<Value = Instruction> {
        (arb_opcode(), prop::array::uniform3(arb_mode()))
            .prop_map(|(op, modes)| Instruction::new(op, modes))
    }

    proptest! {
        /// For all valid instructions, encode then decode produces the original.
        #[test]
        fn encode_decode_roundtrip(instr in arb_instruction()) {
            let decoded = Instruction::decode(instr.encode()).unwrap();
            prop_assert_eq!(instr, decoded);
        }

        /// Any word either decodes to an instruction whose opcode matches the
        /// low two digits, or fails with a decode error naming that word.
        #[test]
        fn arbitrary_words_decode_or_fail_cleanly(word in any::<i64>()) {
            match Instruction::decode(word) {
                Ok(instr) => prop_assert_eq!(instr.opcode.code(), word % 100),
                Err(DecodeError::UnknownOpcode(w)) => prop_assert_eq!(w, word),
                Err(DecodeError::UnknownMode { word: w, operand, .. }) => {
                    prop_assert_eq!(w, word);
                    prop_assert!(operand < MAX_OPERANDS);
                }
                Err(other) => prop_assert!(false, "unexpected error {other:?}"),
            }
        }

        /// Printing then parsing a program yields the same program.
        #[test]
        fn program_text_roundtrip(words in prop::collection::vec(any::<i64>(), 1..64)) {
            let program = Program::new(words);
            let parsed = Program::parse(&program.to_string()).unwrap();
            prop_assert_eq!(program, parsed);
        }
    }
}
