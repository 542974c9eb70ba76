//! Intcode virtual machine — a suspendable interpreter for integer programs.
//!
//! The machine has:
//! - A growable memory of `i64` cells that zero-fills on demand
//! - An instruction pointer and a movable relative base
//! - A lifecycle that suspends at every INPUT, OUTPUT and TERMINATE
//!
//! Drivers interact with a machine only through [`Executor::resume`], which
//! runs to the next suspension point and returns an [`Event`].
//!
//! # Usage
//!
//! ```
//! use intcode_vm::{load, Event};
//!
//! let mut vm = load("3,9,8,9,10,9,4,9,99,-1,8").unwrap();
//! assert_eq!(vm.resume(None).unwrap(), Event::NeedInput { at: 0 });
//! assert_eq!(vm.resume(Some(8)).unwrap(), Event::Output(1));
//! assert!(vm.resume(None).unwrap().is_halted());
//! ```

pub mod error;
pub mod execute;
pub mod machine;
pub mod memory;

pub use error::RuntimeError;
pub use machine::{Event, Executor, State};
pub use memory::{Memory, MemoryError};

use intcode_common::{DecodeError, Program};

/// Parse program text and load it into a fresh machine.
pub fn load(text: &str) -> Result<Executor, DecodeError> {
    let program = Program::parse(text)?;
    Ok(Executor::new(&program))
}

/// Everything a run to completion produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOutcome {
    /// Output values, in emission order.
    pub outputs: Vec<i64>,
    /// Memory at the time TERMINATE executed.
    pub memory: Vec<i64>,
}

impl Executor {
    /// Drive the machine to TERMINATE through callbacks.
    ///
    /// `input` is called each time the machine needs a value; returning
    /// `None` fails the run with [`RuntimeError::InputExhausted`]. `output`
    /// sees every output value as it is produced.
    pub fn drive<I, O>(&mut self, mut input: I, mut output: O) -> Result<Vec<i64>, RuntimeError>
    where
        I: FnMut() -> Option<i64>,
        O: FnMut(i64),
    {
        let mut event = self.resume(None)?;
        loop {
            event = match event {
                Event::NeedInput { at } => {
                    let value = input().ok_or(RuntimeError::InputExhausted { at })?;
                    self.resume(Some(value))?
                }
                Event::Output(value) => {
                    output(value);
                    self.resume(None)?
                }
                Event::Halted(memory) => return Ok(memory),
            };
        }
    }

    /// Feed `inputs` in order and collect outputs until TERMINATE.
    pub fn run_to_halt<T>(&mut self, inputs: T) -> Result<RunOutcome, RuntimeError>
    where
        T: IntoIterator<Item = i64>,
    {
        let mut inputs = inputs.into_iter();
        let mut outputs = Vec::new();
        let memory = self.drive(|| inputs.next(), |value| outputs.push(value))?;
        Ok(RunOutcome { outputs, memory })
    }
}

/// Execute a program with a fixed input sequence.
///
/// This is the primary batch entry point. Interactive drivers should hold
/// an [`Executor`] and call [`Executor::resume`] themselves.
///
/// # Errors
///
/// Returns [`RuntimeError`] if execution fails or the program asks for more
/// input than `inputs` provides.
pub fn run(program: &Program, inputs: &[i64]) -> Result<RunOutcome, RuntimeError> {
    Executor::new(program).run_to_halt(inputs.iter().copied())
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    // Reads one input, then counts down from it, emitting each value.
    const COUNTDOWN: &str = "3,100,4,100,1001,100,-1,100,1005,100,2,99";

    proptest! {
        /// Running the same program on the same inputs twice gives identical
        /// outputs and final memory.
        #[test]
        fn execution_is_deterministic(start in 1i64..50) {
            let program = Program::parse(COUNTDOWN).unwrap();
            let first = run(&program, &[start]);
            let second = run(&program, &[start]);
            prop_assert_eq!(&first, &second);
            let outcome = first.unwrap();
            prop_assert_eq!(outcome.outputs.len() as i64, start);
            prop_assert_eq!(outcome.outputs.last(), Some(&1));
        }

        /// ADD with immediate operands stores the exact sum at the target.
        #[test]
        fn add_stores_exact_sum(a in any::<i64>(), b in any::<i64>()) {
            let program = Program::new(vec![1101, a, b, 5, 99, 0]);
            let outcome = run(&program, &[]).unwrap();
            prop_assert_eq!(outcome.memory[5], a.wrapping_add(b));
        }
    }
}
