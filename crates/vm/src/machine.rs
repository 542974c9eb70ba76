//! Machine state: memory, instruction pointer, relative base, lifecycle.

use intcode_common::Program;

use crate::error::RuntimeError;
use crate::memory::{Memory, MemoryError};

/// Lifecycle of a machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    /// Ready to execute the instruction at the instruction pointer.
    Running,
    /// Suspended on INPUT; the next `resume` must supply a value.
    AwaitingInput,
    /// TERMINATE executed. Terminal.
    Halted,
    /// A fatal runtime error occurred. Terminal.
    Faulted,
}

/// What the machine reports to its driver at each suspension point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// The machine is blocked on the INPUT at address `at` and expects
    /// exactly one value.
    NeedInput { at: i64 },
    /// OUTPUT produced a value. Resume with no input to continue.
    Output(i64),
    /// TERMINATE executed. Carries the final memory image.
    Halted(Vec<i64>),
}

impl Event {
    /// The output value, if this is an output event.
    pub fn output(&self) -> Option<i64> {
        match self {
            Event::Output(value) => Some(*value),
            _ => None,
        }
    }

    pub fn is_halted(&self) -> bool {
        matches!(self, Event::Halted(_))
    }
}

/// A suspendable Intcode machine.
///
/// Instances own all of their state, so any number of them can be
/// interleaved by a driver. Cloning a suspended machine forks it.
#[derive(Debug, Clone)]
pub struct Executor {
    pub(crate) memory: Memory,
    /// Address of the current instruction. Kept signed so a jump to a
    /// negative target surfaces as an address error on the next fetch.
    pub(crate) ip: i64,
    pub(crate) relative_base: i64,
    pub(crate) state: State,
    /// Instructions executed so far.
    pub(crate) steps: u64,
    pub(crate) step_limit: Option<u64>,
}

impl Executor {
    /// Create a machine with `program` loaded at address 0.
    pub fn new(program: &Program) -> Self {
        Self::from_memory(Memory::new(program.words().to_vec()))
    }

    /// Create a machine over an existing memory image.
    pub fn from_memory(memory: Memory) -> Self {
        Self {
            memory,
            ip: 0,
            relative_base: 0,
            state: State::Running,
            steps: 0,
            step_limit: None,
        }
    }

    /// Fail with `StepLimitExceeded` once more than `limit` instructions
    /// have executed.
    pub fn with_step_limit(mut self, limit: u64) -> Self {
        self.step_limit = Some(limit);
        self
    }

    /// Replace the step budget of an existing machine. `None` removes it.
    pub fn set_step_limit(&mut self, limit: Option<u64>) {
        self.step_limit = limit;
    }

    /// Cap how many cells memory may grow to. Memory is unbounded otherwise.
    pub fn with_memory_limit(mut self, limit: usize) -> Self {
        self.memory = self.memory.with_limit(limit);
        self
    }

    /// Overwrite one memory cell from outside the machine.
    ///
    /// Drivers use this to patch a program before running it, e.g. the
    /// noun/verb cells at addresses 1 and 2.
    pub fn poke(&mut self, address: i64, value: i64) -> Result<(), RuntimeError> {
        let at = self.ip;
        self.memory
            .write(address, value)
            .map_err(|e| memory_error(at, e))
    }

    pub fn state(&self) -> State {
        self.state
    }

    pub fn instruction_pointer(&self) -> i64 {
        self.ip
    }

    pub fn relative_base(&self) -> i64 {
        self.relative_base
    }

    pub fn memory(&self) -> &Memory {
        &self.memory
    }

    /// Number of instructions executed so far.
    pub fn steps(&self) -> u64 {
        self.steps
    }

    pub fn is_halted(&self) -> bool {
        self.state == State::Halted
    }

    /// Refuse to step a machine in a terminal state.
    pub(crate) fn check_live(&self) -> Result<(), RuntimeError> {
        match self.state {
            State::Halted => Err(RuntimeError::AlreadyHalted),
            State::Faulted => Err(RuntimeError::Faulted),
            State::Running | State::AwaitingInput => Ok(()),
        }
    }

    pub(crate) fn load(&mut self, address: i64) -> Result<i64, RuntimeError> {
        let at = self.ip;
        self.memory.read(address).map_err(|e| memory_error(at, e))
    }

    pub(crate) fn store(&mut self, address: i64, value: i64) -> Result<(), RuntimeError> {
        let at = self.ip;
        self.memory
            .write(address, value)
            .map_err(|e| memory_error(at, e))
    }
}

/// Attach the current instruction address to a memory failure.
pub(crate) fn memory_error(at: i64, err: MemoryError) -> RuntimeError {
    match err {
        MemoryError::Negative(address) => RuntimeError::Address { at, address },
        MemoryError::LimitExceeded { address, limit } => RuntimeError::MemoryLimitExceeded {
            at,
            address,
            limit,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_machine_starts_running_at_zero() {
        let program = Program::new(vec![99]);
        let vm = Executor::new(&program);
        assert_eq!(vm.state(), State::Running);
        assert_eq!(vm.instruction_pointer(), 0);
        assert_eq!(vm.relative_base(), 0);
        assert_eq!(vm.steps(), 0);
        assert_eq!(vm.memory().as_slice(), &[99]);
    }

    #[test]
    fn poke_patches_memory() {
        let program = Program::new(vec![1, 0, 0, 0, 99]);
        let mut vm = Executor::new(&program);
        vm.poke(1, 12).unwrap();
        vm.poke(2, 2).unwrap();
        assert_eq!(vm.memory().as_slice(), &[1, 12, 2, 0, 99]);
    }

    #[test]
    fn poke_negative_address() {
        let mut vm = Executor::new(&Program::new(vec![99]));
        assert_eq!(
            vm.poke(-3, 1),
            Err(RuntimeError::Address { at: 0, address: -3 })
        );
    }

    #[test]
    fn event_accessors() {
        assert_eq!(Event::Output(7).output(), Some(7));
        assert_eq!(Event::NeedInput { at: 0 }.output(), None);
        assert!(Event::Halted(vec![]).is_halted());
        assert!(!Event::Output(0).is_halted());
    }
}
