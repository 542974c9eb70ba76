//! Instruction loop and opcode dispatch for the Intcode VM.

use crate::error::RuntimeError;
use crate::machine::{Event, Executor, State};
use intcode_common::{DecodeError, Instruction, Mode, Opcode};

impl Executor {
    /// Run until the next suspension point and report it.
    ///
    /// Pass `Some(value)` exactly when the previous event was
    /// [`Event::NeedInput`]. Resuming an input-blocked machine with `None`
    /// re-reports `NeedInput` without side effects.
    pub fn resume(&mut self, input: Option<i64>) -> Result<Event, RuntimeError> {
        self.check_live()?;

        match (self.state, input) {
            (State::AwaitingInput, Some(value)) => self.deliver_input(value)?,
            (State::AwaitingInput, None) => return Ok(Event::NeedInput { at: self.ip }),
            (_, Some(_)) => return Err(RuntimeError::UnexpectedInput { at: self.ip }),
            (_, None) => {}
        }

        loop {
            if let Some(event) = self.step()? {
                return Ok(event);
            }
        }
    }

    /// Execute a single instruction.
    ///
    /// Returns `Some(event)` when the instruction was a suspension point
    /// (INPUT, OUTPUT or TERMINATE). An input-blocked machine does not
    /// advance and reports `NeedInput` again.
    pub fn step(&mut self) -> Result<Option<Event>, RuntimeError> {
        self.check_live()?;
        if self.state == State::AwaitingInput {
            return Ok(Some(Event::NeedInput { at: self.ip }));
        }

        self.execute_one().inspect_err(|_| {
            self.state = State::Faulted;
        })
    }

    /// Fetch, decode and execute the instruction at `ip`.
    fn execute_one(&mut self) -> Result<Option<Event>, RuntimeError> {
        if let Some(limit) = self.step_limit {
            if self.steps >= limit {
                return Err(RuntimeError::StepLimitExceeded { limit });
            }
        }
        self.steps += 1;

        let instr = self.fetch()?;

        match instr.opcode {
            Opcode::Add => self.exec_binary(&instr, |a, b| a.wrapping_add(b))?,
            Opcode::Multiply => self.exec_binary(&instr, |a, b| a.wrapping_mul(b))?,
            Opcode::LessThan => self.exec_binary(&instr, |a, b| (a < b) as i64)?,
            Opcode::Equals => self.exec_binary(&instr, |a, b| (a == b) as i64)?,
            Opcode::JumpIfTrue => self.exec_jump(&instr, |cond| cond != 0)?,
            Opcode::JumpIfFalse => self.exec_jump(&instr, |cond| cond == 0)?,
            Opcode::AdjustRelativeBase => {
                let delta = self.read_operand(&instr, 0)?;
                self.relative_base = self.relative_base.wrapping_add(delta);
                self.advance(&instr);
            }
            Opcode::Input => {
                self.state = State::AwaitingInput;
                return Ok(Some(Event::NeedInput { at: self.ip }));
            }
            Opcode::Output => {
                let value = self.read_operand(&instr, 0)?;
                self.advance(&instr);
                return Ok(Some(Event::Output(value)));
            }
            Opcode::Halt => {
                self.state = State::Halted;
                return Ok(Some(Event::Halted(self.memory.as_slice().to_vec())));
            }
        }

        Ok(None)
    }

    /// Complete a suspended INPUT by storing `value` at its target.
    fn deliver_input(&mut self, value: i64) -> Result<(), RuntimeError> {
        let result = self.fetch().and_then(|instr| {
            let target = self.write_target(&instr, 0)?;
            self.store(target, value)?;
            self.advance(&instr);
            Ok(())
        });

        match result {
            Ok(()) => {
                self.state = State::Running;
                Ok(())
            }
            Err(e) => {
                self.state = State::Faulted;
                Err(e)
            }
        }
    }

    /// Decode the word at `ip`. An immediate-mode write target is rejected
    /// here, before any operand is read or the machine suspends.
    fn fetch(&mut self) -> Result<Instruction, RuntimeError> {
        let at = self.ip;
        let word = self.load(at)?;
        let instr = Instruction::decode(word).map_err(|e| match e {
            DecodeError::UnknownMode { word, digit, .. } => {
                RuntimeError::UnknownMode { at, word, digit }
            }
            _ => RuntimeError::UnknownOpcode { at, word },
        })?;

        if instr.opcode.writes_last_operand()
            && instr.mode(instr.opcode.operand_count() - 1) == Mode::Immediate
        {
            return Err(RuntimeError::InvalidWriteMode { at });
        }
        Ok(instr)
    }

    /// The raw word of operand `index` (0-based).
    fn raw_operand(&mut self, index: usize) -> Result<i64, RuntimeError> {
        self.load(self.ip.saturating_add(1 + index as i64))
    }

    /// Resolve operand `index` to a value according to its mode.
    fn read_operand(&mut self, instr: &Instruction, index: usize) -> Result<i64, RuntimeError> {
        let raw = self.raw_operand(index)?;
        match instr.mode(index) {
            Mode::Position => self.load(raw),
            Mode::Immediate => Ok(raw),
            Mode::Relative => self.load(self.relative_base.saturating_add(raw)),
        }
    }

    /// Resolve operand `index` to the address it names for writing.
    fn write_target(&mut self, instr: &Instruction, index: usize) -> Result<i64, RuntimeError> {
        let raw = self.raw_operand(index)?;
        match instr.mode(index) {
            Mode::Position => Ok(raw),
            Mode::Relative => Ok(self.relative_base.saturating_add(raw)),
            Mode::Immediate => Err(RuntimeError::InvalidWriteMode { at: self.ip }),
        }
    }

    fn advance(&mut self, instr: &Instruction) {
        self.ip = self.ip.saturating_add(instr.width() as i64);
    }

    /// ADD, MULTIPLY, LESS_THAN and EQUALS: `c = op(a, b)`.
    fn exec_binary<F>(&mut self, instr: &Instruction, op: F) -> Result<(), RuntimeError>
    where
        F: Fn(i64, i64) -> i64,
    {
        let a = self.read_operand(instr, 0)?;
        let b = self.read_operand(instr, 1)?;
        let target = self.write_target(instr, 2)?;
        self.store(target, op(a, b))?;
        self.advance(instr);
        Ok(())
    }

    /// JUMP_IF_TRUE and JUMP_IF_FALSE.
    fn exec_jump<F>(&mut self, instr: &Instruction, taken: F) -> Result<(), RuntimeError>
    where
        F: Fn(i64) -> bool,
    {
        let cond = self.read_operand(instr, 0)?;
        let dest = self.read_operand(instr, 1)?;
        if taken(cond) {
            self.ip = dest;
        } else {
            self.advance(instr);
        }
        Ok(())
    }
}
