//! Cooperative scheduling of several machines wired output to input.
//!
//! Each stage owns its machine and an inbox. Stage `i`'s outputs are
//! appended to stage `i + 1`'s inbox; in a feedback loop the last stage
//! also feeds the first. Stages take turns in round-robin order, each
//! running until it halts or blocks on an empty inbox.

use std::collections::VecDeque;

use intcode_common::Program;
use intcode_vm::{Event, Executor, RuntimeError};

use crate::error::PipelineError;
use crate::limits::INITIAL_SIGNAL;

/// How the stages are wired.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Topology {
    /// Output of the last stage leaves the circuit.
    Serial,
    /// Output of the last stage is also fed back to the first.
    Feedback,
}

impl Topology {
    /// The conventional phase set for this wiring.
    pub fn default_phases(self) -> &'static [i64] {
        match self {
            Topology::Serial => &crate::limits::SERIAL_PHASES,
            Topology::Feedback => &crate::limits::FEEDBACK_PHASES,
        }
    }
}

/// One machine and the values queued for it.
#[derive(Debug, Clone)]
struct Stage {
    machine: Executor,
    inbox: VecDeque<i64>,
    halted: bool,
}

/// A set of machines running the same program, chained together.
#[derive(Debug, Clone)]
pub struct Circuit {
    stages: Vec<Stage>,
    topology: Topology,
    /// Last value emitted by the final stage.
    signal: Option<i64>,
}

impl Circuit {
    /// Build one stage per phase. Each inbox starts with its phase; the
    /// first stage also receives the initial signal.
    pub fn new(program: &Program, phases: &[i64], topology: Topology) -> Result<Self, PipelineError> {
        if phases.is_empty() {
            return Err(PipelineError::EmptyPhases);
        }

        let mut stages: Vec<Stage> = phases
            .iter()
            .map(|&phase| Stage {
                machine: Executor::new(program),
                inbox: VecDeque::from([phase]),
                halted: false,
            })
            .collect();
        stages[0].inbox.push_back(INITIAL_SIGNAL);

        Ok(Self {
            stages,
            topology,
            signal: None,
        })
    }

    /// Apply a per-machine step budget to every stage.
    pub fn with_step_limit(mut self, limit: u64) -> Self {
        for stage in &mut self.stages {
            stage.machine.set_step_limit(Some(limit));
        }
        self
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// Run until the final stage halts and return its last output.
    pub fn run(mut self) -> Result<i64, PipelineError> {
        let last = self.stages.len() - 1;

        loop {
            let mut progressed = false;

            for index in 0..self.stages.len() {
                if self.stages[index].halted {
                    continue;
                }
                progressed |= self.run_stage(index)?;

                if index == last && self.stages[last].halted {
                    return self.signal.ok_or(PipelineError::NoOutput { stage: last });
                }
            }

            if !progressed {
                let stage = self
                    .stages
                    .iter()
                    .position(|s| !s.halted)
                    .unwrap_or(last);
                return Err(PipelineError::Stalled { stage });
            }
        }
    }

    /// Give stage `index` the floor until it halts or starves.
    ///
    /// Returns whether the machine executed any instruction.
    fn run_stage(&mut self, index: usize) -> Result<bool, PipelineError> {
        let last = self.stages.len() - 1;
        let stage_error = move |source: RuntimeError| PipelineError::Stage {
            stage: index,
            source,
        };

        let before = self.stages[index].machine.steps();
        let mut event = self.stages[index]
            .machine
            .resume(None)
            .map_err(stage_error)?;

        loop {
            event = match event {
                Event::NeedInput { .. } => match self.stages[index].inbox.pop_front() {
                    Some(value) => self.stages[index]
                        .machine
                        .resume(Some(value))
                        .map_err(stage_error)?,
                    None => break,
                },
                Event::Output(value) => {
                    if index == last {
                        self.signal = Some(value);
                    }
                    if let Some(next) = self.downstream(index) {
                        self.stages[next].inbox.push_back(value);
                    }
                    self.stages[index]
                        .machine
                        .resume(None)
                        .map_err(stage_error)?
                }
                Event::Halted(_) => {
                    self.stages[index].halted = true;
                    break;
                }
            };
        }

        Ok(self.stages[index].machine.steps() != before)
    }

    /// Index of the stage fed by stage `index`, if any.
    fn downstream(&self, index: usize) -> Option<usize> {
        let next = index + 1;
        if next < self.stages.len() {
            Some(next)
        } else {
            match self.topology {
                Topology::Feedback => Some(0),
                Topology::Serial => None,
            }
        }
    }
}

/// Run a serial chain seeded with the initial signal.
pub fn run_chain(program: &Program, phases: &[i64]) -> Result<i64, PipelineError> {
    Circuit::new(program, phases, Topology::Serial)?.run()
}

/// Run a feedback loop until the final stage halts.
pub fn run_feedback_loop(program: &Program, phases: &[i64]) -> Result<i64, PipelineError> {
    Circuit::new(program, phases, Topology::Feedback)?.run()
}
