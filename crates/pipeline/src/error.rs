//! Errors for amplifier circuits.
//!
//! A fatal error in any stage stops the whole circuit; the stage index
//! identifies which machine failed.

use intcode_vm::RuntimeError;
use thiserror::Error;

/// Errors that stop a circuit.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PipelineError {
    /// A circuit needs at least one stage.
    #[error("no phase settings given")]
    EmptyPhases,

    /// Phase search is factorial in the number of phases.
    #[error("{count} phases exceeds the search maximum of {max}")]
    TooManyPhases { count: usize, max: usize },

    /// A stage's machine failed.
    #[error("stage {stage}: {source}")]
    Stage {
        stage: usize,
        #[source]
        source: RuntimeError,
    },

    /// Every live stage is waiting for input that will never arrive.
    #[error("circuit stalled: stage {stage} is waiting for input that never arrives")]
    Stalled { stage: usize },

    /// The final stage halted without emitting a signal.
    #[error("stage {stage} halted without producing a signal")]
    NoOutput { stage: usize },
}
