//! Intcode amplifier circuits — composing machines without threads.
//!
//! A circuit runs one [`intcode_vm::Executor`] per phase setting, all
//! loaded with the same program, and routes each stage's outputs into the
//! next stage's inputs. Scheduling is cooperative: a single thread hands
//! control from stage to stage whenever one blocks on input.
//!
//! # Usage
//!
//! ```
//! use intcode_common::Program;
//! use intcode_pipeline::run_chain;
//!
//! let program = Program::parse("3,15,3,16,1002,16,10,16,1,16,15,15,4,15,99,0,0").unwrap();
//! assert_eq!(run_chain(&program, &[4, 3, 2, 1, 0]).unwrap(), 43210);
//! ```
//!
//! Any stage's runtime error terminates the whole circuit and is reported
//! as [`PipelineError::Stage`].

pub mod circuit;
pub mod error;
pub mod limits;
pub mod search;

pub use circuit::{run_chain, run_feedback_loop, Circuit, Topology};
pub use error::PipelineError;
pub use search::{best_phase_setting, Tuning};
