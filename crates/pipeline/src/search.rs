//! Exhaustive search over phase orderings.

use intcode_common::Program;

use crate::circuit::{Circuit, Topology};
use crate::error::PipelineError;
use crate::limits::MAX_SEARCH_PHASES;

/// The strongest ordering found and the signal it produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tuning {
    pub phases: Vec<i64>,
    pub signal: i64,
}

/// Try every ordering of `phases` and keep the one with the largest final
/// signal. Orderings are visited lexicographically by position in
/// `phases`, so among equal signals the earliest ordering wins.
///
/// Any stage failure aborts the whole search.
pub fn best_phase_setting(
    program: &Program,
    phases: &[i64],
    topology: Topology,
    step_limit: Option<u64>,
) -> Result<Tuning, PipelineError> {
    if phases.is_empty() {
        return Err(PipelineError::EmptyPhases);
    }
    if phases.len() > MAX_SEARCH_PHASES {
        return Err(PipelineError::TooManyPhases {
            count: phases.len(),
            max: MAX_SEARCH_PHASES,
        });
    }

    let mut order: Vec<usize> = (0..phases.len()).collect();
    let mut best: Option<Tuning> = None;

    loop {
        let candidate: Vec<i64> = order.iter().map(|&i| phases[i]).collect();
        let mut circuit = Circuit::new(program, &candidate, topology)?;
        if let Some(limit) = step_limit {
            circuit = circuit.with_step_limit(limit);
        }
        let signal = circuit.run()?;

        if best.as_ref().map_or(true, |b| signal > b.signal) {
            best = Some(Tuning {
                phases: candidate,
                signal,
            });
        }

        if !next_permutation(&mut order) {
            break;
        }
    }

    best.ok_or(PipelineError::EmptyPhases)
}

/// Advance `items` to the next lexicographic permutation.
///
/// Returns false (leaving `items` sorted descending) once the last
/// permutation has been reached.
fn next_permutation(items: &mut [usize]) -> bool {
    let Some(pivot) = items.windows(2).rposition(|w| w[0] < w[1]) else {
        return false;
    };
    let successor = items
        .iter()
        .rposition(|&x| x > items[pivot])
        .unwrap_or(pivot + 1);
    items.swap(pivot, successor);
    items[pivot + 1..].reverse();
    true
}
