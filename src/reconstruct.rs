//! Witness path reconstruction.
//!
//! Runs after propagation has fully converged and only reads the frozen
//! record table: for each sink, the recorded predecessor links are walked
//! backward to the originating seed and reversed into a forward-ordered
//! [`WitnessPath`].

use crate::search::{PropagationOutcome, SearchError};
use crate::types::{VfgNodeId, WitnessPath, WitnessStep};

/// Reconstruct one witness path per sink, in ascending sink order.
pub fn witness_paths(outcome: &PropagationOutcome) -> Result<Vec<WitnessPath>, SearchError> {
    outcome
        .sinks
        .iter()
        .map(|&sink| witness_path_for(outcome, sink))
        .collect()
}

/// Reconstruct the witness path ending at one sink.
///
/// Predecessor pointers only ever point at nodes improved strictly earlier,
/// so on a well-formed graph the walk reaches a seed (the first record with
/// no predecessor) in at most `|records|` hops. A longer chain means the
/// record table is self-referential — a malformed-graph precondition
/// violation — and aborts the analysis.
pub fn witness_path_for(
    outcome: &PropagationOutcome,
    sink: VfgNodeId,
) -> Result<WitnessPath, SearchError> {
    let max_hops = outcome.records.len();
    let mut head = sink;
    let mut reversed: Vec<WitnessStep> = Vec::new();

    loop {
        let record = outcome
            .record(head)
            .ok_or(SearchError::CyclicWitnessChain { sink })?;

        match record.pred {
            Some(pred) => {
                if reversed.len() >= max_hops {
                    tracing::error!(sink = %sink, "witness chain exceeded record count");
                    return Err(SearchError::CyclicWitnessChain { sink });
                }
                reversed.push(WitnessStep {
                    edge: pred.edge,
                    node: head,
                });
                head = pred.node;
            }
            None => break,
        }
    }

    reversed.reverse();
    Ok(WitnessPath::new(head, reversed))
}
