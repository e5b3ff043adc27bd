//! This crate implements the merge rollup: it checks that two sibling rollup
//! proofs can be combined and builds the public outputs of their parent in the
//! aggregation tree.
//!
//! Checks never abort.  They report into a [`FailureSink`] and the output
//! record is always built, so callers must consult the sink before trusting
//! it.  [`merge_records`] and [`merge_rollup_sim`] wrap that up for callers
//! that want a plain result.

pub mod aggregate;
pub mod calldata;
pub mod checks;
pub mod combine;
pub mod errors;
pub mod sim;
pub mod sink;

pub use aggregate::aggregate_records;
pub use errors::{AggregateError, MergeInvariantViolation, MergeSimError};
pub use sim::merge_rollup_sim;
pub use sink::{FailureSink, SoftFailSink};

use rollup_state::prelude::*;
use tracing::*;

/// Runs the merge over a pair of children, reporting violations into `sink`.
///
/// The returned record is fully formed even if the sink failed.
pub fn merge_rollup(sink: &mut impl FailureSink, inputs: &MergeRollupInputs) -> RollupPublicRecord {
    merge_pair(sink, inputs.left(), inputs.right())
}

/// Merges two records with a fresh sink, returning the output along with the
/// first violation if there was one.
pub fn merge_records(
    left: &RollupPublicRecord,
    right: &RollupPublicRecord,
) -> (RollupPublicRecord, Option<MergeInvariantViolation>) {
    let mut sink = SoftFailSink::new("merge_records");
    let output = merge_pair(&mut sink, left, right);
    (output, sink.into_first_failure())
}

fn merge_pair(
    sink: &mut impl FailureSink,
    left: &RollupPublicRecord,
    right: &RollupPublicRecord,
) -> RollupPublicRecord {
    checks::check_merge_invariants(sink, left, right);
    let output = combine::combine_records(left, right);

    debug!(
        height = output.rollup_subtree_height,
        failed = sink.failed(),
        "merged rollup pair"
    );

    output
}
