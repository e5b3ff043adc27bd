//! Serialized entry point for running a merge across a process boundary.

use rollup_state::prelude::*;
use tracing::*;

use crate::{errors::MergeSimError, merge_rollup, sink::SoftFailSink};

/// Decodes merge inputs, runs the merge, and encodes the output record.
///
/// If any check fails the first violation is returned instead of the output,
/// so a caller never sees a record that isn't valid.
pub fn merge_rollup_sim(inputs_buf: &[u8]) -> Result<Vec<u8>, MergeSimError> {
    let inputs: MergeRollupInputs = borsh::from_slice(inputs_buf).map_err(MergeSimError::Decode)?;

    let mut sink = SoftFailSink::new("merge_rollup_sim");
    let output = merge_rollup(&mut sink, &inputs);

    if let Some(violation) = sink.into_first_failure() {
        warn!(%violation, "rejecting merge output");
        return Err(violation.into());
    }

    borsh::to_vec(&output).map_err(MergeSimError::Encode)
}

#[cfg(test)]
mod tests {
    use rollup_test_utils::rollup::get_empty_merge_rollup_inputs;

    use super::*;
    use crate::errors::MergeInvariantViolation;

    #[test]
    fn test_sim_success() {
        let inputs = get_empty_merge_rollup_inputs();
        let buf = borsh::to_vec(&inputs).unwrap();

        let out_buf = merge_rollup_sim(&buf).unwrap();
        let out: RollupPublicRecord = borsh::from_slice(&out_buf).unwrap();

        assert_eq!(out.rollup_type, RollupType::Merge);
        assert_eq!(out.rollup_subtree_height, 1);
    }

    #[test]
    fn test_sim_reports_first_violation() {
        let mut inputs = get_empty_merge_rollup_inputs();
        inputs.right_mut().rollup_subtree_height = 1;
        let buf = borsh::to_vec(&inputs).unwrap();

        let err = merge_rollup_sim(&buf).unwrap_err();
        assert_eq!(
            err.violation(),
            Some(MergeInvariantViolation::RollupHeightMismatch)
        );
        assert_eq!(
            err.to_string(),
            "input proofs are of different rollup heights"
        );
    }

    #[test]
    fn test_sim_rejects_garbage() {
        let err = merge_rollup_sim(&[0u8; 17]).unwrap_err();
        assert!(matches!(err, MergeSimError::Decode(_)));
        assert_eq!(err.violation(), None);
    }

    #[test]
    fn test_sim_rejects_trailing_bytes() {
        let inputs = get_empty_merge_rollup_inputs();
        let mut buf = borsh::to_vec(&inputs).unwrap();
        buf.push(0);

        assert!(matches!(
            merge_rollup_sim(&buf),
            Err(MergeSimError::Decode(_))
        ));
    }
}
