//! Consistency checks between the two children of a merge.
//!
//! Every check reports into the sink and returns normally, so all of them run
//! regardless of earlier outcomes.  Order matters since the sink keeps only
//! the first failure.

use rollup_state::prelude::*;

use crate::{errors::MergeInvariantViolation, sink::FailureSink};

/// Runs every merge check on `left` and `right`, in order.
pub fn check_merge_invariants(
    sink: &mut impl FailureSink,
    left: &RollupPublicRecord,
    right: &RollupPublicRecord,
) {
    check_same_rollup_type(sink, left, right);
    check_same_height(sink, left, right);
    check_equal_constants(sink, left, right);
    check_follow_on(sink, left, right);
}

pub fn check_same_rollup_type(
    sink: &mut impl FailureSink,
    left: &RollupPublicRecord,
    right: &RollupPublicRecord,
) {
    sink.do_assert(
        left.rollup_type == right.rollup_type,
        MergeInvariantViolation::RollupTypeMismatch,
    );
}

/// Only balanced subtrees are merged, so the heights must match exactly.
pub fn check_same_height(
    sink: &mut impl FailureSink,
    left: &RollupPublicRecord,
    right: &RollupPublicRecord,
) {
    sink.do_assert(
        left.rollup_subtree_height == right.rollup_subtree_height,
        MergeInvariantViolation::RollupHeightMismatch,
    );
}

pub fn check_equal_constants(
    sink: &mut impl FailureSink,
    left: &RollupPublicRecord,
    right: &RollupPublicRecord,
) {
    sink.do_assert(
        left.constants == right.constants,
        MergeInvariantViolation::ConstantsMismatch,
    );
}

/// The right child has to start exactly where the left child ended, for each
/// of the append-only trees.
pub fn check_follow_on(
    sink: &mut impl FailureSink,
    left: &RollupPublicRecord,
    right: &RollupPublicRecord,
) {
    sink.do_assert(
        left.end_private_data_tree_snapshot == right.start_private_data_tree_snapshot,
        MergeInvariantViolation::PrivateDataTreeDiscontinuity,
    );
    sink.do_assert(
        left.end_nullifier_tree_snapshot == right.start_nullifier_tree_snapshot,
        MergeInvariantViolation::NullifierTreeDiscontinuity,
    );
    sink.do_assert(
        left.end_contract_tree_snapshot == right.start_contract_tree_snapshot,
        MergeInvariantViolation::ContractTreeDiscontinuity,
    );
}

#[cfg(test)]
mod tests {
    use rollup_primitives::field::Fr;
    use rollup_test_utils::rollup::get_empty_base_record;

    use super::*;
    use crate::sink::SoftFailSink;

    fn run_checks(left: &RollupPublicRecord, right: &RollupPublicRecord) -> SoftFailSink {
        let mut sink = SoftFailSink::new("checks");
        check_merge_invariants(&mut sink, left, right);
        sink
    }

    #[test]
    fn test_matching_records_pass() {
        let rec = get_empty_base_record();
        let sink = run_checks(&rec, &rec);
        assert!(!sink.failed());
    }

    #[test]
    fn test_each_check_reports_its_violation() {
        let base = get_empty_base_record();

        let mut r = base.clone();
        r.rollup_type = RollupType::Merge;
        assert_eq!(
            run_checks(&base, &r).into_first_failure(),
            Some(MergeInvariantViolation::RollupTypeMismatch)
        );

        let mut r = base.clone();
        r.rollup_subtree_height = 1;
        assert_eq!(
            run_checks(&base, &r).into_first_failure(),
            Some(MergeInvariantViolation::RollupHeightMismatch)
        );

        let mut r = base.clone();
        r.constants.merge_rollup_vk_hash = Fr::from(99u32);
        assert_eq!(
            run_checks(&base, &r).into_first_failure(),
            Some(MergeInvariantViolation::ConstantsMismatch)
        );

        let mut r = base.clone();
        r.start_private_data_tree_snapshot.next_available_leaf_index += 1;
        assert_eq!(
            run_checks(&base, &r).into_first_failure(),
            Some(MergeInvariantViolation::PrivateDataTreeDiscontinuity)
        );

        let mut r = base.clone();
        r.start_nullifier_tree_snapshot.root = Fr::from(1u32);
        assert_eq!(
            run_checks(&base, &r).into_first_failure(),
            Some(MergeInvariantViolation::NullifierTreeDiscontinuity)
        );

        let mut r = base.clone();
        r.start_contract_tree_snapshot.root = Fr::from(1u32);
        assert_eq!(
            run_checks(&base, &r).into_first_failure(),
            Some(MergeInvariantViolation::ContractTreeDiscontinuity)
        );
    }

    #[test]
    fn test_follow_on_is_directional() {
        // the left end has to match the right start, not the other way round
        let mut left = get_empty_base_record();
        let mut right = get_empty_base_record();
        left.start_private_data_tree_snapshot.root = Fr::from(5u32);
        right.end_private_data_tree_snapshot.root = Fr::from(6u32);

        assert!(!run_checks(&left, &right).failed());
        assert_eq!(
            run_checks(&right, &left).into_first_failure(),
            Some(MergeInvariantViolation::PrivateDataTreeDiscontinuity)
        );
    }

    #[test]
    fn test_public_data_root_is_not_checked() {
        let left = get_empty_base_record();
        let mut right = get_empty_base_record();
        right.start_public_data_tree_root = Fr::from(42u32);
        assert!(!run_checks(&left, &right).failed());
    }

    #[test]
    fn test_later_checks_still_run() {
        // type, height and contract tree all wrong, type wins
        let left = get_empty_base_record();
        let mut right = get_empty_base_record();
        right.rollup_type = RollupType::Merge;
        right.rollup_subtree_height = 4;
        right.start_contract_tree_snapshot.root = Fr::from(3u32);

        let sink = run_checks(&left, &right);
        assert!(sink.failed());
        assert_eq!(
            sink.first_failure(),
            Some(&MergeInvariantViolation::RollupTypeMismatch)
        );
    }
}
