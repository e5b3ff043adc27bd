//! Builds the parent record from two children.

use rollup_state::prelude::*;

use crate::calldata::hash_fold;

/// Combines two children into their parent record.
///
/// This doesn't validate anything, see [`crate::checks`] for that.  Constants
/// are taken from the left child since the checks require both to match.
///
/// The parent height is the left child's height plus one, saturating at
/// `u32::MAX`, so a child already at `u32::MAX` yields a parent of the same
/// height.
pub fn combine_records(left: &RollupPublicRecord, right: &RollupPublicRecord) -> RollupPublicRecord {
    RollupPublicRecord {
        rollup_type: RollupType::Merge,
        rollup_subtree_height: left.rollup_subtree_height.saturating_add(1),
        constants: left.constants,

        start_private_data_tree_snapshot: left.start_private_data_tree_snapshot,
        end_private_data_tree_snapshot: right.end_private_data_tree_snapshot,

        start_nullifier_tree_snapshot: left.start_nullifier_tree_snapshot,
        end_nullifier_tree_snapshot: right.end_nullifier_tree_snapshot,

        start_contract_tree_snapshot: left.start_contract_tree_snapshot,
        end_contract_tree_snapshot: right.end_contract_tree_snapshot,

        start_public_data_tree_root: left.start_public_data_tree_root,
        end_public_data_tree_root: right.end_public_data_tree_root,

        calldata_hash: hash_fold(&left.calldata_hash, &right.calldata_hash),

        // TODO verify both children's proofs recursively and combine their
        // aggregation objects, until then this just forwards the right one
        end_aggregation_object: right.end_aggregation_object.clone(),
    }
}
