//! Deterministic rollup records for tests.

use rollup_primitives::{field::Fr, hash};
use rollup_proofimpl_merge::calldata::calldata_hash_from_preimage;
use rollup_state::prelude::*;

/// Number of kernel proofs a base rollup consumes.
pub const KERNELS_PER_BASE_ROLLUP: usize = 2;

/// Field elements each kernel contributes to the calldata leaf: commitments,
/// nullifiers, public data writes (slot, value), the contract leaf, contract
/// address and portal, then the two logs hashes.
pub const CALLDATA_FIELDS_PER_KERNEL: usize = 4 + 4 + 2 * 4 + 1 + 2 + 2 + 2;

/// Leaves each base leaf appends to the private data and nullifier trees.
const LEAVES_PER_BASE: u32 = 8;

/// Calldata preimage of a base rollup over empty kernels, all zero.
pub fn get_empty_calldata_leaf() -> Vec<u8> {
    vec![0u8; KERNELS_PER_BASE_ROLLUP * CALLDATA_FIELDS_PER_KERNEL * 32]
}

pub fn get_test_constants() -> RollupConstants {
    RollupConstants {
        start_tree_of_historic_private_data_tree_roots_snapshot: TreeSnapshot::new(
            tagged_fr("historic_private_data", 0),
            1,
        ),
        start_tree_of_historic_contract_tree_roots_snapshot: TreeSnapshot::new(
            tagged_fr("historic_contract", 0),
            1,
        ),
        private_kernel_vk_tree_root: tagged_fr("private_kernel_vk", 0),
        public_kernel_vk_tree_root: tagged_fr("public_kernel_vk", 0),
        base_rollup_vk_hash: tagged_fr("base_rollup_vk", 0),
        merge_rollup_vk_hash: tagged_fr("merge_rollup_vk", 0),
        global_variables: GlobalVariables {
            chain_id: Fr::from(1u32),
            version: Fr::from(1u32),
            block_number: Fr::from(1u32),
            timestamp: Fr::from(1_690_000_000u64),
        },
    }
}

/// A base leaf over empty kernels.  Its trees don't move, so any number of
/// copies chain onto each other.
pub fn get_empty_base_record() -> RollupPublicRecord {
    let mut rec = get_chained_base_record(0);
    rec.end_private_data_tree_snapshot = rec.start_private_data_tree_snapshot;
    rec.end_nullifier_tree_snapshot = rec.start_nullifier_tree_snapshot;
    rec.end_contract_tree_snapshot = rec.start_contract_tree_snapshot;
    rec.end_public_data_tree_root = rec.start_public_data_tree_root;
    rec.calldata_hash = calldata_hash_from_preimage(&get_empty_calldata_leaf());
    rec
}

/// Two empty base leaves, ready to merge.
pub fn get_empty_merge_rollup_inputs() -> MergeRollupInputs {
    MergeRollupInputs::from_records(get_empty_base_record(), get_empty_base_record())
}

/// The `idx`th of a run of base leaves that each pick up where the previous
/// one left off.
pub fn get_chained_base_record(idx: u32) -> RollupPublicRecord {
    let mut calldata = get_empty_calldata_leaf();
    calldata[..4].copy_from_slice(&idx.to_be_bytes());

    RollupPublicRecord {
        rollup_type: RollupType::Base,
        rollup_subtree_height: 0,
        constants: get_test_constants(),
        start_private_data_tree_snapshot: tree_at("private_data", idx, LEAVES_PER_BASE),
        end_private_data_tree_snapshot: tree_at("private_data", idx + 1, LEAVES_PER_BASE),
        start_nullifier_tree_snapshot: tree_at("nullifier", idx, LEAVES_PER_BASE),
        end_nullifier_tree_snapshot: tree_at("nullifier", idx + 1, LEAVES_PER_BASE),
        start_contract_tree_snapshot: tree_at("contract", idx, KERNELS_PER_BASE_ROLLUP as u32),
        end_contract_tree_snapshot: tree_at("contract", idx + 1, KERNELS_PER_BASE_ROLLUP as u32),
        start_public_data_tree_root: tagged_fr("public_data", idx),
        end_public_data_tree_root: tagged_fr("public_data", idx + 1),
        calldata_hash: calldata_hash_from_preimage(&calldata),
        end_aggregation_object: AggregationObject::default(),
    }
}

pub fn get_chained_base_records(n: u32) -> Vec<RollupPublicRecord> {
    (0..n).map(get_chained_base_record).collect()
}

fn tree_at(tag: &str, step: u32, leaves_per_step: u32) -> TreeSnapshot {
    TreeSnapshot::new(tagged_fr(tag, step), step * leaves_per_step)
}

fn tagged_fr(tag: &str, idx: u32) -> Fr {
    let mut buf = tag.as_bytes().to_vec();
    buf.extend_from_slice(&idx.to_be_bytes());
    Fr::from(hash::raw(&buf))
}
