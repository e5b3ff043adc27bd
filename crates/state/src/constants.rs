//! Protocol-wide parameters that every proof merged together must agree on.

use arbitrary::Arbitrary;
use borsh::{BorshDeserialize, BorshSerialize};
use rollup_primitives::field::Fr;
use serde::{Deserialize, Serialize};

use crate::snapshot::TreeSnapshot;

/// Per-block globals.
#[derive(
    Copy,
    Clone,
    Debug,
    Default,
    Eq,
    PartialEq,
    Hash,
    Arbitrary,
    BorshSerialize,
    BorshDeserialize,
    Serialize,
    Deserialize,
)]
pub struct GlobalVariables {
    pub chain_id: Fr,
    pub version: Fr,
    pub block_number: Fr,
    pub timestamp: Fr,
}

/// Constants carried unchanged through the whole aggregation tree.
///
/// Consumers should only ever compare this as a whole.
#[derive(
    Copy,
    Clone,
    Debug,
    Default,
    Eq,
    PartialEq,
    Hash,
    Arbitrary,
    BorshSerialize,
    BorshDeserialize,
    Serialize,
    Deserialize,
)]
pub struct RollupConstants {
    pub start_tree_of_historic_private_data_tree_roots_snapshot: TreeSnapshot,
    pub start_tree_of_historic_contract_tree_roots_snapshot: TreeSnapshot,
    pub private_kernel_vk_tree_root: Fr,
    pub public_kernel_vk_tree_root: Fr,
    pub base_rollup_vk_hash: Fr,
    pub merge_rollup_vk_hash: Fr,
    pub global_variables: GlobalVariables,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constants_encoded_len() {
        // 2 snapshots, 4 roots/hashes, 4 globals
        let enc = borsh::to_vec(&RollupConstants::default()).unwrap();
        assert_eq!(enc.len(), 2 * 36 + 4 * 32 + 4 * 32);
    }

    #[test]
    fn test_constants_deep_equality() {
        let a = RollupConstants::default();
        let mut b = a;
        assert_eq!(a, b);

        b.global_variables.timestamp = Fr::from(1u32);
        assert_ne!(a, b);
    }
}
