//! Public outputs of a base or merge rollup proof.

use std::io;

use arbitrary::Arbitrary;
use borsh::{BorshDeserialize, BorshSerialize};
use num_enum::{IntoPrimitive, TryFromPrimitive};
use rollup_primitives::{field::Fr, wire};
use serde::{Deserialize, Serialize};

use crate::{aggregation::AggregationObject, constants::RollupConstants, snapshot::TreeSnapshot};

/// Which kind of rollup circuit produced a record.
#[derive(
    Copy,
    Clone,
    Debug,
    Eq,
    PartialEq,
    Hash,
    Arbitrary,
    IntoPrimitive,
    TryFromPrimitive,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum RollupType {
    /// Leaf produced directly from transactions.
    Base = 0,
    /// Internal node produced by merging two siblings.
    Merge = 1,
}

impl BorshSerialize for RollupType {
    fn serialize<W: io::Write>(&self, writer: &mut W) -> io::Result<()> {
        wire::write_u32_word(writer, u8::from(*self) as u32)
    }
}

impl BorshDeserialize for RollupType {
    fn deserialize_reader<R: io::Read>(reader: &mut R) -> io::Result<Self> {
        let raw = wire::read_u32_word(reader)?;
        u8::try_from(raw)
            .ok()
            .and_then(|v| RollupType::try_from(v).ok())
            .ok_or_else(|| {
                io::Error::new(
                    io::ErrorKind::InvalidData,
                    format!("unknown rollup type {raw}"),
                )
            })
    }
}

/// Everything a base or merge rollup proof exposes publicly.
///
/// The start/end pairs describe the state of each tree before and after the
/// transactions covered by this record were applied.
#[derive(Clone, Debug, Eq, PartialEq, Hash, Arbitrary, Serialize, Deserialize)]
pub struct RollupPublicRecord {
    pub rollup_type: RollupType,
    /// Number of merge levels folded beneath this record, 0 for a base leaf.
    pub rollup_subtree_height: u32,
    pub constants: RollupConstants,

    pub start_private_data_tree_snapshot: TreeSnapshot,
    pub end_private_data_tree_snapshot: TreeSnapshot,

    pub start_nullifier_tree_snapshot: TreeSnapshot,
    pub end_nullifier_tree_snapshot: TreeSnapshot,

    pub start_contract_tree_snapshot: TreeSnapshot,
    pub end_contract_tree_snapshot: TreeSnapshot,

    pub start_public_data_tree_root: Fr,
    pub end_public_data_tree_root: Fr,

    /// High 128 bits in the first element, low 128 bits in the second.
    pub calldata_hash: [Fr; 2],

    pub end_aggregation_object: AggregationObject,
}

impl BorshSerialize for RollupPublicRecord {
    fn serialize<W: io::Write>(&self, writer: &mut W) -> io::Result<()> {
        BorshSerialize::serialize(&self.rollup_type, writer)?;
        wire::write_u32_word(writer, self.rollup_subtree_height)?;
        BorshSerialize::serialize(&self.constants, writer)?;
        BorshSerialize::serialize(&self.start_private_data_tree_snapshot, writer)?;
        BorshSerialize::serialize(&self.end_private_data_tree_snapshot, writer)?;
        BorshSerialize::serialize(&self.start_nullifier_tree_snapshot, writer)?;
        BorshSerialize::serialize(&self.end_nullifier_tree_snapshot, writer)?;
        BorshSerialize::serialize(&self.start_contract_tree_snapshot, writer)?;
        BorshSerialize::serialize(&self.end_contract_tree_snapshot, writer)?;
        BorshSerialize::serialize(&self.start_public_data_tree_root, writer)?;
        BorshSerialize::serialize(&self.end_public_data_tree_root, writer)?;
        BorshSerialize::serialize(&self.calldata_hash, writer)?;
        BorshSerialize::serialize(&self.end_aggregation_object, writer)
    }
}

impl BorshDeserialize for RollupPublicRecord {
    fn deserialize_reader<R: io::Read>(reader: &mut R) -> io::Result<Self> {
        Ok(Self {
            rollup_type: RollupType::deserialize_reader(reader)?,
            rollup_subtree_height: wire::read_u32_word(reader)?,
            constants: RollupConstants::deserialize_reader(reader)?,
            start_private_data_tree_snapshot: TreeSnapshot::deserialize_reader(reader)?,
            end_private_data_tree_snapshot: TreeSnapshot::deserialize_reader(reader)?,
            start_nullifier_tree_snapshot: TreeSnapshot::deserialize_reader(reader)?,
            end_nullifier_tree_snapshot: TreeSnapshot::deserialize_reader(reader)?,
            start_contract_tree_snapshot: TreeSnapshot::deserialize_reader(reader)?,
            end_contract_tree_snapshot: TreeSnapshot::deserialize_reader(reader)?,
            start_public_data_tree_root: Fr::deserialize_reader(reader)?,
            end_public_data_tree_root: Fr::deserialize_reader(reader)?,
            calldata_hash: <[Fr; 2]>::deserialize_reader(reader)?,
            end_aggregation_object: AggregationObject::deserialize_reader(reader)?,
        })
    }
}
