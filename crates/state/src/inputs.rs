//! Inputs to a merge rollup.

use std::io;

use arbitrary::Arbitrary;
use borsh::{BorshDeserialize, BorshSerialize};
use rollup_primitives::{field::Fr, wire};
use serde::{Deserialize, Serialize};

use crate::rollup::RollupPublicRecord;

/// Height of the tree of rollup verification keys.
pub const ROLLUP_VK_TREE_HEIGHT: usize = 8;

/// A child rollup's public outputs along with the proof material needed to
/// verify it.  The proof material is carried, not interpreted.
#[derive(Clone, Debug, Eq, PartialEq, Arbitrary, Serialize, Deserialize)]
pub struct PreviousRollupData {
    pub public_inputs: RollupPublicRecord,
    #[serde(with = "hex::serde")]
    pub proof: Vec<u8>,
    pub vk_index: u32,
    pub vk_sibling_path: [Fr; ROLLUP_VK_TREE_HEIGHT],
}

impl PreviousRollupData {
    /// Wraps a record with empty proof material.
    pub fn from_public_inputs(public_inputs: RollupPublicRecord) -> Self {
        Self {
            public_inputs,
            proof: Vec::new(),
            vk_index: 0,
            vk_sibling_path: [Fr::zero(); ROLLUP_VK_TREE_HEIGHT],
        }
    }
}

impl BorshSerialize for PreviousRollupData {
    fn serialize<W: io::Write>(&self, writer: &mut W) -> io::Result<()> {
        BorshSerialize::serialize(&self.public_inputs, writer)?;
        wire::write_bytes(writer, &self.proof)?;
        wire::write_u32(writer, self.vk_index)?;
        BorshSerialize::serialize(&self.vk_sibling_path, writer)
    }
}

impl BorshDeserialize for PreviousRollupData {
    fn deserialize_reader<R: io::Read>(reader: &mut R) -> io::Result<Self> {
        Ok(Self {
            public_inputs: RollupPublicRecord::deserialize_reader(reader)?,
            proof: wire::read_bytes(reader)?,
            vk_index: wire::read_u32(reader)?,
            vk_sibling_path: <[Fr; ROLLUP_VK_TREE_HEIGHT]>::deserialize_reader(reader)?,
        })
    }
}

/// Exactly two children, the chronologically earlier one first.
#[derive(
    Clone, Debug, Eq, PartialEq, Arbitrary, BorshSerialize, BorshDeserialize, Serialize, Deserialize,
)]
pub struct MergeRollupInputs {
    pub previous_rollup_data: [PreviousRollupData; 2],
}

impl MergeRollupInputs {
    pub fn new(left: PreviousRollupData, right: PreviousRollupData) -> Self {
        Self {
            previous_rollup_data: [left, right],
        }
    }

    pub fn from_records(left: RollupPublicRecord, right: RollupPublicRecord) -> Self {
        Self::new(
            PreviousRollupData::from_public_inputs(left),
            PreviousRollupData::from_public_inputs(right),
        )
    }

    pub fn left(&self) -> &RollupPublicRecord {
        &self.previous_rollup_data[0].public_inputs
    }

    pub fn right(&self) -> &RollupPublicRecord {
        &self.previous_rollup_data[1].public_inputs
    }

    pub fn left_mut(&mut self) -> &mut RollupPublicRecord {
        &mut self.previous_rollup_data[0].public_inputs
    }

    pub fn right_mut(&mut self) -> &mut RollupPublicRecord {
        &mut self.previous_rollup_data[1].public_inputs
    }
}
