pub use crate::aggregation::AggregationObject;
pub use crate::constants::{GlobalVariables, RollupConstants};
pub use crate::inputs::{MergeRollupInputs, PreviousRollupData, ROLLUP_VK_TREE_HEIGHT};
pub use crate::rollup::{RollupPublicRecord, RollupType};
pub use crate::snapshot::TreeSnapshot;
