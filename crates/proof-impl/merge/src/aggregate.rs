//! Folds a whole batch of records into a single root record.
//!
//! The tree is strictly balanced, every level merges adjacent pairs of the
//! level below.  Pairs within a level don't depend on each other, so they can
//! be merged on a thread pool.  Output and error reporting are the same either
//! way.

use std::sync::mpsc;

use rollup_config::AggregatorConfig;
use rollup_state::prelude::*;
use threadpool::ThreadPool;
use tracing::*;

use crate::{errors::AggregateError, merge_records, MergeInvariantViolation};

type PairResult = (RollupPublicRecord, Option<MergeInvariantViolation>);

/// Merges `records` level by level until a single record remains.
///
/// The number of records must be a power of two.  A single record is returned
/// as is.  On failure the reported merge is the leftmost failing one at the
/// lowest failing level.
pub fn aggregate_records(
    records: Vec<RollupPublicRecord>,
    config: &AggregatorConfig,
) -> Result<RollupPublicRecord, AggregateError> {
    let count = records.len();
    if count == 0 {
        return Err(AggregateError::Empty);
    }

    if !count.is_power_of_two() {
        return Err(AggregateError::NotPowerOfTwo(count));
    }

    let levels = count.trailing_zeros();
    let root_height = records[0].rollup_subtree_height.saturating_add(levels);
    if root_height > config.max_subtree_height {
        return Err(AggregateError::TooTall {
            height: root_height,
            max: config.max_subtree_height,
        });
    }

    let pool = (config.worker_threads > 1 && count > 2)
        .then(|| ThreadPool::with_name("rollup-merge".to_owned(), config.worker_threads));

    info!(%count, %levels, %root_height, "aggregating rollup records");

    let mut level = records;
    let mut depth = 0;
    while level.len() > 1 {
        let results = match &pool {
            Some(pool) => merge_level_pooled(pool, level, depth)?,
            None => merge_level(level),
        };

        level = collect_level(results, depth)?;
        debug!(%depth, remaining = level.len(), "finished aggregation level");
        depth += 1;
    }

    // the loop always leaves exactly one record
    level.pop().ok_or(AggregateError::Empty)
}

fn merge_level(level: Vec<RollupPublicRecord>) -> Vec<PairResult> {
    level
        .chunks_exact(2)
        .map(|pair| merge_records(&pair[0], &pair[1]))
        .collect()
}

fn merge_level_pooled(
    pool: &ThreadPool,
    level: Vec<RollupPublicRecord>,
    depth: u32,
) -> Result<Vec<PairResult>, AggregateError> {
    let pairs = level.len() / 2;
    let (res_tx, res_rx) = mpsc::channel();

    let mut iter = level.into_iter();
    let mut index = 0;
    while let (Some(left), Some(right)) = (iter.next(), iter.next()) {
        let res_tx = res_tx.clone();
        pool.execute(move || {
            let res = merge_records(&left, &right);
            if res_tx.send((index, res)).is_err() {
                warn!(%index, "failed to send merge result");
            }
        });
        index += 1;
    }
    drop(res_tx);

    let mut slots: Vec<Option<PairResult>> = vec![None; pairs];
    for (index, res) in res_rx.iter() {
        slots[index] = Some(res);
    }

    slots
        .into_iter()
        .map(|slot| slot.ok_or(AggregateError::WorkerLost(depth)))
        .collect()
}

fn collect_level(
    results: Vec<PairResult>,
    depth: u32,
) -> Result<Vec<RollupPublicRecord>, AggregateError> {
    results
        .into_iter()
        .enumerate()
        .map(|(index, (record, failure))| match failure {
            Some(violation) => Err(AggregateError::Merge {
                level: depth,
                index,
                violation,
            }),
            None => Ok(record),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use rollup_primitives::field::Fr;
    use rollup_test_utils::rollup::{get_chained_base_records, get_empty_base_record};

    use super::*;
    use crate::calldata::hash_fold;

    fn config(worker_threads: usize) -> AggregatorConfig {
        AggregatorConfig {
            worker_threads,
            ..Default::default()
        }
    }

    #[test]
    fn test_empty_batch() {
        assert!(matches!(
            aggregate_records(vec![], &config(1)),
            Err(AggregateError::Empty)
        ));
    }

    #[test]
    fn test_unbalanced_batch() {
        let records = get_chained_base_records(3);
        assert!(matches!(
            aggregate_records(records, &config(1)),
            Err(AggregateError::NotPowerOfTwo(3))
        ));
    }

    #[test]
    fn test_single_record_passthrough() {
        let rec = get_empty_base_record();
        let out = aggregate_records(vec![rec.clone()], &config(1)).unwrap();
        assert_eq!(out, rec);
    }

    #[test]
    fn test_too_tall() {
        let records = get_chained_base_records(8);
        let config = AggregatorConfig {
            worker_threads: 1,
            max_subtree_height: 2,
        };
        assert!(matches!(
            aggregate_records(records, &config),
            Err(AggregateError::TooTall { height: 3, max: 2 })
        ));
    }

    #[test]
    fn test_chained_batch() {
        let records = get_chained_base_records(8);
        let out = aggregate_records(records.clone(), &config(1)).unwrap();

        assert_eq!(out.rollup_type, RollupType::Merge);
        assert_eq!(out.rollup_subtree_height, 3);
        assert_eq!(
            out.start_private_data_tree_snapshot,
            records[0].start_private_data_tree_snapshot
        );
        assert_eq!(
            out.end_nullifier_tree_snapshot,
            records[7].end_nullifier_tree_snapshot
        );

        // calldata root is the balanced fold of the leaves
        let mut hashes: Vec<_> = records.iter().map(|r| r.calldata_hash).collect();
        while hashes.len() > 1 {
            hashes = hashes
                .chunks_exact(2)
                .map(|p| hash_fold(&p[0], &p[1]))
                .collect();
        }
        assert_eq!(out.calldata_hash, hashes[0]);
    }

    #[test]
    fn test_pooled_matches_sequential() {
        let records = get_chained_base_records(16);
        let seq = aggregate_records(records.clone(), &config(1)).unwrap();
        let par = aggregate_records(records, &config(4)).unwrap();
        assert_eq!(seq, par);
    }

    #[test]
    fn test_reports_leftmost_failure() {
        let mut records = get_chained_base_records(8);
        // break the pairs at index 1 and 3 on the first level
        records[3].start_contract_tree_snapshot.root = Fr::from(1234u32);
        records[6].constants.public_kernel_vk_tree_root = Fr::from(1u32);

        for threads in [1, 4] {
            let err = aggregate_records(records.clone(), &config(threads)).unwrap_err();
            match err {
                AggregateError::Merge {
                    level,
                    index,
                    violation,
                } => {
                    assert_eq!(level, 0);
                    assert_eq!(index, 1);
                    assert_eq!(violation, MergeInvariantViolation::ContractTreeDiscontinuity);
                }
                e => panic!("unexpected error: {e}"),
            }
        }
    }
}
