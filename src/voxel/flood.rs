//! Bucket fill over face-connected cells

use std::collections::{HashSet, VecDeque};

use crate::core::error::Error;
use crate::core::types::Result;
use super::block::BlockType;
use super::edit::{ChangeSet, History, HistoryAction};
use super::pos::BlockPos;
use super::store::VoxelStore;

/// Replace the face-connected region sharing the start cell's value.
///
/// The region (including an empty one) is collected first; if it grows past
/// `limit` cells nothing is changed and [`Error::FloodFillLimit`] is
/// returned. Otherwise the whole region is written as a single batch.
/// Returns the number of cells replaced.
pub fn flood_fill(
    store: &mut VoxelStore,
    history: &mut History,
    start: BlockPos,
    replacement: BlockType,
    limit: usize,
) -> Result<usize> {
    if !store.in_bounds(start) {
        return Ok(0);
    }
    let target = store.get(start).cloned();
    if target.as_ref() == Some(&replacement) {
        return Ok(0);
    }

    let region = collect_region(store, start, target.as_ref(), limit)?;

    let mut changes = ChangeSet::new();
    for pos in region {
        let before = store.write(pos, Some(replacement.clone()));
        changes.record(pos, before, Some(replacement.clone()));
    }

    let count = changes.len();
    log::debug!("Flood fill from [{}] replaced {} cells with {}", start, count, replacement);
    history.record(HistoryAction::Batch { changes, group: None });
    Ok(count)
}

fn collect_region(
    store: &VoxelStore,
    start: BlockPos,
    target: Option<&BlockType>,
    limit: usize,
) -> Result<Vec<BlockPos>> {
    let mut queue = VecDeque::from([start]);
    let mut visited = HashSet::from([start]);
    let mut region = Vec::new();

    while let Some(pos) = queue.pop_front() {
        region.push(pos);
        if region.len() > limit {
            log::warn!("Flood fill from [{}] exceeds {} cells, aborting", start, limit);
            return Err(Error::FloodFillLimit(limit));
        }

        for next in pos.neighbors() {
            if store.in_bounds(next) && store.get(next) == target && visited.insert(next) {
                queue.push_back(next);
            }
        }
    }

    Ok(region)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::group::GroupManager;
    use crate::voxel::store::{Dimensions, WORLD_HEIGHT};

    fn block(id: &str) -> BlockType {
        BlockType::parse(id).unwrap()
    }

    #[test]
    fn test_replaces_connected_only() {
        let mut store = VoxelStore::new(Dimensions::new(16, WORLD_HEIGHT, 16));
        let mut history = History::new();
        // Two separate rows of stone
        store.fill_area(&mut history, BlockPos::new(0, 0, 0), BlockPos::new(3, 0, 0), block("stone"));
        store.fill_area(&mut history, BlockPos::new(0, 0, 2), BlockPos::new(3, 0, 2), block("stone"));

        let count = flood_fill(&mut store, &mut history, BlockPos::new(1, 0, 0), block("glass"), 1000).unwrap();
        assert_eq!(count, 4);
        assert_eq!(store.get(BlockPos::new(3, 0, 0)), Some(&block("glass")));
        assert_eq!(store.get(BlockPos::new(3, 0, 2)), Some(&block("stone")));
    }

    #[test]
    fn test_single_undo_entry() {
        let mut store = VoxelStore::new(Dimensions::new(16, WORLD_HEIGHT, 16));
        let mut groups = GroupManager::new();
        let mut history = History::new();
        store.fill_area(&mut history, BlockPos::new(0, 0, 0), BlockPos::new(2, 2, 2), block("dirt"));
        flood_fill(&mut store, &mut history, BlockPos::new(0, 0, 0), block("sand"), 1000).unwrap();
        assert_eq!(history.len(), 2);

        history.undo(&mut store, &mut groups);
        assert!(store.iter().all(|(_, b)| *b == block("dirt")));
    }

    #[test]
    fn test_limit_aborts_without_change() {
        let mut store = VoxelStore::new(Dimensions::new(16, WORLD_HEIGHT, 16));
        let mut history = History::new();
        // Flooding open air is bounded only by the limit
        let err = flood_fill(&mut store, &mut history, BlockPos::new(5, 5, 5), block("water"), 100);
        assert!(matches!(err, Err(Error::FloodFillLimit(100))));
        assert!(store.is_empty());
        assert!(history.is_empty());
    }

    #[test]
    fn test_same_type_is_noop() {
        let mut store = VoxelStore::new(Dimensions::new(4, WORLD_HEIGHT, 4));
        let mut history = History::new();
        store.set_block(&mut history, BlockPos::new(0, 0, 0), block("stone"));
        let count = flood_fill(&mut store, &mut history, BlockPos::new(0, 0, 0), block("stone"), 10).unwrap();
        assert_eq!(count, 0);
        assert_eq!(history.len(), 1);
    }

    #[test]
    fn test_out_of_bounds_start() {
        let mut store = VoxelStore::new(Dimensions::new(4, WORLD_HEIGHT, 4));
        let mut history = History::new();
        let count = flood_fill(&mut store, &mut history, BlockPos::new(-1, 0, 0), block("stone"), 10).unwrap();
        assert_eq!(count, 0);
    }
}
