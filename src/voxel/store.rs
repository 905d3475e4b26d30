//! Sparse voxel store with bounds validation

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::math::BlockBox;
use super::block::BlockType;
use super::edit::{ChangeSet, History, HistoryAction};
use super::pos::BlockPos;

/// Lowest buildable Y level
pub const MIN_Y: i32 = -64;
/// Highest buildable Y level
pub const MAX_Y: i32 = 319;
/// Number of buildable Y levels (384)
pub const WORLD_HEIGHT: u32 = (MAX_Y - MIN_Y + 1) as u32;

/// Project dimensions, persisted as `[width, height, depth]`.
///
/// Width and depth bound X and Z. Height is display-only: Y is always
/// bounded by [`MIN_Y`]..=[`MAX_Y`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "[u32; 3]", into = "[u32; 3]")]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
    pub depth: u32,
}

impl Dimensions {
    pub const fn new(width: u32, height: u32, depth: u32) -> Self {
        Self { width, height, depth }
    }

    /// Same footprint with the display height forced to the world height
    pub fn with_world_height(self) -> Self {
        Self { height: WORLD_HEIGHT, ..self }
    }

    /// Buildable box, None when width or depth is zero
    pub fn bounds(&self) -> Option<BlockBox> {
        if self.width == 0 || self.depth == 0 {
            return None;
        }
        let max_x = i32::try_from(self.width - 1).unwrap_or(i32::MAX);
        let max_z = i32::try_from(self.depth - 1).unwrap_or(i32::MAX);
        Some(BlockBox::new(
            BlockPos::new(0, MIN_Y, 0),
            BlockPos::new(max_x, MAX_Y, max_z),
        ))
    }

    pub fn contains(&self, pos: BlockPos) -> bool {
        pos.y >= MIN_Y && pos.y <= MAX_Y &&
        pos.x >= 0 && (pos.x as i64) < self.width as i64 &&
        pos.z >= 0 && (pos.z as i64) < self.depth as i64
    }
}

impl Default for Dimensions {
    fn default() -> Self {
        Self::new(1000, WORLD_HEIGHT, 1000)
    }
}

impl From<[u32; 3]> for Dimensions {
    fn from(arr: [u32; 3]) -> Self {
        Self::new(arr[0], arr[1], arr[2])
    }
}

impl From<Dimensions> for [u32; 3] {
    fn from(d: Dimensions) -> Self {
        [d.width, d.height, d.depth]
    }
}

/// Sparse map from block position to block type.
///
/// Every stored key lies inside the dimensions. Mutators take the history
/// log they record into.
#[derive(Clone, Debug, Default)]
pub struct VoxelStore {
    voxels: HashMap<BlockPos, BlockType>,
    dimensions: Dimensions,
}

impl VoxelStore {
    /// Create an empty store
    pub fn new(dimensions: Dimensions) -> Self {
        Self {
            voxels: HashMap::new(),
            dimensions,
        }
    }

    pub fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    pub fn in_bounds(&self, pos: BlockPos) -> bool {
        self.dimensions.contains(pos)
    }

    /// Block at a position. Empty and out-of-bounds both give None.
    pub fn get(&self, pos: BlockPos) -> Option<&BlockType> {
        if !self.in_bounds(pos) {
            return None;
        }
        self.voxels.get(&pos)
    }

    /// Number of non-empty voxels
    pub fn len(&self) -> usize {
        self.voxels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.voxels.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&BlockPos, &BlockType)> {
        self.voxels.iter()
    }

    pub fn voxels(&self) -> &HashMap<BlockPos, BlockType> {
        &self.voxels
    }

    /// Place a block. Returns false when out of bounds or already that type.
    pub fn set_block(&mut self, history: &mut History, pos: BlockPos, block: BlockType) -> bool {
        if !self.in_bounds(pos) {
            log::warn!("Block placement out of bounds: [{}]", pos);
            return false;
        }
        if self.voxels.get(&pos) == Some(&block) {
            log::debug!("Skipping duplicate block at [{}]", pos);
            return false;
        }

        log::debug!("Setting block at [{}], type: {}", pos, block);
        history.record(HistoryAction::Set { pos, block: block.clone() });
        self.voxels.insert(pos, block);
        true
    }

    /// Remove a block. Returns false when out of bounds or already empty.
    pub fn remove_block(&mut self, history: &mut History, pos: BlockPos) -> bool {
        if !self.in_bounds(pos) {
            log::debug!("Block removal out of bounds: [{}]", pos);
            return false;
        }
        let Some(block) = self.voxels.get(&pos).cloned() else {
            return false;
        };

        history.record(HistoryAction::Remove { pos, block });
        self.voxels.remove(&pos);
        true
    }

    /// Clamp the box spanned by two corners to the buildable bounds
    pub fn clamp_area(&self, start: BlockPos, end: BlockPos) -> Option<BlockBox> {
        self.dimensions
            .bounds()?
            .intersection(&BlockBox::from_corners(start, end))
    }

    /// Fill the box spanned by two corners. Returns the number of cells written.
    pub fn fill_area(
        &mut self,
        history: &mut History,
        start: BlockPos,
        end: BlockPos,
        block: BlockType,
    ) -> usize {
        let Some(area) = self.clamp_area(start, end) else {
            log::warn!("Fill area [{}]..[{}] lies outside the project", start, end);
            return 0;
        };

        let mut changes = ChangeSet::new();
        for pos in area.positions() {
            let before = self.voxels.insert(pos, block.clone());
            changes.record(pos, before, Some(block.clone()));
        }

        let count = changes.len();
        log::debug!("Filled {} cells with {}", count, block);
        history.record(HistoryAction::Batch { changes, group: None });
        count
    }

    /// Empty the box spanned by two corners. Returns the number of blocks removed.
    pub fn clear_area(&mut self, history: &mut History, start: BlockPos, end: BlockPos) -> usize {
        let Some(area) = self.clamp_area(start, end) else {
            return 0;
        };

        let mut changes = ChangeSet::new();
        if area.volume() > self.voxels.len() as u64 {
            let mut hits: Vec<BlockPos> = self.voxels.keys().copied().filter(|p| area.contains(*p)).collect();
            hits.sort();
            for pos in hits {
                let before = self.voxels.remove(&pos);
                changes.record(pos, before, None);
            }
        } else {
            for pos in area.positions() {
                if let Some(before) = self.voxels.remove(&pos) {
                    changes.record(pos, Some(before), None);
                }
            }
        }

        if changes.is_empty() {
            return 0;
        }
        let count = changes.len();
        history.record(HistoryAction::Batch { changes, group: None });
        count
    }

    /// Write a cell without bounds checks or history. Used for replay.
    pub(crate) fn write(&mut self, pos: BlockPos, block: Option<BlockType>) -> Option<BlockType> {
        match block {
            Some(block) => self.voxels.insert(pos, block),
            None => self.voxels.remove(&pos),
        }
    }

    /// Replace all contents
    pub(crate) fn reset(&mut self, dimensions: Dimensions, voxels: HashMap<BlockPos, BlockType>) {
        self.dimensions = dimensions;
        self.voxels = voxels;
    }
}
