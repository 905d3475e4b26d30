//! Greedy box merging of the voxel map into homogeneous fill regions.
//!
//! Only the tight bounding box of the stored voxels is indexed. Small boxes
//! use a dense Z-Y-X array of one `u32` per cell; very sparse builds
//! spanning a large box fall back to hash lookups.

use std::collections::HashMap;

use crate::math::BlockBox;
use crate::voxel::block::BlockType;
use crate::voxel::pos::BlockPos;
use crate::voxel::store::Dimensions;

/// Largest bounding box (in cells) indexed with a dense array
pub const DENSE_CELL_LIMIT: u64 = 1 << 24;

/// Axis-aligned box of a single block type, inclusive on both corners
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FillRegion {
    pub start: BlockPos,
    pub end: BlockPos,
    pub block: BlockType,
}

impl FillRegion {
    pub fn bounds(&self) -> BlockBox {
        BlockBox::new(self.start, self.end)
    }

    pub fn volume(&self) -> u64 {
        self.bounds().volume()
    }
}

/// Compact the voxel map into fill regions.
///
/// Cells are visited x outer, y middle, z inner. Each unclaimed cell grows
/// a box along X, then Y (whole X span must match), then Z (whole X-Y plane
/// must match). Output follows the scan order of each region's min corner
/// and is identical for identical input. Voxels outside `dimensions` are
/// ignored.
pub fn optimize_regions(voxels: &HashMap<BlockPos, BlockType>, dimensions: Dimensions) -> Vec<FillRegion> {
    // Intern block types so cell comparison is an integer compare
    let mut palette: Vec<&BlockType> = Vec::new();
    let mut ids: HashMap<&BlockType, u32> = HashMap::new();
    let mut seeds: Vec<(BlockPos, u32)> = Vec::with_capacity(voxels.len());

    for (pos, block) in voxels {
        if !dimensions.contains(*pos) {
            log::debug!("Skipping out-of-bounds voxel [{}] during optimization", pos);
            continue;
        }
        let id = *ids.entry(block).or_insert_with(|| {
            palette.push(block);
            (palette.len() - 1) as u32
        });
        seeds.push((*pos, id));
    }
    seeds.sort_unstable_by_key(|(pos, _)| *pos);

    let Some(bounds) = BlockBox::enclosing(seeds.iter().map(|(pos, _)| *pos)) else {
        return Vec::new();
    };

    let mut grid = CellGrid::new(bounds, &seeds);
    let mut regions = Vec::new();

    for &(start, id) in &seeds {
        if grid.is_claimed(start) {
            continue;
        }
        let end = grow(&grid, &bounds, start, id);
        for pos in BlockBox::new(start, end).positions() {
            grid.claim(pos);
        }
        regions.push(FillRegion {
            start,
            end,
            block: palette[id as usize].clone(),
        });
    }

    log::debug!(
        "Optimized {} voxels into {} regions ({} block types)",
        seeds.len(),
        regions.len(),
        palette.len()
    );
    regions
}

/// Maximal box end for a seed: X run, then Y layers, then Z slabs
fn grow(grid: &CellGrid, bounds: &BlockBox, start: BlockPos, id: u32) -> BlockPos {
    let mut end = start;

    while end.x < bounds.max.x && grid.is_free(BlockPos::new(end.x + 1, start.y, start.z), id) {
        end.x += 1;
    }

    while end.y < bounds.max.y {
        let y = end.y + 1;
        if !(start.x..=end.x).all(|x| grid.is_free(BlockPos::new(x, y, start.z), id)) {
            break;
        }
        end.y = y;
    }

    while end.z < bounds.max.z {
        let z = end.z + 1;
        let plane_free = (start.x..=end.x)
            .all(|x| (start.y..=end.y).all(|y| grid.is_free(BlockPos::new(x, y, z), id)));
        if !plane_free {
            break;
        }
        end.z = z;
    }

    end
}

/// Cell value for an empty cell
const EMPTY: u32 = u32::MAX;
/// Cell value for a cell already taken by an emitted region
const CLAIMED: u32 = u32::MAX - 1;

/// Interned block id per cell over the occupied bounding box.
///
/// Claiming a cell overwrites its id with [`CLAIMED`], so each cell is a
/// single `u32` in either layout.
enum CellGrid {
    Dense {
        bounds: BlockBox,
        cells: Vec<u32>,
    },
    Sparse {
        cells: HashMap<BlockPos, u32>,
    },
}

impl CellGrid {
    fn new(bounds: BlockBox, seeds: &[(BlockPos, u32)]) -> Self {
        let volume = bounds.volume();
        if volume <= DENSE_CELL_LIMIT {
            let mut cells = vec![EMPTY; volume as usize];
            for &(pos, id) in seeds {
                cells[dense_index(&bounds, pos)] = id;
            }
            CellGrid::Dense { bounds, cells }
        } else {
            log::debug!("Bounding box of {} cells too large for dense grid, using sparse lookup", volume);
            CellGrid::Sparse {
                cells: seeds.iter().copied().collect(),
            }
        }
    }

    fn cell(&self, pos: BlockPos) -> u32 {
        match self {
            CellGrid::Dense { bounds, cells } => cells[dense_index(bounds, pos)],
            CellGrid::Sparse { cells } => cells.get(&pos).copied().unwrap_or(EMPTY),
        }
    }

    /// Holds block `id` and is not yet part of a region
    fn is_free(&self, pos: BlockPos, id: u32) -> bool {
        self.cell(pos) == id
    }

    fn is_claimed(&self, pos: BlockPos) -> bool {
        self.cell(pos) == CLAIMED
    }

    fn claim(&mut self, pos: BlockPos) {
        match self {
            CellGrid::Dense { bounds, cells } => cells[dense_index(bounds, pos)] = CLAIMED,
            CellGrid::Sparse { cells } => {
                cells.insert(pos, CLAIMED);
            }
        }
    }
}

/// Index into a dense array laid out Z-Y-X (x fastest)
fn dense_index(bounds: &BlockBox, pos: BlockPos) -> usize {
    let size = bounds.size();
    let x = (pos.x - bounds.min.x) as usize;
    let y = (pos.y - bounds.min.y) as usize;
    let z = (pos.z - bounds.min.z) as usize;
    z * size.y as usize * size.x as usize + y * size.x as usize + x
}
