//! Inclusive integer block box

use crate::core::types::I64Vec3;
use crate::voxel::pos::BlockPos;

/// Axis-aligned box of blocks, inclusive on both corners
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BlockBox {
    pub min: BlockPos,
    pub max: BlockPos,
}

impl BlockBox {
    /// Create a box from its min and max corners
    pub fn new(min: BlockPos, max: BlockPos) -> Self {
        debug_assert!(min.x <= max.x && min.y <= max.y && min.z <= max.z);
        Self { min, max }
    }

    /// Create a box from two corners given in any order
    pub fn from_corners(a: BlockPos, b: BlockPos) -> Self {
        Self {
            min: BlockPos::new(a.x.min(b.x), a.y.min(b.y), a.z.min(b.z)),
            max: BlockPos::new(a.x.max(b.x), a.y.max(b.y), a.z.max(b.z)),
        }
    }

    /// Box containing a single block
    pub fn single(pos: BlockPos) -> Self {
        Self { min: pos, max: pos }
    }

    /// Number of blocks along each axis. Wide enough for any i32 corners.
    pub fn size(&self) -> I64Vec3 {
        let min = I64Vec3::new(self.min.x as i64, self.min.y as i64, self.min.z as i64);
        let max = I64Vec3::new(self.max.x as i64, self.max.y as i64, self.max.z as i64);
        max - min + I64Vec3::ONE
    }

    /// Total number of blocks in the box, saturating at `u64::MAX`
    pub fn volume(&self) -> u64 {
        let size = self.size();
        (size.x as u64)
            .saturating_mul(size.y as u64)
            .saturating_mul(size.z as u64)
    }

    pub fn contains(&self, pos: BlockPos) -> bool {
        pos.x >= self.min.x && pos.x <= self.max.x &&
        pos.y >= self.min.y && pos.y <= self.max.y &&
        pos.z >= self.min.z && pos.z <= self.max.z
    }

    /// Overlap of two boxes, if any
    pub fn intersection(&self, other: &BlockBox) -> Option<BlockBox> {
        let min = BlockPos::new(
            self.min.x.max(other.min.x),
            self.min.y.max(other.min.y),
            self.min.z.max(other.min.z),
        );
        let max = BlockPos::new(
            self.max.x.min(other.max.x),
            self.max.y.min(other.max.y),
            self.max.z.min(other.max.z),
        );
        if min.x > max.x || min.y > max.y || min.z > max.z {
            None
        } else {
            Some(BlockBox { min, max })
        }
    }

    /// Restrict the Y range, returning None if nothing remains
    pub fn clamp_y(&self, min_y: i32, max_y: i32) -> Option<BlockBox> {
        let lo = self.min.y.max(min_y);
        let hi = self.max.y.min(max_y);
        if lo > hi {
            return None;
        }
        Some(BlockBox {
            min: BlockPos::new(self.min.x, lo, self.min.z),
            max: BlockPos::new(self.max.x, hi, self.max.z),
        })
    }

    /// Grow the box to include a position
    pub fn expand(&mut self, pos: BlockPos) {
        self.min = BlockPos::new(self.min.x.min(pos.x), self.min.y.min(pos.y), self.min.z.min(pos.z));
        self.max = BlockPos::new(self.max.x.max(pos.x), self.max.y.max(pos.y), self.max.z.max(pos.z));
    }

    /// Smallest box containing every position, or None for an empty iterator
    pub fn enclosing(positions: impl IntoIterator<Item = BlockPos>) -> Option<BlockBox> {
        let mut iter = positions.into_iter();
        let mut bounds = BlockBox::single(iter.next()?);
        for pos in iter {
            bounds.expand(pos);
        }
        Some(bounds)
    }

    /// Iterate every position, x outermost and z innermost
    pub fn positions(&self) -> impl Iterator<Item = BlockPos> + use<> {
        let BlockBox { min, max } = *self;
        (min.x..=max.x).flat_map(move |x| {
            (min.y..=max.y).flat_map(move |y| {
                (min.z..=max.z).map(move |z| BlockPos::new(x, y, z))
            })
        })
    }

    /// Split in two halves along the longest axis.
    /// Returns None for a single block.
    pub fn split_longest(&self) -> Option<(BlockBox, BlockBox)> {
        let size = self.size();
        if size == I64Vec3::ONE {
            return None;
        }
        let (mut first_max, mut second_min) = (self.max, self.min);
        if size.x >= size.y && size.x >= size.z {
            let mid = (self.min.x as i64 + size.x / 2 - 1) as i32;
            first_max.x = mid;
            second_min.x = mid + 1;
        } else if size.y >= size.z {
            let mid = (self.min.y as i64 + size.y / 2 - 1) as i32;
            first_max.y = mid;
            second_min.y = mid + 1;
        } else {
            let mid = (self.min.z as i64 + size.z / 2 - 1) as i32;
            first_max.z = mid;
            second_min.z = mid + 1;
        }
        Some((
            BlockBox { min: self.min, max: first_max },
            BlockBox { min: second_min, max: self.max },
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_unordered_corners() {
        let b = BlockBox::from_corners(BlockPos::new(5, -3, 2), BlockPos::new(1, 4, 0));
        assert_eq!(b.min, BlockPos::new(1, -3, 0));
        assert_eq!(b.max, BlockPos::new(5, 4, 2));
        assert_eq!(b.size(), I64Vec3::new(5, 8, 3));
        assert_eq!(b.volume(), 120);
    }

    #[test]
    fn test_full_range_volume_saturates() {
        let b = BlockBox::from_corners(BlockPos::new(i32::MIN, i32::MIN, i32::MIN), BlockPos::new(i32::MAX, i32::MAX, i32::MAX));
        assert_eq!(b.size(), I64Vec3::splat(1 << 32));
        assert_eq!(b.volume(), u64::MAX);

        let wide = BlockBox::from_corners(BlockPos::new(0, -64, 0), BlockPos::new(i32::MAX, 319, 0));
        assert_eq!(wide.volume(), (i32::MAX as u64 + 1) * 384);
    }

    #[test]
    fn test_intersection() {
        let a = BlockBox::from_corners(BlockPos::new(0, 0, 0), BlockPos::new(4, 4, 4));
        let b = BlockBox::from_corners(BlockPos::new(3, 3, 3), BlockPos::new(8, 8, 8));
        let c = BlockBox::from_corners(BlockPos::new(5, 5, 5), BlockPos::new(8, 8, 8));
        assert_eq!(
            a.intersection(&b),
            Some(BlockBox::from_corners(BlockPos::new(3, 3, 3), BlockPos::new(4, 4, 4)))
        );
        assert_eq!(a.intersection(&c), None);
    }

    #[test]
    fn test_positions_scan_order() {
        let b = BlockBox::from_corners(BlockPos::new(0, 0, 0), BlockPos::new(1, 1, 1));
        let all: Vec<_> = b.positions().collect();
        assert_eq!(all.len(), 8);
        assert_eq!(all[0], BlockPos::new(0, 0, 0));
        assert_eq!(all[1], BlockPos::new(0, 0, 1));
        assert_eq!(all[2], BlockPos::new(0, 1, 0));
        assert_eq!(all[4], BlockPos::new(1, 0, 0));
    }

    #[test]
    fn test_split_longest() {
        let b = BlockBox::from_corners(BlockPos::new(0, 0, 0), BlockPos::new(9, 1, 1));
        let (lo, hi) = b.split_longest().unwrap();
        assert_eq!(lo.max.x, 4);
        assert_eq!(hi.min.x, 5);
        assert_eq!(lo.volume() + hi.volume(), b.volume());
        assert!(BlockBox::single(BlockPos::new(1, 1, 1)).split_longest().is_none());
    }

    #[test]
    fn test_clamp_y() {
        let b = BlockBox::from_corners(BlockPos::new(0, -100, 0), BlockPos::new(0, 400, 0));
        let clamped = b.clamp_y(-64, 319).unwrap();
        assert_eq!(clamped.min.y, -64);
        assert_eq!(clamped.max.y, 319);
        assert!(b.clamp_y(500, 600).is_none());
    }
}
