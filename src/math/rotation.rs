//! Rigid rotation of integer positions about a pivot

use std::fmt;
use std::str::FromStr;

use crate::core::error::Error;
use crate::core::types::IVec3;
use crate::voxel::pos::BlockPos;

/// Principal rotation axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Axis::X => "x",
            Axis::Y => "y",
            Axis::Z => "z",
        };
        f.write_str(name)
    }
}

impl FromStr for Axis {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "x" | "X" => Ok(Axis::X),
            "y" | "Y" => Ok(Axis::Y),
            "z" | "Z" => Ok(Axis::Z),
            _ => Err(Error::InvalidAxis(s.to_string())),
        }
    }
}

/// Rotation by a fixed angle around one axis.
///
/// Each rotated coordinate is rounded to the nearest integer (halves away
/// from zero). Multiples of 90 degrees are exact.
#[derive(Debug, Clone, Copy)]
pub struct Rotation {
    axis: Axis,
    cos: f64,
    sin: f64,
}

impl Rotation {
    pub fn new(axis: Axis, degrees: f64) -> Self {
        let radians = degrees.to_radians();
        Self {
            axis,
            cos: radians.cos(),
            sin: radians.sin(),
        }
    }

    pub fn axis(&self) -> Axis {
        self.axis
    }

    /// Rotate a vector relative to the pivot
    pub fn apply(&self, rel: IVec3) -> IVec3 {
        let [x, y, z] = self.turn([rel.x as f64, rel.y as f64, rel.z as f64]);
        IVec3::new(x.round() as i32, y.round() as i32, z.round() as i32)
    }

    /// Rotate a position about a pivot. None if the result leaves the i32 range.
    pub fn rotate_about(&self, pos: BlockPos, pivot: BlockPos) -> Option<BlockPos> {
        let rel = [
            pos.x as i64 - pivot.x as i64,
            pos.y as i64 - pivot.y as i64,
            pos.z as i64 - pivot.z as i64,
        ];
        let [x, y, z] = self.turn(rel.map(|v| v as f64));
        let place = |base: i32, v: f64| i32::try_from(base as i64 + v.round() as i64).ok();
        Some(BlockPos::new(place(pivot.x, x)?, place(pivot.y, y)?, place(pivot.z, z)?))
    }

    fn turn(&self, [x, y, z]: [f64; 3]) -> [f64; 3] {
        let (c, s) = (self.cos, self.sin);
        match self.axis {
            Axis::X => [x, y * c - z * s, y * s + z * c],
            Axis::Y => [x * c + z * s, y, -x * s + z * c],
            Axis::Z => [x * c - y * s, x * s + y * c, z],
        }
    }
}
