//! Integer block position

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::core::error::Error;
use crate::core::types::IVec3;

/// Integer grid position of a single block.
///
/// Ordering is lexicographic over (x, y, z), which is also the scan order
/// used by the region optimizer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BlockPos {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl BlockPos {
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    pub fn from_array(arr: [i32; 3]) -> Self {
        Self::new(arr[0], arr[1], arr[2])
    }

    pub fn to_array(self) -> [i32; 3] {
        [self.x, self.y, self.z]
    }

    pub fn to_ivec3(self) -> IVec3 {
        IVec3::new(self.x, self.y, self.z)
    }

    /// Translate by an offset, clamping each component to the i32 range
    pub fn offset(self, delta: IVec3) -> Self {
        Self::new(
            self.x.saturating_add(delta.x),
            self.y.saturating_add(delta.y),
            self.z.saturating_add(delta.z),
        )
    }

    /// Translate by an offset, None if any component leaves the i32 range
    pub fn checked_offset(self, delta: IVec3) -> Option<Self> {
        Some(Self::new(
            self.x.checked_add(delta.x)?,
            self.y.checked_add(delta.y)?,
            self.z.checked_add(delta.z)?,
        ))
    }

    /// The six face-adjacent neighbours. At the edge of the i32 range a
    /// neighbour repeats this position.
    pub fn neighbors(self) -> [BlockPos; 6] {
        [IVec3::X, IVec3::NEG_X, IVec3::Y, IVec3::NEG_Y, IVec3::Z, IVec3::NEG_Z]
            .map(|delta| self.offset(delta))
    }
}

impl From<IVec3> for BlockPos {
    fn from(v: IVec3) -> Self {
        Self::new(v.x, v.y, v.z)
    }
}

impl From<[i32; 3]> for BlockPos {
    fn from(arr: [i32; 3]) -> Self {
        Self::from_array(arr)
    }
}

/// Formats as the persisted key form `x,y,z`
impl fmt::Display for BlockPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{}", self.x, self.y, self.z)
    }
}

impl FromStr for BlockPos {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split(',');
        let mut next = || -> Result<i32, Error> {
            parts
                .next()
                .and_then(|p| p.parse::<i32>().ok())
                .ok_or_else(|| Error::InvalidPosition(s.to_string()))
        };
        let pos = BlockPos::new(next()?, next()?, next()?);
        if parts.next().is_some() {
            return Err(Error::InvalidPosition(s.to_string()));
        }
        Ok(pos)
    }
}

impl Serialize for BlockPos {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for BlockPos {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let key = String::deserialize(deserializer)?;
        key.parse().map_err(serde::de::Error::custom)
    }
}
