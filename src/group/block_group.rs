//! Named block groups

use std::collections::BTreeMap;
use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use crate::math::BlockBox;
use crate::voxel::block::BlockType;
use crate::voxel::pos::BlockPos;

/// Group identifier, `group_<millis>_<n>` for generated ids
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GroupId(String);

impl GroupId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Id from the current time and a sequence number.
    /// Unique enough within one session only.
    pub fn generate(seq: usize) -> Self {
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis())
            .unwrap_or(0);
        Self(format!("group_{}_{}", millis, seq))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for GroupId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Origin is persisted as an `[x, y, z]` array rather than a key string
mod origin_array {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    use crate::voxel::pos::BlockPos;

    pub fn serialize<S: Serializer>(pos: &BlockPos, serializer: S) -> Result<S::Ok, S::Error> {
        pos.to_array().serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<BlockPos, D::Error> {
        <[i32; 3]>::deserialize(deserializer).map(BlockPos::from_array)
    }
}

/// A named copy of the blocks in a region, moved and rotated as one body.
///
/// `blocks` is a snapshot taken at creation and updated only by group
/// transforms, so it can drift from the store if cells are edited directly.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BlockGroup {
    pub id: GroupId,
    pub name: String,
    pub blocks: BTreeMap<BlockPos, BlockType>,
    /// Minimum corner of the selection at creation; rotation pivot
    #[serde(with = "origin_array")]
    pub origin: BlockPos,
}

impl BlockGroup {
    pub fn new(id: GroupId, name: impl Into<String>, blocks: BTreeMap<BlockPos, BlockType>, origin: BlockPos) -> Self {
        Self {
            id,
            name: name.into(),
            blocks,
            origin,
        }
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn contains(&self, pos: BlockPos) -> bool {
        self.blocks.contains_key(&pos)
    }

    /// Tight bounds of the member blocks
    pub fn bounds(&self) -> Option<BlockBox> {
        BlockBox::enclosing(self.blocks.keys().copied())
    }
}
