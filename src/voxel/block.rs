//! Block type identifiers

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::core::error::Error;
use super::palette::{self, BlockCategory, PaletteEntry, DEFAULT_BLOCK_ID};

/// Namespace assumed for ids given without one
pub const DEFAULT_NAMESPACE: &str = "minecraft";

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
enum Repr {
    Palette(u16),
    Custom(Arc<str>),
}

/// A validated namespaced block id such as `minecraft:oak_planks`.
///
/// Built-in ids are stored as a palette index, so comparing two of them is
/// an integer compare. Anything else that passes validation is kept as a
/// shared custom string.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct BlockType(Repr);

/// Borrowed view of what a [`BlockType`] refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKind<'a> {
    Palette(&'static PaletteEntry),
    Custom(&'a str),
}

fn valid_namespace_char(c: char) -> bool {
    c.is_ascii_lowercase() || c.is_ascii_digit() || matches!(c, '_' | '-' | '.')
}

fn valid_path_char(c: char) -> bool {
    valid_namespace_char(c) || c == '/'
}

impl BlockType {
    /// Parse and validate an id. A bare path gets the `minecraft` namespace.
    ///
    /// Only plain `namespace:path` ids are accepted. Block-state suffixes
    /// such as `minecraft:oak_stairs[facing=north]` and NBT data are
    /// rejected, so exported commands always place the default state.
    pub fn parse(id: &str) -> Result<Self, Error> {
        let (namespace, path) = id.split_once(':').unwrap_or((DEFAULT_NAMESPACE, id));

        if namespace.is_empty()
            || path.is_empty()
            || !namespace.chars().all(valid_namespace_char)
            || !path.chars().all(valid_path_char)
        {
            return Err(Error::InvalidBlockId(id.to_string()));
        }

        let full = format!("{}:{}", namespace, path);
        Ok(match palette::lookup(&full) {
            Some(index) => BlockType(Repr::Palette(index)),
            None => BlockType(Repr::Custom(full.into())),
        })
    }

    /// The full namespaced id
    pub fn as_str(&self) -> &str {
        match &self.0 {
            Repr::Palette(index) => palette::PALETTE[*index as usize].id,
            Repr::Custom(id) => id,
        }
    }

    pub fn kind(&self) -> BlockKind<'_> {
        match &self.0 {
            Repr::Palette(index) => BlockKind::Palette(&palette::PALETTE[*index as usize]),
            Repr::Custom(id) => BlockKind::Custom(id),
        }
    }

    /// True for ids outside the built-in palette
    pub fn is_custom(&self) -> bool {
        matches!(self.0, Repr::Custom(_))
    }

    /// Palette category, None for custom ids
    pub fn category(&self) -> Option<BlockCategory> {
        match self.kind() {
            BlockKind::Palette(entry) => Some(entry.category),
            BlockKind::Custom(_) => None,
        }
    }

    pub fn namespace(&self) -> &str {
        self.as_str().split_once(':').map_or(DEFAULT_NAMESPACE, |(ns, _)| ns)
    }

    pub fn path(&self) -> &str {
        let id = self.as_str();
        id.split_once(':').map_or(id, |(_, path)| path)
    }
}

impl Default for BlockType {
    fn default() -> Self {
        let index = palette::lookup(DEFAULT_BLOCK_ID).unwrap_or(0);
        BlockType(Repr::Palette(index))
    }
}

impl From<&'static PaletteEntry> for BlockType {
    fn from(entry: &'static PaletteEntry) -> Self {
        let index = palette::lookup(entry.id).unwrap_or(0);
        BlockType(Repr::Palette(index))
    }
}

impl fmt::Display for BlockType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BlockType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BlockType::parse(s)
    }
}

impl Serialize for BlockType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for BlockType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let id = String::deserialize(deserializer)?;
        BlockType::parse(&id).map_err(serde::de::Error::custom)
    }
}
