//! Persisted project snapshot (JSON)

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::core::error::Error;
use crate::core::types::Result;
use crate::group::{BlockGroup, GroupId, GroupManager};
use crate::voxel::block::BlockType;
use crate::voxel::pos::BlockPos;
use crate::voxel::store::{Dimensions, VoxelStore};

/// Format version written by [`ProjectSnapshot::capture`]
pub const FORMAT_VERSION: &str = "1.0.0";

fn default_version() -> String {
    FORMAT_VERSION.to_string()
}

/// Complete saved state. History is never part of it.
///
/// Maps are ordered so the same project always serializes to the same text.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProjectSnapshot {
    #[serde(default = "default_version")]
    pub version: String,
    pub dimensions: Dimensions,
    pub voxels: BTreeMap<BlockPos, BlockType>,
    /// Absent in older files
    #[serde(default)]
    pub groups: BTreeMap<GroupId, BlockGroup>,
}

/// Validated contents of a snapshot, ready to swap into a project
pub(crate) struct LoadedState {
    pub dimensions: Dimensions,
    pub voxels: HashMap<BlockPos, BlockType>,
    pub groups: HashMap<GroupId, BlockGroup>,
}

impl ProjectSnapshot {
    pub fn capture(store: &VoxelStore, groups: &GroupManager) -> Self {
        Self {
            version: FORMAT_VERSION.to_string(),
            dimensions: store.dimensions(),
            voxels: store.iter().map(|(pos, block)| (*pos, block.clone())).collect(),
            groups: groups.iter().map(|(id, group)| (id.clone(), group.clone())).collect(),
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse snapshot text. `dimensions` and `voxels` must both be present.
    pub fn from_json(data: &str) -> Result<Self> {
        let value: serde_json::Value = serde_json::from_str(data)?;
        let Some(object) = value.as_object() else {
            return Err(Error::InvalidProject("snapshot is not a JSON object".to_string()));
        };
        for field in ["dimensions", "voxels"] {
            if object.get(field).is_none_or(|v| v.is_null()) {
                return Err(Error::InvalidProject(format!("missing field `{}`", field)));
            }
        }
        Ok(serde_json::from_value(value)?)
    }

    /// Check dimensions and drop anything the store could not hold
    pub(crate) fn into_state(self) -> Result<LoadedState> {
        let dimensions = self.dimensions;
        if dimensions.bounds().is_none() {
            return Err(Error::InvalidProject(format!(
                "dimensions [{}, {}, {}] have zero width or depth",
                dimensions.width, dimensions.height, dimensions.depth
            )));
        }
        if self.version != FORMAT_VERSION {
            log::warn!("Loading project version {} (expected {})", self.version, FORMAT_VERSION);
        }

        let total = self.voxels.len();
        let voxels: HashMap<_, _> = self
            .voxels
            .into_iter()
            .filter(|(pos, _)| dimensions.contains(*pos))
            .collect();
        if voxels.len() < total {
            log::warn!("Dropped {} voxels outside project bounds", total - voxels.len());
        }

        let groups = self
            .groups
            .into_iter()
            .map(|(key, mut group)| {
                if group.id != key {
                    log::warn!("Group key {} does not match id {}, using key", key, group.id);
                    group.id = key.clone();
                }
                (key, group)
            })
            .collect();

        Ok(LoadedState { dimensions, voxels, groups })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::voxel::edit::History;
    use crate::voxel::store::WORLD_HEIGHT;

    #[test]
    fn test_document_shape() {
        let mut store = VoxelStore::new(Dimensions::new(10, WORLD_HEIGHT, 12));
        let mut history = History::new();
        store.set_block(&mut history, BlockPos::new(1, -2, 3), BlockType::parse("stone").unwrap());

        let snapshot = ProjectSnapshot::capture(&store, &GroupManager::new());
        let value: serde_json::Value = serde_json::from_str(&snapshot.to_json().unwrap()).unwrap();
        assert_eq!(value["version"], "1.0.0");
        assert_eq!(value["dimensions"], serde_json::json!([10, 384, 12]));
        assert_eq!(value["voxels"]["1,-2,3"], "minecraft:stone");
        assert!(value["groups"].as_object().unwrap().is_empty());
    }

    #[test]
    fn test_missing_fields_rejected() {
        for data in [
            r#"{"version":"1.0.0","voxels":{}}"#,
            r#"{"version":"1.0.0","dimensions":[4,384,4]}"#,
            r#"{"dimensions":null,"voxels":{}}"#,
            r#"[1,2,3]"#,
        ] {
            assert!(matches!(ProjectSnapshot::from_json(data), Err(Error::InvalidProject(_))), "{}", data);
        }
    }

    #[test]
    fn test_older_file_without_groups() {
        let snapshot = ProjectSnapshot::from_json(r#"{"dimensions":[4,384,4],"voxels":{"0,0,0":"minecraft:dirt"}}"#).unwrap();
        assert_eq!(snapshot.version, FORMAT_VERSION);
        assert!(snapshot.groups.is_empty());
        assert_eq!(snapshot.voxels.len(), 1);
    }

    #[test]
    fn test_bad_key_rejected() {
        let result = ProjectSnapshot::from_json(r#"{"dimensions":[4,384,4],"voxels":{"0,0":"minecraft:dirt"}}"#);
        assert!(matches!(result, Err(Error::Json(_))));
    }

    #[test]
    fn test_into_state_drops_out_of_bounds() {
        let snapshot = ProjectSnapshot::from_json(
            r#"{"dimensions":[4,100,4],"voxels":{"0,0,0":"minecraft:dirt","9,0,0":"minecraft:dirt","0,-65,0":"minecraft:dirt"}}"#,
        )
        .unwrap();
        let state = snapshot.into_state().unwrap();
        assert_eq!(state.voxels.len(), 1);
        assert_eq!(state.dimensions.height, 100);
    }

    #[test]
    fn test_zero_width_rejected() {
        let snapshot = ProjectSnapshot::from_json(r#"{"dimensions":[0,384,4],"voxels":{}}"#).unwrap();
        assert!(matches!(snapshot.into_state(), Err(Error::InvalidProject(_))));
    }

    #[test]
    fn test_group_key_wins() {
        let snapshot = ProjectSnapshot::from_json(
            r#"{"dimensions":[4,384,4],"voxels":{},"groups":{"a":{"id":"b","name":"G","blocks":{},"origin":[0,0,0]}}}"#,
        )
        .unwrap();
        let state = snapshot.into_state().unwrap();
        assert_eq!(state.groups[&GroupId::new("a")].id, GroupId::new("a"));
    }
}
