//! Group creation and rigid transforms

use std::collections::{BTreeMap, HashMap};

use crate::core::error::Error;
use crate::core::types::{IVec3, Result};
use crate::math::{Axis, BlockBox, Rotation};
use crate::voxel::block::BlockType;
use crate::voxel::edit::{ChangeSet, GroupUpdate, History, HistoryAction};
use crate::voxel::pos::BlockPos;
use crate::voxel::store::{VoxelStore, MAX_Y, MIN_Y};
use super::block_group::{BlockGroup, GroupId};

/// Owns the project's groups and the active group id.
///
/// Operations that touch voxels take the store and history explicitly.
#[derive(Debug, Default)]
pub struct GroupManager {
    groups: HashMap<GroupId, BlockGroup>,
    active: Option<GroupId>,
}

impl GroupManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: &GroupId) -> Option<&BlockGroup> {
        self.groups.get(id)
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&GroupId, &BlockGroup)> {
        self.groups.iter()
    }

    pub fn groups(&self) -> &HashMap<GroupId, BlockGroup> {
        &self.groups
    }

    pub fn active(&self) -> Option<&GroupId> {
        self.active.as_ref()
    }

    pub fn active_group(&self) -> Option<&BlockGroup> {
        self.active.as_ref().and_then(|id| self.groups.get(id))
    }

    /// Set or clear the active group. Unknown ids are ignored.
    pub fn set_active(&mut self, id: Option<GroupId>) -> bool {
        match id {
            Some(id) if !self.groups.contains_key(&id) => {
                log::warn!("Cannot activate unknown group {}", id);
                false
            }
            id => {
                self.active = id;
                true
            }
        }
    }

    /// Capture every stored block in the box spanned by two corners.
    ///
    /// Y is clamped to the world height, X and Z are not. The new group
    /// becomes active. Fails with [`Error::EmptySelection`] if the box holds
    /// no blocks.
    pub fn create_group(
        &mut self,
        store: &VoxelStore,
        history: &mut History,
        start: BlockPos,
        end: BlockPos,
        name: &str,
    ) -> Result<GroupId> {
        let area = BlockBox::from_corners(start, end).clamp_y(MIN_Y, MAX_Y);
        let blocks = match area {
            Some(area) => capture(store, &area),
            None => BTreeMap::new(),
        };
        let Some(area) = area.filter(|_| !blocks.is_empty()) else {
            log::warn!("No blocks found in selection for group creation");
            return Err(Error::EmptySelection);
        };

        let id = self.next_id();
        let group = BlockGroup::new(id.clone(), name, blocks, area.min);
        log::info!("Created group '{}' with {} blocks", name, group.len());

        history.record(HistoryAction::Group { id: id.clone(), group: group.clone() });
        self.groups.insert(id.clone(), group);
        self.active = Some(id.clone());
        Ok(id)
    }

    /// Delete a group. Its blocks stay in the store.
    pub fn remove_group(&mut self, history: &mut History, id: &GroupId) -> Result<()> {
        let Some(group) = self.groups.remove(id) else {
            log::error!("Group {} not found", id);
            return Err(Error::UnknownGroup(id.to_string()));
        };

        log::info!("Removed group {}", group.name);
        if self.active.as_ref() == Some(id) {
            self.active = None;
        }
        history.record(HistoryAction::Ungroup { id: id.clone(), group });
        Ok(())
    }

    /// Translate a group. Members that would leave the buildable bounds are dropped.
    pub fn move_group(
        &mut self,
        store: &mut VoxelStore,
        history: &mut History,
        id: &GroupId,
        offset: IVec3,
    ) -> Result<()> {
        let Some(group) = self.groups.get_mut(id) else {
            log::error!("Group {} not found", id);
            return Err(Error::UnknownGroup(id.to_string()));
        };
        if offset == IVec3::ZERO {
            return Ok(());
        }

        let before = group.clone();
        let (changes, blocks) = relocate(store, &before, |pos| pos.checked_offset(offset));
        group.blocks = blocks;
        group.origin = before.origin.offset(offset);

        log::info!("Moved group {} by [{}, {}, {}]", group.name, offset.x, offset.y, offset.z);
        history.record(HistoryAction::MoveGroup {
            id: id.clone(),
            old_origin: before.origin,
            new_origin: group.origin,
            moved: group.clone(),
            group: before,
            changes,
        });
        Ok(())
    }

    /// Rotate a group about its origin. Members that would leave the
    /// buildable bounds are dropped. Recorded as a batch.
    pub fn rotate_group(
        &mut self,
        store: &mut VoxelStore,
        history: &mut History,
        id: &GroupId,
        axis: Axis,
        degrees: f64,
    ) -> Result<()> {
        let Some(group) = self.groups.get_mut(id) else {
            log::error!("Group {} not found", id);
            return Err(Error::UnknownGroup(id.to_string()));
        };
        if !degrees.is_finite() {
            log::warn!("Cannot rotate group {} by {} degrees", group.name, degrees);
            return Err(Error::InvalidAngle(degrees));
        }
        if degrees % 360.0 == 0.0 {
            return Ok(());
        }

        let rotation = Rotation::new(axis, degrees);
        let before = group.clone();
        let (changes, blocks) = relocate(store, &before, |pos| rotation.rotate_about(pos, before.origin));
        group.blocks = blocks;

        log::info!("Rotated group {} around {} axis by {} degrees", group.name, axis, degrees);
        history.record(HistoryAction::Batch {
            changes,
            group: Some(GroupUpdate { before, after: group.clone() }),
        });
        Ok(())
    }

    /// Insert or replace a group without recording history
    pub(crate) fn restore(&mut self, group: BlockGroup) {
        self.groups.insert(group.id.clone(), group);
    }

    /// Remove a group without recording history
    pub(crate) fn detach(&mut self, id: &GroupId) -> Option<BlockGroup> {
        if self.active.as_ref() == Some(id) {
            self.active = None;
        }
        self.groups.remove(id)
    }

    /// Replace every group and clear the active one
    pub(crate) fn reset(&mut self, groups: HashMap<GroupId, BlockGroup>) {
        self.groups = groups;
        self.active = None;
    }

    fn next_id(&self) -> GroupId {
        let mut seq = self.groups.len();
        loop {
            let id = GroupId::generate(seq);
            if !self.groups.contains_key(&id) {
                return id;
            }
            seq += 1;
        }
    }
}

/// Blocks stored inside an area, scanning whichever is smaller
fn capture(store: &VoxelStore, area: &BlockBox) -> BTreeMap<BlockPos, BlockType> {
    if area.volume() > store.len() as u64 {
        store
            .iter()
            .filter(|(pos, _)| area.contains(**pos))
            .map(|(pos, block)| (*pos, block.clone()))
            .collect()
    } else {
        area.positions()
            .filter_map(|pos| store.get(pos).map(|block| (pos, block.clone())))
            .collect()
    }
}

/// Lift every member out of the store, then place each one at `map(pos)`.
/// A `None` destination is treated like one outside the bounds.
///
/// Returns the combined change set (vacated and overwritten cells) and the
/// group's new block map.
fn relocate(
    store: &mut VoxelStore,
    group: &BlockGroup,
    map: impl Fn(BlockPos) -> Option<BlockPos>,
) -> (ChangeSet, BTreeMap<BlockPos, BlockType>) {
    let mut changes = ChangeSet::new();

    for pos in group.blocks.keys() {
        let before = store.write(*pos, None);
        changes.record(*pos, before, None);
    }

    let mut blocks = BTreeMap::new();
    for (pos, block) in &group.blocks {
        let Some(dest) = map(*pos).filter(|dest| store.in_bounds(*dest)) else {
            log::warn!("Block from [{}] lands out of project bounds, dropped", pos);
            continue;
        };
        let before = store.write(dest, Some(block.clone()));
        changes.record(dest, before, Some(block.clone()));
        blocks.insert(dest, block.clone());
    }

    (changes, blocks)
}
