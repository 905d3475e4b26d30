//! Edit delta representation.

use std::collections::HashMap;

use crate::group::{BlockGroup, GroupId};
use crate::voxel::block::BlockType;
use crate::voxel::pos::BlockPos;
use crate::voxel::store::VoxelStore;

/// Value of one cell before and after an edit (None = empty)
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BlockChange {
    pub before: Option<BlockType>,
    pub after: Option<BlockType>,
}

/// Per-position before/after record for a multi-cell edit.
///
/// Recording the same position twice keeps the first `before` and the
/// last `after`, so a set always describes the net effect of the edit.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ChangeSet {
    changes: HashMap<BlockPos, BlockChange>,
}

impl ChangeSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a transition at a position
    pub fn record(&mut self, pos: BlockPos, before: Option<BlockType>, after: Option<BlockType>) {
        self.changes
            .entry(pos)
            .and_modify(|change| change.after = after.clone())
            .or_insert(BlockChange { before, after });
    }

    pub fn get(&self, pos: BlockPos) -> Option<&BlockChange> {
        self.changes.get(&pos)
    }

    pub fn len(&self) -> usize {
        self.changes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&BlockPos, &BlockChange)> {
        self.changes.iter()
    }

    /// Write every `after` value into the store
    pub fn apply(&self, store: &mut VoxelStore) {
        for (pos, change) in &self.changes {
            store.write(*pos, change.after.clone());
        }
    }

    /// Write every `before` value into the store
    pub fn revert(&self, store: &mut VoxelStore) {
        for (pos, change) in &self.changes {
            store.write(*pos, change.before.clone());
        }
    }
}

/// Group contents before and after a transform
#[derive(Clone, Debug, PartialEq)]
pub struct GroupUpdate {
    pub before: BlockGroup,
    pub after: BlockGroup,
}

/// A single recorded edit.
#[derive(Clone, Debug, PartialEq)]
pub enum HistoryAction {
    /// Single block placed. Undo empties the cell.
    Set {
        pos: BlockPos,
        block: BlockType,
    },
    /// Single block removed; `block` is the removed value
    Remove {
        pos: BlockPos,
        block: BlockType,
    },
    /// Fill, clear, flood fill or rotate
    Batch {
        changes: ChangeSet,
        /// Present for group rotations
        group: Option<GroupUpdate>,
    },
    /// Group created
    Group {
        id: GroupId,
        group: BlockGroup,
    },
    /// Group deleted; `group` is the removed group
    Ungroup {
        id: GroupId,
        group: BlockGroup,
    },
    /// Group translated
    MoveGroup {
        id: GroupId,
        /// Group as it was before the move
        group: BlockGroup,
        /// Group as it is after the move
        moved: BlockGroup,
        old_origin: BlockPos,
        new_origin: BlockPos,
        changes: ChangeSet,
    },
}

impl HistoryAction {
    /// Short label for logging
    pub fn label(&self) -> &'static str {
        match self {
            HistoryAction::Set { .. } => "set",
            HistoryAction::Remove { .. } => "remove",
            HistoryAction::Batch { .. } => "batch",
            HistoryAction::Group { .. } => "group",
            HistoryAction::Ungroup { .. } => "ungroup",
            HistoryAction::MoveGroup { .. } => "moveGroup",
        }
    }

    /// Number of cells this action touches
    pub fn cell_count(&self) -> usize {
        match self {
            HistoryAction::Set { .. } | HistoryAction::Remove { .. } => 1,
            HistoryAction::Batch { changes, .. } | HistoryAction::MoveGroup { changes, .. } => changes.len(),
            HistoryAction::Group { .. } | HistoryAction::Ungroup { .. } => 0,
        }
    }
}
