//! Append-only undo/redo log of edits.

use crate::group::GroupManager;
use crate::voxel::store::VoxelStore;
use super::delta::HistoryAction;

/// Ordered edit log with a cursor.
///
/// `applied` actions from the front are in effect; everything after them
/// is the redo tail, discarded by the next [`History::record`]. Not
/// persisted: loading or initializing a project starts a fresh log.
#[derive(Debug, Default)]
pub struct History {
    actions: Vec<HistoryAction>,
    applied: usize,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop the redo tail and append an action
    pub fn record(&mut self, action: HistoryAction) {
        self.actions.truncate(self.applied);
        log::debug!("History: recording {} ({} cells)", action.label(), action.cell_count());
        self.actions.push(action);
        self.applied = self.actions.len();
    }

    /// Index of the most recently applied action, -1 before the first
    pub fn cursor(&self) -> isize {
        self.applied as isize - 1
    }

    pub fn can_undo(&self) -> bool {
        self.applied > 0
    }

    pub fn can_redo(&self) -> bool {
        self.applied < self.actions.len()
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    pub fn actions(&self) -> &[HistoryAction] {
        &self.actions
    }

    pub fn clear(&mut self) {
        self.actions.clear();
        self.applied = 0;
    }

    /// Revert the action at the cursor. Returns false if nothing to undo.
    pub fn undo(&mut self, store: &mut VoxelStore, groups: &mut GroupManager) -> bool {
        if !self.can_undo() {
            return false;
        }
        self.applied -= 1;
        let action = &self.actions[self.applied];

        match action {
            // Set does not remember what it overwrote, so undo always empties the cell
            HistoryAction::Set { pos, .. } => {
                store.write(*pos, None);
            }
            HistoryAction::Remove { pos, block } => {
                store.write(*pos, Some(block.clone()));
            }
            HistoryAction::Batch { changes, group } => {
                changes.revert(store);
                if let Some(update) = group {
                    groups.restore(update.before.clone());
                }
            }
            HistoryAction::Group { id, .. } => {
                groups.detach(id);
            }
            HistoryAction::Ungroup { group, .. } => {
                groups.restore(group.clone());
            }
            HistoryAction::MoveGroup { group, changes, .. } => {
                changes.revert(store);
                groups.restore(group.clone());
            }
        }

        log::debug!("History: undid {}, cursor now {}", action.label(), self.cursor());
        true
    }

    /// Re-apply the action after the cursor. Returns false if nothing to redo.
    pub fn redo(&mut self, store: &mut VoxelStore, groups: &mut GroupManager) -> bool {
        if !self.can_redo() {
            return false;
        }
        let action = &self.actions[self.applied];
        self.applied += 1;

        match action {
            HistoryAction::Set { pos, block } => {
                store.write(*pos, Some(block.clone()));
            }
            HistoryAction::Remove { pos, .. } => {
                store.write(*pos, None);
            }
            HistoryAction::Batch { changes, group } => {
                changes.apply(store);
                if let Some(update) = group {
                    groups.restore(update.after.clone());
                }
            }
            HistoryAction::Group { group, .. } => {
                groups.restore(group.clone());
            }
            HistoryAction::Ungroup { id, .. } => {
                groups.detach(id);
            }
            HistoryAction::MoveGroup { moved, changes, .. } => {
                changes.apply(store);
                groups.restore(moved.clone());
            }
        }

        log::debug!("History: redid {}, cursor now {}", action.label(), self.cursor());
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::voxel::block::BlockType;
    use crate::voxel::pos::BlockPos;
    use crate::voxel::store::{Dimensions, WORLD_HEIGHT};

    fn block(id: &str) -> BlockType {
        BlockType::parse(id).unwrap()
    }

    fn setup() -> (VoxelStore, GroupManager, History) {
        (
            VoxelStore::new(Dimensions::new(32, WORLD_HEIGHT, 32)),
            GroupManager::new(),
            History::new(),
        )
    }

    #[test]
    fn test_cursor_starts_before_first() {
        let history = History::new();
        assert_eq!(history.cursor(), -1);
        assert!(!history.can_undo());
        assert!(!history.can_redo());
    }

    #[test]
    fn test_undo_redo_empty_is_noop() {
        let (mut store, mut groups, mut history) = setup();
        assert!(!history.undo(&mut store, &mut groups));
        assert!(!history.redo(&mut store, &mut groups));
        assert_eq!(history.cursor(), -1);
    }

    #[test]
    fn test_remove_roundtrip() {
        let (mut store, mut groups, mut history) = setup();
        let pos = BlockPos::new(4, 10, 4);

        store.set_block(&mut history, pos, block("glass"));
        store.remove_block(&mut history, pos);
        assert!(store.get(pos).is_none());

        assert!(history.undo(&mut store, &mut groups));
        assert_eq!(store.get(pos), Some(&block("glass")));

        assert!(history.redo(&mut store, &mut groups));
        assert!(store.get(pos).is_none());
    }

    #[test]
    fn test_set_undo_empties_overwritten_cell() {
        let (mut store, mut groups, mut history) = setup();
        let pos = BlockPos::new(1, 1, 1);

        store.set_block(&mut history, pos, block("stone"));
        store.set_block(&mut history, pos, block("dirt"));
        history.undo(&mut store, &mut groups);

        // The stone that was overwritten is not brought back
        assert!(store.get(pos).is_none());
    }

    #[test]
    fn test_fill_undo_restores_empty() {
        let (mut store, mut groups, mut history) = setup();
        let start = BlockPos::new(0, 0, 0);
        let end = BlockPos::new(3, 2, 3);

        store.fill_area(&mut history, start, end, block("bricks"));
        assert_eq!(store.len(), 48);

        history.undo(&mut store, &mut groups);
        assert!(store.is_empty());
    }

    #[test]
    fn test_batch_redo_restores_fill() {
        let (mut store, mut groups, mut history) = setup();
        store.set_block(&mut history, BlockPos::new(1, 0, 1), block("glass"));
        store.fill_area(&mut history, BlockPos::new(0, 0, 0), BlockPos::new(2, 0, 2), block("sand"));
        let filled = store.voxels().clone();

        history.undo(&mut store, &mut groups);
        assert_eq!(store.get(BlockPos::new(1, 0, 1)), Some(&block("glass")));
        assert_eq!(store.len(), 1);

        history.redo(&mut store, &mut groups);
        assert_eq!(store.voxels(), &filled);
    }

    #[test]
    fn test_multi_step_batch_redo_chain() {
        let (mut store, mut groups, mut history) = setup();
        let a = BlockPos::new(0, 0, 0);
        let b = BlockPos::new(4, 4, 4);

        store.fill_area(&mut history, a, b, block("stone"));
        store.clear_area(&mut history, BlockPos::new(1, 1, 1), BlockPos::new(3, 3, 3));
        store.fill_area(&mut history, BlockPos::new(2, 2, 2), BlockPos::new(2, 2, 2), block("gold_block"));
        let final_state = store.voxels().clone();

        while history.undo(&mut store, &mut groups) {}
        assert!(store.is_empty());

        while history.redo(&mut store, &mut groups) {}
        assert_eq!(store.voxels(), &final_state);
    }

    #[test]
    fn test_record_truncates_redo_tail() {
        let (mut store, mut groups, mut history) = setup();
        store.set_block(&mut history, BlockPos::new(0, 0, 0), block("stone"));
        store.set_block(&mut history, BlockPos::new(1, 0, 0), block("stone"));
        history.undo(&mut store, &mut groups);
        assert!(history.can_redo());

        store.set_block(&mut history, BlockPos::new(2, 0, 0), block("dirt"));
        assert!(!history.can_redo());
        assert_eq!(history.len(), 2);
        assert_eq!(history.cursor(), 1);
    }
}
