//! Editor-facing state refreshed by the project after each change

use crate::voxel::block::BlockType;
use crate::voxel::pos::BlockPos;

/// Selection, tool and undo flags surfaced to the UI layer
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EditorState {
    /// First corner of a pending range selection
    pub selection_start: Option<BlockPos>,
    /// Second corner of a pending range selection
    pub selection_end: Option<BlockPos>,
    /// Y level the editor is working on
    pub current_layer: i32,
    /// Block placed by the editing tools
    pub selected_block: BlockType,
    pub can_undo: bool,
    pub can_redo: bool,
}

impl EditorState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Both corners, if the selection is complete
    pub fn selection(&self) -> Option<(BlockPos, BlockPos)> {
        self.selection_start.zip(self.selection_end)
    }

    pub fn clear_selection(&mut self) {
        self.selection_start = None;
        self.selection_end = None;
    }

    /// Clear selection and return to layer 0, keeping the selected block
    pub fn reset(&mut self) {
        self.clear_selection();
        self.current_layer = 0;
        self.can_undo = false;
        self.can_redo = false;
    }
}
