//! Voxel edit history.
//!
//! Every mutation records a [`HistoryAction`] into the [`History`] log,
//! which replays them for undo/redo.

pub mod delta;
pub mod log;

pub use delta::{BlockChange, ChangeSet, GroupUpdate, HistoryAction};
pub use log::History;
