//! Project state, configuration and persistence

pub mod config;
pub mod editor;
pub mod snapshot;
#[allow(clippy::module_inception)]
pub mod project;

pub use config::ProjectConfig;
pub use editor::EditorState;
pub use snapshot::{ProjectSnapshot, FORMAT_VERSION};
pub use project::Project;
