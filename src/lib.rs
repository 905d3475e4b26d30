//! Blockplan - voxel build planning for Minecraft structures

pub mod core;
pub mod math;
pub mod voxel;
pub mod group;
pub mod export;
pub mod project;

pub use project::{Project, ProjectConfig};
