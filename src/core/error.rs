//! Error types for the build planner

use thiserror::Error;

/// Main error type for the planner
#[derive(Debug, Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid project file: {0}")]
    InvalidProject(String),

    #[error("Invalid position key: {0}")]
    InvalidPosition(String),

    #[error("Invalid block id: {0}")]
    InvalidBlockId(String),

    #[error("Invalid axis: {0}")]
    InvalidAxis(String),

    #[error("Invalid rotation angle: {0}")]
    InvalidAngle(f64),

    #[error("Group {0} not found")]
    UnknownGroup(String),

    #[error("No blocks found in selection")]
    EmptySelection,

    #[error("Flood fill region exceeds limit of {0} cells")]
    FloodFillLimit(usize),
}
