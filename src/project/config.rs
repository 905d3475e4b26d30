//! Project configuration

use crate::voxel::store::Dimensions;

/// Configuration for a new project
#[derive(Clone, Debug, PartialEq)]
pub struct ProjectConfig {
    /// Initial dimensions; height is display-only
    pub dimensions: Dimensions,
    /// Name given to groups created without one
    pub default_group_name: String,
    /// Most cells a single flood fill may replace
    pub flood_fill_limit: usize,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            dimensions: Dimensions::default(),
            default_group_name: "Group".to_string(),
            flood_fill_limit: 32768,
        }
    }
}

impl ProjectConfig {
    pub fn with_dimensions(mut self, dimensions: Dimensions) -> Self {
        self.dimensions = dimensions;
        self
    }
}
