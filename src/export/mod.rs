//! Export of the voxel map as compact fill regions and command text

pub mod regions;
pub mod mcfunction;

pub use regions::{optimize_regions, FillRegion};
pub use mcfunction::{to_mcfunction, MAX_FILL_VOLUME};
