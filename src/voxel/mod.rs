//! Voxel data structures and operations

pub mod pos;
pub mod palette;
pub mod block;
pub mod store;
pub mod flood;
pub mod edit;

pub use pos::BlockPos;
pub use block::{BlockKind, BlockType};
pub use palette::{BlockCategory, PaletteEntry, DEFAULT_BLOCK_ID, PALETTE};
pub use store::{Dimensions, VoxelStore, MAX_Y, MIN_Y, WORLD_HEIGHT};
pub use flood::flood_fill;
