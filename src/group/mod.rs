//! Block groups moved and rotated as rigid bodies

pub mod block_group;
pub mod manager;

pub use block_group::{BlockGroup, GroupId};
pub use manager::GroupManager;
