//! Integer geometry helpers

pub mod bounds;
pub mod rotation;

pub use bounds::BlockBox;
pub use rotation::{Axis, Rotation};
