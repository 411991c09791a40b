mod error;
mod geometry;
pub mod placement;
pub mod transition;
pub mod ui;

pub use error::*;
pub use geometry::*;
pub use placement::*;
pub use transition::*;

pub use glam::{IVec2, Vec2};
