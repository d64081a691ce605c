//! Conversions between screen, world and grid space.

mod index;

pub use index::{grid_to_world, screen_to_grid, screen_to_world, world_to_grid, GridCoord};
