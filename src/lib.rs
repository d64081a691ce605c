#![warn(missing_docs)]

//! Layered tile maps, a software frame buffer and a live tile editor for Macroquad.

mod catalog;
mod clock;
mod command;
mod config;
mod error;
mod geom;
mod layer;
mod loader {
    /// Tile catalog text format.
    pub mod catalog_text;
    /// Map text format.
    pub mod map_text;
}
mod map;
pub mod render;
pub mod scene;
mod session;
pub mod spatial;
mod tileset;

pub use catalog::{LayerIdx, Tile, TileCatalog, TileId, NO_LAYER};
pub use clock::FixedTimestep;
pub use command::{Command, CommandQueue};
pub use config::{DisplaySize, GameConfig};
pub use error::{Error, Result};
pub use geom::Rectangle;
pub use layer::TileLayer;
pub use loader::map_text::{MAX_MAP_CELLS, MAX_MAP_SIDE};
pub use map::TileMap;
pub use render::{Camera, CameraController, Renderer};
pub use session::Session;
pub use tileset::{pack_rgb, Pixel, Sprite, SpriteSheet};
