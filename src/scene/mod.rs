//! Objects living in the scene next to the tile map.
//!
//! Every object exposes the same three capabilities; the set of object kinds
//! is closed and dispatched through [`SceneNode`].

mod palette;
mod player;

pub use palette::Palette;
pub use player::Player;

use crate::command::Command;
use crate::geom::Rectangle;
use crate::render::{Camera, Renderer};

/// What an object may read while updating.
#[derive(Debug, Clone, Copy)]
pub struct UpdateContext {
    /// Map extent in world pixels.
    pub map_px: (i32, i32),
}

/// Capabilities shared by every scene object.
pub trait SceneObject {
    /// Advance one tick.
    fn update(&mut self, ctx: &UpdateContext);

    /// Draw into the frame buffer.
    fn render(&self, renderer: &mut Renderer, zoom_x: u32, zoom_y: u32);

    /// Offer a click (a 1x1 screen-space rectangle). `Some` means the object
    /// consumed it, possibly asking for a follow-up command.
    fn handle_pointer(
        &mut self,
        pointer: &Rectangle,
        camera: &Camera,
        zoom_x: u32,
        zoom_y: u32,
    ) -> Option<Command>;
}

/// Every kind of scene object.
pub enum SceneNode {
    /// The camera-tracked player.
    Player(Player),
    /// The tile picker.
    Palette(Palette),
}

impl SceneObject for SceneNode {
    fn update(&mut self, ctx: &UpdateContext) {
        match self {
            SceneNode::Player(p) => p.update(ctx),
            SceneNode::Palette(p) => p.update(ctx),
        }
    }

    fn render(&self, renderer: &mut Renderer, zoom_x: u32, zoom_y: u32) {
        match self {
            SceneNode::Player(p) => p.render(renderer, zoom_x, zoom_y),
            SceneNode::Palette(p) => p.render(renderer, zoom_x, zoom_y),
        }
    }

    fn handle_pointer(
        &mut self,
        pointer: &Rectangle,
        camera: &Camera,
        zoom_x: u32,
        zoom_y: u32,
    ) -> Option<Command> {
        match self {
            SceneNode::Player(p) => p.handle_pointer(pointer, camera, zoom_x, zoom_y),
            SceneNode::Palette(p) => p.handle_pointer(pointer, camera, zoom_x, zoom_y),
        }
    }
}
