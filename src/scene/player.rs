use super::{SceneObject, UpdateContext};
use crate::command::Command;
use crate::geom::Rectangle;
use crate::render::{Camera, Renderer};
use crate::tileset::Pixel;

/// The controllable subject the camera tracks.
///
/// `body` holds the unscaled size and the world position; the on-screen size
/// is `body` scaled by the zoom it is drawn with.
pub struct Player {
    body: Rectangle,
    zoom: (u32, u32),
    speed: i32,
    direction: (i32, i32),
}

impl Player {
    /// Square player of `size` unzoomed pixels at world `(x, y)`.
    pub fn new(x: i32, y: i32, size: i32, zoom: (u32, u32), speed: i32, color: Pixel) -> Self {
        let mut body = Rectangle::new(x, y, size, size);
        body.generate_graphics(color);
        Self {
            body,
            zoom,
            speed,
            direction: (0, 0),
        }
    }

    /// Held direction; each axis is reduced to its sign.
    pub fn set_direction(&mut self, dx: i32, dy: i32) {
        self.direction = (dx.signum(), dy.signum());
    }

    /// World position of the top-left corner.
    pub fn position(&self) -> (i32, i32) {
        (self.body.x, self.body.y)
    }

    /// Footprint in world pixels.
    pub fn world_rect(&self) -> Rectangle {
        Rectangle::new(
            self.body.x,
            self.body.y,
            self.body.width * self.zoom.0 as i32,
            self.body.height * self.zoom.1 as i32,
        )
    }
}

impl SceneObject for Player {
    fn update(&mut self, ctx: &UpdateContext) {
        let (dx, dy) = self.direction;
        if dx == 0 && dy == 0 {
            return;
        }
        let rect = self.world_rect();
        let max_x = (ctx.map_px.0 - rect.width).max(0);
        let max_y = (ctx.map_px.1 - rect.height).max(0);
        self.body.x = (self.body.x + dx * self.speed).clamp(0, max_x);
        self.body.y = (self.body.y + dy * self.speed).clamp(0, max_y);
    }

    fn render(&self, renderer: &mut Renderer, zoom_x: u32, zoom_y: u32) {
        renderer.render_rectangle(&self.body, zoom_x, zoom_y, false);
    }

    fn handle_pointer(&mut self, _: &Rectangle, _: &Camera, _: u32, _: u32) -> Option<Command> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn moves_by_speed_and_stays_on_the_map() {
        let mut p = Player::new(10, 10, 4, (2, 2), 5, 1);
        let ctx = UpdateContext { map_px: (30, 100) };

        p.set_direction(1, -3);
        p.update(&ctx);
        assert_eq!(p.position(), (15, 5));

        p.update(&ctx);
        p.update(&ctx);
        assert_eq!(p.position(), (22, 0));
    }

    #[test]
    fn idle_player_does_not_move() {
        let mut p = Player::new(3, 4, 4, (1, 1), 5, 1);
        p.update(&UpdateContext { map_px: (100, 100) });
        assert_eq!(p.position(), (3, 4));
        assert_eq!(p.world_rect(), Rectangle::new(3, 4, 4, 4));
    }
}
