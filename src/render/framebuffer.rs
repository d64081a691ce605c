//! Software frame buffer and blitting primitives.
//!
//! The buffer is sized once to the largest attached display and never
//! reallocated. Draw calls come in two flavours:
//!
//! - world space (`fixed == false`): translated by the camera position and
//!   clipped to the camera rectangle;
//! - screen space (`fixed == true`): written as-is, clipped to the camera size.
//!
//! Pixels equal to the color key are never written.

use super::camera::Camera;
use crate::config::DisplaySize;
use crate::geom::Rectangle;
use crate::tileset::{Pixel, Sprite};
use macroquad::texture::Image;

/// Frame buffer, camera and blitting state.
pub struct Renderer {
    pixels: Vec<Pixel>,
    buffer_w: usize,
    buffer_h: usize,
    camera: Camera,
    color_key: Pixel,
}

impl Renderer {
    /// Allocate a buffer as large as the biggest display and open a
    /// `requested_w x requested_h` camera at the origin.
    pub fn new(
        requested_w: i32,
        requested_h: i32,
        displays: &[DisplaySize],
        color_key: Pixel,
    ) -> Self {
        let buffer_w = displays.iter().map(|d| d.width).max().unwrap_or(0) as usize;
        let buffer_h = displays.iter().map(|d| d.height).max().unwrap_or(0) as usize;
        tracing::info!(buffer_w, buffer_h, "frame buffer allocated");

        let mut renderer = Self {
            pixels: vec![0; buffer_w * buffer_h],
            buffer_w,
            buffer_h,
            camera: Camera::new(0, 0, 0, 0),
            color_key,
        };
        renderer.resize(requested_w, requested_h);
        renderer
    }

    /// Current camera.
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Camera for the controller to move.
    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    /// Buffer width.
    pub fn max_width(&self) -> usize {
        self.buffer_w
    }

    /// Buffer height.
    pub fn max_height(&self) -> usize {
        self.buffer_h
    }

    /// Window resized: the camera follows, up to the buffer size.
    pub fn resize(&mut self, width: i32, height: i32) {
        self.camera.width = width.clamp(0, self.buffer_w as i32);
        self.camera.height = height.clamp(0, self.buffer_h as i32);
    }

    /// Blit a sprite scaled by `zoom_x x zoom_y`.
    pub fn render_sprite(
        &mut self,
        sprite: &Sprite,
        x: i32,
        y: i32,
        zoom_x: u32,
        zoom_y: u32,
        fixed: bool,
    ) {
        self.render_pixels(
            sprite.pixels(),
            sprite.width(),
            sprite.height(),
            x,
            y,
            zoom_x,
            zoom_y,
            fixed,
        );
    }

    /// Blit a rectangle's own pixels at its position. Rectangles without pixels draw nothing.
    pub fn render_rectangle(&mut self, rect: &Rectangle, zoom_x: u32, zoom_y: u32, fixed: bool) {
        self.render_rectangle_offset(rect, &Rectangle::default(), zoom_x, zoom_y, fixed);
    }

    /// Like [`Renderer::render_rectangle`], translated by `offset`'s position.
    pub fn render_rectangle_offset(
        &mut self,
        rect: &Rectangle,
        offset: &Rectangle,
        zoom_x: u32,
        zoom_y: u32,
        fixed: bool,
    ) {
        if let Some(px) = rect.pixels() {
            self.render_pixels(
                px,
                rect.width.max(0) as usize,
                rect.height.max(0) as usize,
                rect.x + offset.x,
                rect.y + offset.y,
                zoom_x,
                zoom_y,
                fixed,
            );
        }
    }

    /// Nearest-neighbour scaled blit: every source pixel becomes a `zoom_x x zoom_y` block.
    #[allow(clippy::too_many_arguments)]
    pub fn render_pixels(
        &mut self,
        src: &[Pixel],
        src_w: usize,
        src_h: usize,
        x: i32,
        y: i32,
        zoom_x: u32,
        zoom_y: u32,
        fixed: bool,
    ) {
        let (zx, zy) = (zoom_x as i32, zoom_y as i32);
        for sy in 0..src_h {
            for sx in 0..src_w {
                let Some(&pixel) = src.get(src_w * sy + sx) else {
                    return;
                };
                if pixel == self.color_key {
                    continue;
                }
                for dy in 0..zy {
                    for dx in 0..zx {
                        let px = sx as i32 * zx + dx + x;
                        let py = sy as i32 * zy + dy + y;
                        self.set_pixel(pixel, px, py, fixed);
                    }
                }
            }
        }
    }

    /// Resolve a destination pixel to a buffer index, or `None` if it must be skipped.
    #[inline]
    fn resolve(&self, x: i32, y: i32, fixed: bool) -> Option<usize> {
        let c = &self.camera;
        let (bx, by) = if fixed {
            if x < 0 || y < 0 || x > c.width || y > c.height {
                return None;
            }
            (x, y)
        } else {
            if !c.contains_inclusive(x, y) {
                return None;
            }
            (x - c.x, y - c.y)
        };

        let (bx, by) = (bx as usize, by as usize);
        if bx >= self.buffer_w {
            return None;
        }
        let idx = bx + by * self.buffer_w;
        (idx < self.pixels.len()).then_some(idx)
    }

    /// Write one pixel, subject to the color key and clipping.
    pub fn set_pixel(&mut self, pixel: Pixel, x: i32, y: i32, fixed: bool) {
        if pixel == self.color_key {
            return;
        }
        if let Some(i) = self.resolve(x, y, fixed) {
            self.pixels[i] = pixel;
        }
    }

    /// Buffer pixel at buffer coordinates (top-left of the view is `(0, 0)`).
    pub fn pixel(&self, x: usize, y: usize) -> Option<Pixel> {
        if x >= self.buffer_w || y >= self.buffer_h {
            return None;
        }
        Some(self.pixels[x + y * self.buffer_w])
    }

    /// Zero the whole buffer.
    pub fn clear(&mut self) {
        self.pixels.fill(0);
    }

    /// Copy the camera-sized top-left region of the buffer into `surface` as opaque RGBA.
    pub fn present_to(&self, surface: &mut Image) {
        let w = (self.camera.width.max(0) as usize).min(self.buffer_w);
        let h = (self.camera.height.max(0) as usize).min(self.buffer_h);

        surface.width = w as u16;
        surface.height = h as u16;
        surface.bytes.clear();
        surface.bytes.reserve(w * h * 4);
        for row in self.pixels.chunks_exact(self.buffer_w.max(1)).take(h) {
            for &p in &row[..w] {
                surface.bytes.extend_from_slice(&[
                    (p >> 16) as u8,
                    (p >> 8) as u8,
                    p as u8,
                    0xFF,
                ]);
            }
        }
    }
}
