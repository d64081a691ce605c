use crate::tileset::Pixel;

/// Axis-aligned pixel rectangle that can optionally carry its own pixels
/// (solid fills and borders for UI chrome).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Rectangle {
    /// Left edge.
    pub x: i32,
    /// Top edge.
    pub y: i32,
    /// Width in pixels.
    pub width: i32,
    /// Height in pixels.
    pub height: i32,
    pixels: Option<Vec<Pixel>>,
}

impl Rectangle {
    /// Rectangle without pixels.
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
            pixels: None,
        }
    }

    /// Row-major pixels, if any were generated.
    pub fn pixels(&self) -> Option<&[Pixel]> {
        self.pixels.as_deref()
    }

    /// Fill the whole rectangle with `color`.
    pub fn generate_graphics(&mut self, color: Pixel) {
        let len = self.width.max(0) as usize * self.height.max(0) as usize;
        self.pixels = Some(vec![color; len]);
    }

    /// Paint a `border` pixels wide frame of `color`; the inside is left as `fill`.
    pub fn generate_border(&mut self, border: i32, color: Pixel, fill: Pixel) {
        let (w, h) = (self.width.max(0), self.height.max(0));
        let mut px = Vec::with_capacity(w as usize * h as usize);
        for y in 0..h {
            for x in 0..w {
                let edge = x < border || y < border || x >= w - border || y >= h - border;
                px.push(if edge { color } else { fill });
            }
        }
        self.pixels = Some(px);
    }

    /// Point test, right and bottom edges exclusive.
    pub fn contains_point(&self, x: i32, y: i32) -> bool {
        x >= self.x && y >= self.y && x < self.x + self.width && y < self.y + self.height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn border_leaves_inside_as_fill() {
        let mut r = Rectangle::new(0, 0, 3, 3);
        r.generate_border(1, 7, 0);
        assert_eq!(r.pixels().unwrap(), &[7, 7, 7, 7, 0, 7, 7, 7, 7]);
    }

    #[test]
    fn pointer_rect_hits_button() {
        let button = Rectangle::new(66, 0, 64, 64);
        assert!(button.contains_point(100, 10));
        assert!(!button.contains_point(10, 10));
        assert!(button.contains_point(66, 63));
        assert!(!button.contains_point(130, 0));
    }
}
