use crate::geom::Rectangle;

/// World-space viewport into the frame buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Camera {
    /// World x of the top-left corner.
    pub x: i32,
    /// World y of the top-left corner.
    pub y: i32,
    /// Visible width.
    pub width: i32,
    /// Visible height.
    pub height: i32,
}

impl Camera {
    /// Camera at `(x, y)` showing `width x height`.
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Edges inclusive on both sides.
    #[inline]
    pub fn contains_inclusive(&self, x: i32, y: i32) -> bool {
        x >= self.x && y >= self.y && x <= self.x + self.width && y <= self.y + self.height
    }
}

/// Two-sided deadzone clamp that pins the camera when the tracked subject
/// gets close to a map edge. Between the two zones the camera stays put.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CameraController {
    /// Distance from a map edge that triggers pinning.
    pub margin: i32,
    /// Gap kept between the map edge and the viewport edge once pinned.
    pub edge_pad: i32,
}

impl Default for CameraController {
    fn default() -> Self {
        Self {
            margin: 96,
            edge_pad: 64,
        }
    }
}

impl CameraController {
    /// Controller with the given trigger margin and edge pad.
    pub const fn new(margin: i32, edge_pad: i32) -> Self {
        Self { margin, edge_pad }
    }

    /// `map_px` is the map size in world pixels, `viewport` the visible size.
    pub fn follow_and_clamp(
        &self,
        camera: &mut Camera,
        tracked: &Rectangle,
        map_px: (i32, i32),
        viewport: (i32, i32),
    ) {
        if let Some(x) = self.clamp_axis(tracked.x, map_px.0, viewport.0) {
            tracing::debug!(x, "camera pinned horizontally");
            camera.x = x;
        }
        if let Some(y) = self.clamp_axis(tracked.y, map_px.1, viewport.1) {
            tracing::debug!(y, "camera pinned vertically");
            camera.y = y;
        }
    }

    /// New camera position on one axis, or `None` to keep the current one.
    /// The leading edge wins when both zones overlap (tiny maps).
    fn clamp_axis(&self, pos: i32, map_end: i32, view: i32) -> Option<i32> {
        if pos < self.margin {
            Some(-self.edge_pad)
        } else if map_end - pos < self.margin {
            Some(map_end + self.edge_pad - view)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MAP: (i32, i32) = (2000, 1500);
    const VIEW: (i32, i32) = (800, 600);

    #[test]
    fn pins_to_trailing_edge() {
        let mut cam = Camera::new(500, 300, 800, 600);
        let subject = Rectangle::new(1950, 1450, 32, 32);
        CameraController::default().follow_and_clamp(&mut cam, &subject, MAP, VIEW);
        assert_eq!(cam.x, 2000 + 64 - 800);
        assert_eq!(cam.y, 1500 + 64 - 600);
    }

    #[test]
    fn pins_to_leading_edge() {
        let mut cam = Camera::new(500, 300, 800, 600);
        let subject = Rectangle::new(10, 95, 32, 32);
        CameraController::default().follow_and_clamp(&mut cam, &subject, MAP, VIEW);
        assert_eq!((cam.x, cam.y), (-64, -64));
    }

    #[test]
    fn deadzone_keeps_last_position() {
        let mut cam = Camera::new(123, 45, 800, 600);
        let subject = Rectangle::new(1000, 96, 32, 32);
        CameraController::default().follow_and_clamp(&mut cam, &subject, MAP, VIEW);
        assert_eq!((cam.x, cam.y), (123, 45));
    }

    #[test]
    fn custom_margins() {
        let mut cam = Camera::default();
        let subject = Rectangle::new(990, 500, 1, 1);
        CameraController::new(20, 0).follow_and_clamp(&mut cam, &subject, (1000, 1000), (400, 400));
        assert_eq!(cam.x, 600);
        assert_eq!(cam.y, 0);
    }
}
