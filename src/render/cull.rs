use super::camera::Camera;
use std::ops::Range;

const CULL_MARGIN_CELLS: i32 = 1;

/// Grid cells overlapping the camera, clamped to the map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellRange {
    /// Visible columns.
    pub x: Range<u32>,
    /// Visible rows.
    pub y: Range<u32>,
}

impl CellRange {
    /// True when no cell is visible.
    pub fn is_empty(&self) -> bool {
        self.x.is_empty() || self.y.is_empty()
    }

    /// True when cell `(x, y)` is in range.
    pub fn contains(&self, x: u32, y: u32) -> bool {
        self.x.contains(&x) && self.y.contains(&y)
    }
}

fn axis(start: i32, len: i32, cell_px: i32, cells: u32) -> Range<u32> {
    let mut lo = start.div_euclid(cell_px);
    let mut hi = (start + len).div_euclid(cell_px);
    if lo > hi {
        std::mem::swap(&mut lo, &mut hi);
    }

    // pad by one cell
    lo -= CULL_MARGIN_CELLS;
    hi += CULL_MARGIN_CELLS;

    let lo = lo.clamp(0, cells as i32) as u32;
    let hi = (hi + 1).clamp(0, cells as i32) as u32;
    lo..hi.max(lo)
}

/// Cells of a `map_w x map_h` grid, `cell_px` world pixels each, that can touch the camera.
pub fn visible_cells(camera: &Camera, cell_px: (i32, i32), map_w: u32, map_h: u32) -> CellRange {
    let (cw, ch) = cell_px;
    if cw <= 0 || ch <= 0 {
        return CellRange { x: 0..0, y: 0..0 };
    }
    CellRange {
        x: axis(camera.x, camera.width, cw, map_w),
        y: axis(camera.y, camera.height, ch, map_h),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_covers_camera_plus_margin() {
        let cam = Camera::new(128, 64, 128, 64);
        let r = visible_cells(&cam, (64, 64), 100, 100);
        assert_eq!(r.x, 1..6);
        assert_eq!(r.y, 0..4);
    }

    #[test]
    fn negative_camera_clamps_to_map_origin() {
        let cam = Camera::new(-64, -64, 200, 100);
        let r = visible_cells(&cam, (64, 64), 3, 3);
        assert_eq!(r.x, 0..3);
        assert_eq!(r.y, 0..2);
    }

    #[test]
    fn axes_use_their_own_cell_size() {
        let cam = Camera::new(640, 640, 64, 64);
        let r = visible_cells(&cam, (128, 64), 100, 100);
        assert_eq!(r.x, 4..7);
        assert_eq!(r.y, 9..13);
    }

    #[test]
    fn camera_past_the_map_sees_nothing() {
        let cam = Camera::new(10_000, 0, 100, 100);
        let r = visible_cells(&cam, (64, 64), 10, 10);
        assert!(r.is_empty());
    }
}
