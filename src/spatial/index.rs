use crate::render::Camera;

/// A map cell address. May lie outside the map; `TileMap` decides what that means.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridCoord {
    /// Column.
    pub x: i32,
    /// Row.
    pub y: i32,
}

/// Pointer position (screen space) to world pixels.
#[inline]
pub fn screen_to_world(sx: i32, sy: i32, camera: &Camera) -> (i32, i32) {
    (sx + camera.x, sy + camera.y)
}

/// World pixels to the cell containing them, flooring towards negative infinity.
#[inline]
pub fn world_to_grid(wx: i32, wy: i32, cell_px: (i32, i32)) -> GridCoord {
    GridCoord {
        x: wx.div_euclid(cell_px.0),
        y: wy.div_euclid(cell_px.1),
    }
}

/// Top-left world pixel of a cell.
#[inline]
pub fn grid_to_world(cell: GridCoord, cell_px: (i32, i32)) -> (i32, i32) {
    (cell.x * cell_px.0, cell.y * cell_px.1)
}

/// Screen-space click to map cell: `floor((screen + camera) / (tile_size * zoom))`.
pub fn screen_to_grid(sx: i32, sy: i32, camera: &Camera, cell_px: (i32, i32)) -> GridCoord {
    let (wx, wy) = screen_to_world(sx, sy, camera);
    world_to_grid(wx, wy, cell_px)
}
