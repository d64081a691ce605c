// src/loader/map_text.rs
//
// Persisted map format:
//
//   // comment
//   width-height
//   x-y-layer-tileId
//   ...
//
// The first record is the map size in cells, every following record places one
// tile. Comments start with `//` or `#`.

use super::catalog_text::is_comment;
use crate::catalog::LayerIdx;
use crate::error::{Error, Result};
use std::fmt::Write as _;

/// Largest accepted width or height, in cells.
pub const MAX_MAP_SIDE: u32 = 16_384;
/// Largest accepted `width * height`. Every layer stores one slot per cell.
pub const MAX_MAP_CELLS: u64 = 1 << 24;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawCell {
    pub line: usize,
    pub x: u32,
    pub y: u32,
    pub layer: LayerIdx,
    pub tile: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawMapFile {
    pub width: u32,
    pub height: u32,
    pub cells: Vec<RawCell>,
}

fn field<T: std::str::FromStr>(line: usize, name: &str, value: &str) -> Result<T> {
    value
        .parse::<T>()
        .map_err(|_| Error::map(line, format!("{name} `{value}` is not a valid integer")))
}

/// Syntactic parse. Bounds and tile ids are checked by [`crate::TileMap`].
pub fn decode_map_text(src: &str) -> Result<RawMapFile> {
    let mut size: Option<(u32, u32)> = None;
    let mut cells = Vec::new();

    for (idx, raw) in src.lines().enumerate() {
        let line_no = idx + 1;
        let line = raw.trim();
        if line.is_empty() || is_comment(line) {
            continue;
        }
        let fields: Vec<&str> = line.split('-').map(str::trim).collect();

        match size {
            None => {
                if fields.len() != 2 {
                    return Err(Error::map(
                        line_no,
                        format!("expected `width-height` header, found {} fields", fields.len()),
                    ));
                }
                let w: u32 = field(line_no, "width", fields[0])?;
                let h: u32 = field(line_no, "height", fields[1])?;
                if w == 0 || h == 0 {
                    return Err(Error::map(line_no, format!("map size {w}x{h} is empty")));
                }
                if w > MAX_MAP_SIDE || h > MAX_MAP_SIDE || u64::from(w) * u64::from(h) > MAX_MAP_CELLS {
                    return Err(Error::map(
                        line_no,
                        format!("map size {w}x{h} exceeds the {MAX_MAP_SIDE} cells per side / {MAX_MAP_CELLS} cells limit"),
                    ));
                }
                size = Some((w, h));
            }
            Some(_) => {
                if fields.len() != 4 {
                    return Err(Error::map(
                        line_no,
                        format!("expected `x-y-layer-tileId`, found {} fields", fields.len()),
                    ));
                }
                cells.push(RawCell {
                    line: line_no,
                    x: field(line_no, "x", fields[0])?,
                    y: field(line_no, "y", fields[1])?,
                    layer: field(line_no, "layer", fields[2])?,
                    tile: field(line_no, "tile id", fields[3])?,
                });
            }
        }
    }

    let (width, height) = size.ok_or_else(|| Error::map(0, "missing `width-height` header"))?;
    Ok(RawMapFile {
        width,
        height,
        cells,
    })
}

/// Serialize a map. Cells are written in the order given.
pub fn encode_map_text(map: &RawMapFile) -> String {
    let mut out = String::with_capacity(32 + map.cells.len() * 12);
    out.push_str("// width-height\n");
    let _ = writeln!(out, "{}-{}", map.width, map.height);
    out.push_str("// x-y-layer-tileId\n");
    for c in &map.cells {
        let _ = writeln!(out, "{}-{}-{}-{}", c.x, c.y, c.layer, c.tile);
    }
    out
}
