use crate::catalog::{LayerIdx, TileCatalog, TileId, NO_LAYER};
use crate::error::{Error, Result};
use crate::layer::TileLayer;
use crate::loader::map_text::{decode_map_text, encode_map_text, RawCell, RawMapFile};
use crate::render::{visible_cells, Renderer};
use crate::spatial::{grid_to_world, GridCoord};
use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Fixed-size grid where every cell may hold one tile per layer.
///
/// Layers are kept sorted so that rendering composes them back to front.
#[derive(Debug, Clone)]
pub struct TileMap {
    width: u32,
    height: u32,
    tile_size: u32,
    layers: BTreeMap<LayerIdx, TileLayer>,
    catalog: Arc<TileCatalog>,
    source: Option<PathBuf>,
}

impl PartialEq for TileMap {
    fn eq(&self, other: &Self) -> bool {
        self.width == other.width
            && self.height == other.height
            && self.tile_size == other.tile_size
            && self.layers == other.layers
    }
}

impl TileMap {
    /// Empty map of `width x height` cells.
    ///
    /// Every populated layer allocates one slot per cell; maps read from text are
    /// held to [`MAX_MAP_CELLS`](crate::MAX_MAP_CELLS).
    pub fn new(width: u32, height: u32, tile_size: u32, catalog: Arc<TileCatalog>) -> Self {
        Self {
            width,
            height,
            tile_size,
            layers: BTreeMap::new(),
            catalog,
            source: None,
        }
    }

    /// Build a map from persisted text, checking every record against `catalog`.
    pub fn parse(src: &str, tile_size: u32, catalog: Arc<TileCatalog>) -> Result<Self> {
        let raw = decode_map_text(src)?;
        let mut map = Self::new(raw.width, raw.height, tile_size, catalog);

        for cell in &raw.cells {
            map.place_record(cell)?;
        }
        Ok(map)
    }

    fn place_record(&mut self, cell: &RawCell) -> Result<()> {
        let RawCell {
            line,
            x,
            y,
            layer,
            tile,
        } = *cell;

        if x >= self.width || y >= self.height {
            return Err(Error::map(
                line,
                format!("cell ({x}, {y}) is outside the {}x{} map", self.width, self.height),
            ));
        }
        let id = TileId(tile);
        let expected = self
            .catalog
            .get(id)
            .map(|t| t.layer)
            .ok_or_else(|| Error::map(line, format!("unknown tile id {tile}")))?;
        if expected != layer {
            return Err(Error::map(
                line,
                format!("tile {tile} belongs to layer {expected}, found layer {layer}"),
            ));
        }

        let (w, h) = (self.width, self.height);
        let grid = self
            .layers
            .entry(layer)
            .or_insert_with(|| TileLayer::new(layer, w, h));
        if grid.set(x, y, id).is_some() {
            return Err(Error::map(
                line,
                format!("cell ({x}, {y}) already holds a tile on layer {layer}"),
            ));
        }
        Ok(())
    }

    /// Read and [`parse`](Self::parse) a map file, remembering it as the save target.
    pub fn load(path: impl AsRef<Path>, tile_size: u32, catalog: Arc<TileCatalog>) -> Result<Self> {
        let p = path.as_ref();
        let txt = std::fs::read_to_string(p).map_err(|source| Error::io(p, source))?;
        let mut map = Self::parse(&txt, tile_size, catalog)?;
        map.source = Some(p.to_path_buf());
        tracing::info!(
            path = %p.display(),
            width = map.width,
            height = map.height,
            layers = map.layers.len(),
            "map loaded"
        );
        Ok(map)
    }

    /// Width in cells.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in cells.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Edge of one cell in unzoomed pixels.
    pub fn tile_size(&self) -> u32 {
        self.tile_size
    }

    /// Catalog the stored ids refer to.
    pub fn catalog(&self) -> &Arc<TileCatalog> {
        &self.catalog
    }

    /// File the map was loaded from, which is where [`TileMap::save`] writes.
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// Bind the map to a file for [`save`](Self::save).
    pub fn set_source(&mut self, path: impl Into<PathBuf>) {
        self.source = Some(path.into());
    }

    /// Map extent in world pixels at the given zoom, saturating at `i32::MAX`.
    pub fn pixel_size(&self, zoom_x: u32, zoom_y: u32) -> (i32, i32) {
        let extent = |cells: u32, zoom: u32| {
            let px = u64::from(cells)
                .saturating_mul(u64::from(self.tile_size))
                .saturating_mul(u64::from(zoom));
            i32::try_from(px).unwrap_or(i32::MAX)
        };
        (extent(self.width, zoom_x), extent(self.height, zoom_y))
    }

    #[inline]
    fn cell(&self, x: i32, y: i32) -> Option<(u32, u32)> {
        let in_bounds = x >= 0 && y >= 0 && (x as u32) < self.width && (y as u32) < self.height;
        in_bounds.then_some((x as u32, y as u32))
    }

    /// Tile on `layer` at `(x, y)`. Coordinates outside the map are an error.
    pub fn tile_at(&self, x: i32, y: i32, layer: LayerIdx) -> Result<Option<TileId>> {
        let (cx, cy) = self.cell(x, y).ok_or_else(|| {
            if x < 0 || x as u32 >= self.width {
                Error::out_of_range("map x", x as i64, self.width as i64)
            } else {
                Error::out_of_range("map y", y as i64, self.height as i64)
            }
        })?;
        Ok(self.layers.get(&layer).and_then(|l| l.get(cx, cy)))
    }

    /// Place `id` on its own layer, replacing whatever was on that layer.
    ///
    /// Cells outside the map are ignored, edits near the edges are routine.
    /// An id the catalog doesn't know is an error.
    pub fn set_tile(&mut self, x: i32, y: i32, id: TileId) -> Result<()> {
        let layer = self.catalog.layer_of(Some(id))?;
        let Some((cx, cy)) = self.cell(x, y) else {
            tracing::debug!(x, y, "set_tile outside the map ignored");
            return Ok(());
        };
        let (w, h) = (self.width, self.height);
        self.layers
            .entry(layer)
            .or_insert_with(|| TileLayer::new(layer, w, h))
            .set(cx, cy, id);
        tracing::debug!(x, y, layer, tile = id.0, "tile placed");
        Ok(())
    }

    /// Clear `layer` at `(x, y)`. Other layers of the cell are untouched.
    pub fn remove_tile(&mut self, x: i32, y: i32, layer: LayerIdx) {
        if layer == NO_LAYER {
            return;
        }
        let Some((cx, cy)) = self.cell(x, y) else {
            return;
        };
        if let Entry::Occupied(mut grid) = self.layers.entry(layer) {
            if grid.get_mut().remove(cx, cy).is_some() {
                tracing::debug!(x, y, layer, "tile removed");
            }
            if grid.get().is_empty() {
                grid.remove();
            }
        }
    }

    /// Layers in ascending compositing order.
    pub fn layers(&self) -> impl Iterator<Item = &TileLayer> {
        self.layers.values()
    }

    /// All placed tiles as `(x, y, layer, id)`, ascending layer then row-major.
    pub fn tiles(&self) -> impl Iterator<Item = (u32, u32, LayerIdx, TileId)> + '_ {
        self.layers
            .values()
            .flat_map(|l| l.iter().map(move |(x, y, id)| (x, y, l.layer, id)))
    }

    /// Blit every visible tile through the camera, lower layers first.
    pub fn render(&self, renderer: &mut Renderer, zoom_x: u32, zoom_y: u32) {
        let step_x = (self.tile_size * zoom_x) as i32;
        let step_y = (self.tile_size * zoom_y) as i32;
        let visible = visible_cells(renderer.camera(), (step_x, step_y), self.width, self.height);

        for layer in self.layers.values() {
            for (x, y, id) in layer.iter() {
                if !visible.contains(x, y) {
                    continue;
                }
                let cell = GridCoord {
                    x: x as i32,
                    y: y as i32,
                };
                let (wx, wy) = grid_to_world(cell, (step_x, step_y));
                self.catalog.render_tile(id, renderer, wx, wy, zoom_x, zoom_y);
            }
        }
    }

    /// Text form accepted by [`TileMap::parse`].
    pub fn to_text(&self) -> String {
        let cells = self
            .tiles()
            .map(|(x, y, layer, id)| RawCell {
                line: 0,
                x,
                y,
                layer,
                tile: id.0,
            })
            .collect();
        encode_map_text(&RawMapFile {
            width: self.width,
            height: self.height,
            cells,
        })
    }

    /// Write the map to `path` in the text format.
    pub fn save_to(&self, path: impl AsRef<Path>) -> Result<()> {
        let p = path.as_ref();
        std::fs::write(p, self.to_text()).map_err(|source| Error::io(p, source))?;
        tracing::info!(path = %p.display(), tiles = self.tiles().count(), "map saved");
        Ok(())
    }

    /// Write back to the file the map was loaded from.
    pub fn save(&self) -> Result<()> {
        match &self.source {
            Some(p) => self.save_to(p),
            None => Err(Error::NoSource),
        }
    }
}
