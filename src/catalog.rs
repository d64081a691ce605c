//! Tile definitions loaded from a flat text catalog.

use crate::error::{Error, Result};
use crate::loader::catalog_text::parse_catalog;
use crate::render::Renderer;
use crate::tileset::{Sprite, SpriteSheet};
use std::path::Path;
use std::sync::Arc;

/// Compositing order key. Higher layers draw over lower ones.
pub type LayerIdx = i32;

/// Layer value meaning "no tile".
pub const NO_LAYER: LayerIdx = -1;

/// Position of a tile in its catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TileId(pub u32);

impl TileId {
    /// Position in the catalog's tile list.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// A named, layer-tagged reference to a sprite.
#[derive(Debug, Clone)]
pub struct Tile {
    /// Name from the catalog file.
    pub name: String,
    /// Sprite shared with the sheet it was cut from.
    pub sprite: Arc<Sprite>,
    /// Layer the tile is placed on.
    pub layer: LayerIdx,
}

/// Ordered tile list; a tile's id is its load position.
#[derive(Debug, Clone, Default)]
pub struct TileCatalog {
    tiles: Vec<Tile>,
}

impl TileCatalog {
    /// Catalog over `tiles`; ids follow the vector order.
    pub fn new(tiles: Vec<Tile>) -> Self {
        Self { tiles }
    }

    /// Parse catalog text, resolving every record's sprite against `sheet`.
    ///
    /// Any bad record fails the whole load; no partial catalog is produced.
    pub fn parse(src: &str, sheet: &SpriteSheet) -> Result<Self> {
        let tiles = parse_catalog(src)?
            .into_iter()
            .map(|rec| {
                let sprite = sheet
                    .sprite_at(rec.sprite_col, rec.sprite_row)
                    .map_err(|e| Error::config(rec.line, e.to_string()))?;
                Ok(Tile {
                    name: rec.name,
                    sprite,
                    layer: rec.layer,
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { tiles })
    }

    /// Read and [`parse`](Self::parse) a catalog file.
    pub fn load(path: impl AsRef<Path>, sheet: &SpriteSheet) -> Result<Self> {
        let p = path.as_ref();
        let txt = std::fs::read_to_string(p).map_err(|source| Error::io(p, source))?;
        let catalog = Self::parse(&txt, sheet)?;
        tracing::info!(path = %p.display(), tiles = catalog.len(), "tile catalog loaded");
        Ok(catalog)
    }

    /// Number of tiles.
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    /// True when the catalog holds no tiles.
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Lenient lookup.
    #[inline]
    pub fn get(&self, id: TileId) -> Option<&Tile> {
        self.tiles.get(id.index())
    }

    /// Strict lookup.
    pub fn tile_by_id(&self, id: TileId) -> Result<&Tile> {
        self.get(id)
            .ok_or_else(|| Error::out_of_range("tile id", id.0 as i64, self.tiles.len() as i64))
    }

    /// Layer of `id`, or [`NO_LAYER`] when there is no tile.
    pub fn layer_of(&self, id: Option<TileId>) -> Result<LayerIdx> {
        match id {
            None => Ok(NO_LAYER),
            Some(id) => Ok(self.tile_by_id(id)?.layer),
        }
    }

    /// Tiles in id order.
    pub fn all_tiles(&self) -> &[Tile] {
        &self.tiles
    }

    /// Every valid id, ascending.
    pub fn ids(&self) -> impl Iterator<Item = TileId> + '_ {
        (0..self.tiles.len() as u32).map(TileId)
    }

    /// Blit a tile in world space. Unknown ids are logged and skipped.
    pub fn render_tile(
        &self,
        id: TileId,
        renderer: &mut Renderer,
        x: i32,
        y: i32,
        zoom_x: u32,
        zoom_y: u32,
    ) {
        match self.get(id) {
            Some(tile) => renderer.render_sprite(&tile.sprite, x, y, zoom_x, zoom_y, false),
            None => tracing::debug!(tile = id.0, "tile id is out of bounds, skipping"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sheet() -> SpriteSheet {
        // 2x1 cells of 1px: red, blue
        SpriteSheet::from_pixels(2, 1, vec![0xFF0000, 0x0000FF], 1, 1, 0).unwrap()
    }

    #[test]
    fn ids_follow_load_order() {
        let cat = TileCatalog::parse("grass-0-0-0\n// c\nwall-1-0-1\n", &sheet()).unwrap();
        assert_eq!(cat.len(), 2);
        assert_eq!(cat.tile_by_id(TileId(0)).unwrap().name, "grass");
        let wall = cat.tile_by_id(TileId(1)).unwrap();
        assert_eq!(wall.layer, 1);
        assert_eq!(wall.sprite.pixels(), &[0x0000FF]);
    }

    #[test]
    fn sprite_out_of_range_fails_whole_load() {
        let err = TileCatalog::parse("grass-0-0-0\nrock-5-0-0\n", &sheet()).unwrap_err();
        assert!(matches!(err, Error::ConfigFormat { line: 2, .. }));
    }

    #[test]
    fn layer_of_passes_sentinel_through() {
        let cat = TileCatalog::parse("grass-0-0-0\nwall-1-0-3\n", &sheet()).unwrap();
        assert_eq!(cat.layer_of(None).unwrap(), NO_LAYER);
        assert_eq!(cat.layer_of(Some(TileId(1))).unwrap(), 3);
        assert!(matches!(
            cat.layer_of(Some(TileId(2))),
            Err(Error::OutOfRange { value: 2, bound: 2, .. })
        ));
    }
}
