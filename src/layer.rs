use crate::catalog::{LayerIdx, TileId};

/// Grid storage for one compositing layer of a tile map.
///
/// Cells are row-major; `None` means nothing is placed on this layer there.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileLayer {
    /// Compositing key of this layer.
    pub layer: LayerIdx,
    width: u32,
    height: u32,
    data: Vec<Option<TileId>>,
}

impl TileLayer {
    /// Empty `width x height` layer.
    pub fn new(layer: LayerIdx, width: u32, height: u32) -> Self {
        TileLayer {
            layer,
            width,
            height,
            data: vec![None; width as usize * height as usize],
        }
    }

    #[inline]
    fn idx(&self, x: u32, y: u32) -> Option<usize> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(y as usize * self.width as usize + x as usize)
    }

    /// Tile at `(x, y)`; `None` when empty or outside.
    pub fn get(&self, x: u32, y: u32) -> Option<TileId> {
        self.idx(x, y).and_then(|i| self.data[i])
    }

    /// Returns the tile previously stored at the cell.
    pub fn set(&mut self, x: u32, y: u32, id: TileId) -> Option<TileId> {
        let i = self.idx(x, y)?;
        self.data[i].replace(id)
    }

    /// Clear `(x, y)`, returning what was there.
    pub fn remove(&mut self, x: u32, y: u32) -> Option<TileId> {
        let i = self.idx(x, y)?;
        self.data[i].take()
    }

    /// True when no cell is populated.
    pub fn is_empty(&self) -> bool {
        self.data.iter().all(Option::is_none)
    }

    /// Number of populated cells.
    pub fn len(&self) -> usize {
        self.data.iter().filter(|c| c.is_some()).count()
    }

    /// Populated cells as `(x, y, id)`, row-major.
    pub fn iter(&self) -> impl Iterator<Item = (u32, u32, TileId)> + '_ {
        let w = self.width as usize;
        self.data
            .iter()
            .enumerate()
            .filter_map(move |(i, c)| c.map(|id| ((i % w) as u32, (i / w) as u32, id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_replaces_and_remove_clears() {
        let mut l = TileLayer::new(0, 3, 2);
        assert_eq!(l.set(2, 1, TileId(4)), None);
        assert_eq!(l.set(2, 1, TileId(5)), Some(TileId(4)));
        assert_eq!(l.get(2, 1), Some(TileId(5)));
        assert_eq!(l.len(), 1);

        assert_eq!(l.remove(2, 1), Some(TileId(5)));
        assert!(l.is_empty());
    }

    #[test]
    fn out_of_grid_is_ignored() {
        let mut l = TileLayer::new(0, 2, 2);
        assert_eq!(l.set(2, 0, TileId(1)), None);
        assert_eq!(l.get(2, 0), None);
        assert!(l.is_empty());
    }

    #[test]
    fn iter_yields_row_major_coordinates() {
        let mut l = TileLayer::new(1, 3, 3);
        l.set(0, 2, TileId(1));
        l.set(2, 0, TileId(2));
        let cells: Vec<_> = l.iter().collect();
        assert_eq!(cells, vec![(2, 0, TileId(2)), (0, 2, TileId(1))]);
    }
}
