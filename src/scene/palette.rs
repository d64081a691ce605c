use super::{SceneObject, UpdateContext};
use crate::catalog::{TileCatalog, TileId};
use crate::command::Command;
use crate::geom::Rectangle;
use crate::render::{Camera, Renderer};
use crate::tileset::Pixel;
use std::sync::Arc;

const HIGHLIGHT: Pixel = 0xFFFF00;
const HIGHLIGHT_WIDTH: i32 = 3;

/// Screen-fixed strip of tile buttons along the top edge.
pub struct Palette {
    catalog: Arc<TileCatalog>,
    buttons: Vec<Rectangle>,
    selected: Option<TileId>,
    highlight: Rectangle,
    visible: bool,
}

impl Palette {
    /// One `cell_px` square button per catalog tile, `spacing` pixels apart.
    pub fn new(catalog: Arc<TileCatalog>, cell_px: i32, spacing: i32, color_key: Pixel) -> Self {
        let buttons = (0..catalog.len() as i32)
            .map(|i| Rectangle::new(i * (cell_px + spacing), 0, cell_px, cell_px))
            .collect();

        let mut highlight = Rectangle::new(0, 0, cell_px, cell_px);
        highlight.generate_border(HIGHLIGHT_WIDTH, HIGHLIGHT, color_key);

        Self {
            catalog,
            buttons,
            selected: None,
            highlight,
            visible: true,
        }
    }

    /// Button rectangles in tile id order, screen space.
    pub fn buttons(&self) -> &[Rectangle] {
        &self.buttons
    }

    /// Highlight `id`'s button.
    pub fn set_selected(&mut self, id: Option<TileId>) {
        self.selected = id;
    }

    /// Whether the palette is drawn and clickable.
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Show or hide.
    pub fn toggle(&mut self) {
        self.visible = !self.visible;
    }
}

impl SceneObject for Palette {
    fn update(&mut self, _: &UpdateContext) {}

    fn render(&self, renderer: &mut Renderer, zoom_x: u32, zoom_y: u32) {
        if !self.visible {
            return;
        }
        for (id, button) in self.catalog.ids().zip(&self.buttons) {
            if let Some(tile) = self.catalog.get(id) {
                renderer.render_sprite(&tile.sprite, button.x, button.y, zoom_x, zoom_y, true);
            }
            if self.selected == Some(id) {
                renderer.render_rectangle_offset(&self.highlight, button, 1, 1, true);
            }
        }
    }

    fn handle_pointer(&mut self, pointer: &Rectangle, _: &Camera, _: u32, _: u32) -> Option<Command> {
        if !self.visible {
            return None;
        }
        self.catalog
            .ids()
            .zip(&self.buttons)
            .find(|(_, b)| b.contains_point(pointer.x, pointer.y))
            .map(|(id, _)| Command::SelectTile(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tileset::SpriteSheet;

    fn palette() -> Palette {
        let sheet = SpriteSheet::from_pixels(2, 1, vec![1, 2], 1, 1, 0).unwrap();
        let cat = TileCatalog::parse("a-0-0-0\nb-1-0-1\n", &sheet).unwrap();
        Palette::new(Arc::new(cat), 64, 2, 0x80FF00)
    }

    #[test]
    fn buttons_are_laid_out_horizontally() {
        let p = palette();
        assert_eq!(p.buttons()[1], Rectangle::new(66, 0, 64, 64));
    }

    #[test]
    fn click_on_button_selects_its_tile() {
        let mut p = palette();
        let cam = Camera::new(500, 500, 800, 600);
        let hit = p.handle_pointer(&Rectangle::new(70, 10, 1, 1), &cam, 2, 2);
        assert_eq!(hit, Some(Command::SelectTile(TileId(1))));

        // the gap between buttons
        assert_eq!(p.handle_pointer(&Rectangle::new(65, 10, 1, 1), &cam, 2, 2), None);
    }

    #[test]
    fn hidden_palette_ignores_clicks() {
        let mut p = palette();
        p.toggle();
        let cam = Camera::default();
        assert_eq!(p.handle_pointer(&Rectangle::new(5, 5, 1, 1), &cam, 2, 2), None);
    }
}
