//! Sprite atlases sliced into a uniform grid of sprites.

use crate::error::{Error, Result};
use macroquad::texture::Image;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// One RGB pixel packed as `0x00RRGGBB`.
pub type Pixel = u32;

/// Pack channels into `0xRRGGBB`.
#[inline]
pub fn pack_rgb(r: u8, g: u8, b: u8) -> Pixel {
    (r as Pixel) << 16 | (g as Pixel) << 8 | b as Pixel
}

/// Immutable block of pixels cut out of an atlas.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sprite {
    width: usize,
    height: usize,
    pixels: Vec<Pixel>,
}

impl Sprite {
    /// Build a sprite from row-major pixels. Returns `None` if the pixel count doesn't match.
    pub fn from_pixels(width: usize, height: usize, pixels: Vec<Pixel>) -> Option<Self> {
        (pixels.len() == width * height).then_some(Self {
            width,
            height,
            pixels,
        })
    }

    /// A sprite filled with a single color.
    pub fn solid(width: usize, height: usize, color: Pixel) -> Self {
        Self {
            width,
            height,
            pixels: vec![color; width * height],
        }
    }

    /// Width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Row-major pixels.
    pub fn pixels(&self) -> &[Pixel] {
        &self.pixels
    }
}

/// An atlas plus the sprites sliced out of it, addressed by (column, row).
#[derive(Debug, Clone)]
pub struct SpriteSheet {
    cols: usize,
    rows: usize,
    sprites: Vec<Arc<Sprite>>,
}

impl SpriteSheet {
    /// Decode an image file and slice it.
    pub fn load(
        path: impl AsRef<Path>,
        cell_w: usize,
        cell_h: usize,
        margin: usize,
    ) -> Result<Self> {
        let p = path.as_ref();
        let bytes = std::fs::read(p).map_err(|source| Error::io(p, source))?;
        let image = Image::from_file_with_format(&bytes, None).map_err(|e| Error::AssetFormat {
            path: p.to_path_buf(),
            reason: e.to_string(),
        })?;
        let sheet = Self::from_image(&image, cell_w, cell_h, margin).map_err(|e| match e {
            Error::AssetFormat { reason, .. } => Error::AssetFormat {
                path: p.to_path_buf(),
                reason,
            },
            other => other,
        })?;
        tracing::info!(
            path = %p.display(),
            cols = sheet.cols,
            rows = sheet.rows,
            "sprite sheet loaded"
        );
        Ok(sheet)
    }

    /// Slice a decoded RGBA image; the alpha channel is dropped.
    pub fn from_image(image: &Image, cell_w: usize, cell_h: usize, margin: usize) -> Result<Self> {
        let pixels = image
            .bytes
            .chunks_exact(4)
            .map(|c| pack_rgb(c[0], c[1], c[2]))
            .collect();
        Self::from_pixels(
            image.width as usize,
            image.height as usize,
            pixels,
            cell_w,
            cell_h,
            margin,
        )
    }

    /// Slice raw atlas pixels row-major into `cell_w x cell_h` cells separated by `margin`.
    ///
    /// The atlas must hold a whole number of cells: `n * cell + (n - 1) * margin` on each axis.
    pub fn from_pixels(
        width: usize,
        height: usize,
        pixels: Vec<Pixel>,
        cell_w: usize,
        cell_h: usize,
        margin: usize,
    ) -> Result<Self> {
        let invalid = |reason: String| Error::AssetFormat {
            path: PathBuf::from("<memory>"),
            reason,
        };

        if pixels.len() != width * height {
            return Err(invalid(format!(
                "expected {} pixels for a {width}x{height} atlas, found {}",
                width * height,
                pixels.len()
            )));
        }
        if cell_w == 0 || cell_h == 0 {
            return Err(invalid("cell size must be non-zero".to_owned()));
        }

        let cols = whole_cells(width, cell_w, margin)
            .ok_or_else(|| invalid(format!("width {width} is not a whole number of {cell_w}px cells with {margin}px margin")))?;
        let rows = whole_cells(height, cell_h, margin)
            .ok_or_else(|| invalid(format!("height {height} is not a whole number of {cell_h}px cells with {margin}px margin")))?;

        let mut sprites = Vec::with_capacity(cols * rows);
        for row in 0..rows {
            for col in 0..cols {
                let sx = col * (cell_w + margin);
                let sy = row * (cell_h + margin);
                let mut cell = Vec::with_capacity(cell_w * cell_h);
                for y in sy..sy + cell_h {
                    let start = y * width + sx;
                    cell.extend_from_slice(&pixels[start..start + cell_w]);
                }
                sprites.push(Arc::new(Sprite {
                    width: cell_w,
                    height: cell_h,
                    pixels: cell,
                }));
            }
        }

        Ok(Self {
            cols,
            rows,
            sprites,
        })
    }

    /// Sprite at grid position `(col, row)`.
    pub fn sprite_at(&self, col: usize, row: usize) -> Result<Arc<Sprite>> {
        if col >= self.cols {
            return Err(Error::out_of_range("sprite column", col as i64, self.cols as i64));
        }
        if row >= self.rows {
            return Err(Error::out_of_range("sprite row", row as i64, self.rows as i64));
        }
        Ok(Arc::clone(&self.sprites[row * self.cols + col]))
    }

    /// Sprites in row-major order.
    pub fn sprites(&self) -> &[Arc<Sprite>] {
        &self.sprites
    }

    /// Cells per row.
    pub fn columns(&self) -> usize {
        self.cols
    }

    /// Cell rows.
    pub fn rows(&self) -> usize {
        self.rows
    }
}

/// Number of cells along one axis, if `extent` holds a whole number of them.
fn whole_cells(extent: usize, cell: usize, margin: usize) -> Option<usize> {
    let stride = cell + margin;
    let n = (extent + margin) / stride;
    (n > 0 && n * stride == extent + margin).then_some(n)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Atlas where every pixel encodes its own coordinate.
    fn coordinate_atlas(w: usize, h: usize) -> Vec<Pixel> {
        (0..h)
            .flat_map(|y| (0..w).map(move |x| (x as Pixel) << 8 | y as Pixel))
            .collect()
    }

    #[test]
    fn slices_row_major_without_margin() {
        let sheet = SpriteSheet::from_pixels(4, 4, coordinate_atlas(4, 4), 2, 2, 0).unwrap();
        assert_eq!((sheet.columns(), sheet.rows()), (2, 2));
        assert_eq!(sheet.sprites().len(), 4);

        let s = sheet.sprite_at(1, 0).unwrap();
        assert_eq!(s.pixels(), &[2 << 8, 3 << 8, 2 << 8 | 1, 3 << 8 | 1]);
        assert_eq!(sheet.sprites()[1], s);
    }

    #[test]
    fn skips_margin_between_cells() {
        // 2 cells of 2px plus a 1px gap = 5px
        let sheet = SpriteSheet::from_pixels(5, 2, coordinate_atlas(5, 2), 2, 2, 1).unwrap();
        assert_eq!(sheet.columns(), 2);
        let s = sheet.sprite_at(1, 0).unwrap();
        assert_eq!(s.pixels()[0], 3 << 8);
    }

    #[test]
    fn rejects_partial_cells() {
        let err = SpriteSheet::from_pixels(5, 4, coordinate_atlas(5, 4), 2, 2, 0).unwrap_err();
        assert!(matches!(err, Error::AssetFormat { .. }));
    }

    #[test]
    fn sprite_at_is_strict() {
        let sheet = SpriteSheet::from_pixels(4, 2, coordinate_atlas(4, 2), 2, 2, 0).unwrap();
        assert!(matches!(sheet.sprite_at(2, 0), Err(Error::OutOfRange { .. })));
        assert!(matches!(sheet.sprite_at(0, 1), Err(Error::OutOfRange { .. })));
    }

    #[test]
    fn from_image_drops_alpha() {
        let image = Image {
            bytes: vec![0x12, 0x34, 0x56, 0x00, 0xAA, 0xBB, 0xCC, 0xFF],
            width: 2,
            height: 1,
        };
        let sheet = SpriteSheet::from_image(&image, 1, 1, 0).unwrap();
        assert_eq!(sheet.sprite_at(0, 0).unwrap().pixels(), &[0x123456]);
        assert_eq!(sheet.sprite_at(1, 0).unwrap().pixels(), &[0xAABBCC]);
    }
}
