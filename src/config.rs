//! Startup configuration.
//!
//! Tile size, zoom, color key and asset paths live in one immutable
//! [`GameConfig`] that is handed to constructors.

use crate::error::{Error, Result};
use crate::tileset::Pixel;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// A display resolution in physical pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct DisplaySize {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl DisplaySize {
    /// A `width x height` display.
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// Settings fixed for the lifetime of a session.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Window title.
    pub window_title: String,
    /// Initial window width, and camera width.
    pub window_width: u32,
    /// Initial window height, and camera height.
    pub window_height: u32,
    /// Resolutions of the attached displays; the frame buffer is sized to the largest.
    pub displays: Vec<DisplaySize>,

    /// Edge length of one atlas cell and one map cell, in source pixels.
    pub tile_size: u32,
    /// Integer scale applied to every world blit.
    pub zoom: u32,
    /// Pixel value treated as fully transparent (`0xRRGGBB`).
    pub color_key: Pixel,
    /// Gap between atlas cells, in pixels.
    pub sprite_margin: u32,

    /// Simulation ticks per second.
    pub ticks_per_second: u32,

    /// Distance from a map edge that pins the camera.
    pub camera_margin: i32,
    /// Gap between map edge and viewport edge once pinned.
    pub camera_edge_pad: i32,

    /// Gap between palette buttons, in screen pixels.
    pub palette_spacing: u32,
    /// Player movement per tick, in world pixels.
    pub player_speed: i32,
    /// Fill color of the player rectangle.
    pub player_color: Pixel,

    /// Sprite atlas image.
    pub sprites_path: PathBuf,
    /// Tile catalog text file.
    pub tiles_path: PathBuf,
    /// Map text file, also the save target.
    pub map_path: PathBuf,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            window_title: "tilesmith".to_owned(),
            window_width: 1400,
            window_height: 1000,
            displays: vec![DisplaySize::new(1920, 1080)],
            tile_size: 32,
            zoom: 2,
            color_key: 0x80FF00,
            sprite_margin: 0,
            ticks_per_second: 60,
            camera_margin: 96,
            camera_edge_pad: 64,
            palette_spacing: 2,
            player_speed: 4,
            player_color: 0x3050C8,
            sprites_path: PathBuf::from("assets/sprites.png"),
            tiles_path: PathBuf::from("assets/tiles.txt"),
            map_path: PathBuf::from("assets/map.txt"),
        }
    }
}

impl GameConfig {
    /// Read a JSON configuration file. Missing fields fall back to [`GameConfig::default`].
    ///
    /// Relative asset paths are resolved against the configuration file's directory.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let p = path.as_ref();
        let txt = std::fs::read_to_string(p).map_err(|source| Error::io(p, source))?;
        let mut cfg: GameConfig = serde_json::from_str(&txt).map_err(|source| Error::Config {
            path: p.to_path_buf(),
            source,
        })?;

        let base = p
            .parent()
            .map(|d| d.to_path_buf())
            .unwrap_or_else(|| PathBuf::from("./"));
        for asset in [
            &mut cfg.sprites_path,
            &mut cfg.tiles_path,
            &mut cfg.map_path,
        ] {
            if asset.is_relative() {
                *asset = base.join(&*asset);
            }
        }

        cfg.validate()?;
        tracing::info!(path = %p.display(), "configuration loaded");
        Ok(cfg)
    }

    /// Reject settings that would divide by zero later on.
    pub fn validate(&self) -> Result<()> {
        let checks = [
            (self.tile_size, "tile_size"),
            (self.zoom, "zoom"),
            (self.ticks_per_second, "ticks_per_second"),
        ];
        for (value, name) in checks {
            if value == 0 {
                return Err(Error::config(0, format!("{name} must be greater than zero")));
            }
        }
        Ok(())
    }

    /// On-screen edge length of one map cell.
    #[inline]
    pub fn cell_pixels(&self) -> i32 {
        (self.tile_size * self.zoom) as i32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_use_reference_values() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("game.json");
        std::fs::write(&path, r#"{ "zoom": 3, "map_path": "level2.txt" }"#).expect("write");

        let cfg = GameConfig::load(&path).expect("load");
        assert_eq!(cfg.zoom, 3);
        assert_eq!(cfg.tile_size, 32);
        assert_eq!(cfg.color_key, 0x80FF00);
        assert_eq!(cfg.map_path, dir.path().join("level2.txt"));
        assert_eq!(cfg.cell_pixels(), 96);
    }

    #[test]
    fn rejects_zero_zoom() {
        let cfg = GameConfig {
            zoom: 0,
            ..GameConfig::default()
        };
        assert!(matches!(cfg.validate(), Err(Error::ConfigFormat { .. })));
    }

    #[test]
    fn returns_typed_error_for_malformed_json() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("game.json");
        std::fs::write(&path, "{ not json").expect("write");

        let err = GameConfig::load(&path).unwrap_err();
        assert!(matches!(err, Error::Config { .. }));
    }
}
