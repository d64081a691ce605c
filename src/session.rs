//! The editing session: one owner for the map, the frame buffer and the scene.
//!
//! Input never touches this state directly. The shell pushes [`Command`]s,
//! which are applied at the start of the next tick on the loop thread.

use crate::catalog::{TileCatalog, TileId};
use crate::clock::FixedTimestep;
use crate::command::{Command, CommandQueue};
use crate::config::GameConfig;
use crate::error::Result;
use crate::geom::Rectangle;
use crate::map::TileMap;
use crate::render::{CameraController, Renderer};
use crate::scene::{Palette, Player, SceneNode, SceneObject, UpdateContext};
use crate::spatial::screen_to_grid;
use crate::tileset::SpriteSheet;
use anyhow::Context;
use macroquad::texture::Image;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

/// A running editor: map, frame buffer, scene and pending input.
pub struct Session {
    config: GameConfig,
    catalog: Arc<TileCatalog>,
    map: TileMap,
    renderer: Renderer,
    camera_ctl: CameraController,
    clock: FixedTimestep,
    commands: CommandQueue,
    scene: Vec<SceneNode>,
    selected: Option<TileId>,
}

impl Session {
    /// Load the sprite sheet, catalog and map named by `config`. Any failure aborts startup.
    pub fn bootstrap(config: GameConfig) -> anyhow::Result<Self> {
        config.validate().context("Validating configuration")?;

        let ts = config.tile_size as usize;
        let sheet = SpriteSheet::load(&config.sprites_path, ts, ts, config.sprite_margin as usize)
            .with_context(|| format!("Loading sprite sheet {}", config.sprites_path.display()))?;
        let catalog = TileCatalog::load(&config.tiles_path, &sheet)
            .with_context(|| format!("Loading tile catalog {}", config.tiles_path.display()))?;
        let catalog = Arc::new(catalog);
        let map = TileMap::load(&config.map_path, config.tile_size, Arc::clone(&catalog))
            .with_context(|| format!("Loading map {}", config.map_path.display()))?;

        Ok(Self::new(config, catalog, map)?)
    }

    /// Assemble a session from already loaded parts. Fails on an invalid `config`.
    pub fn new(config: GameConfig, catalog: Arc<TileCatalog>, map: TileMap) -> Result<Self> {
        config.validate()?;
        let renderer = Renderer::new(
            config.window_width as i32,
            config.window_height as i32,
            &config.displays,
            config.color_key,
        );
        let zoom = config.zoom;
        let cell = config.cell_pixels();

        let player = Player::new(
            config.window_width as i32 / 2,
            config.window_height as i32 / 2,
            config.tile_size as i32,
            (zoom, zoom),
            config.player_speed,
            config.player_color,
        );
        let selected = catalog.ids().next();
        let mut palette = Palette::new(
            Arc::clone(&catalog),
            cell,
            config.palette_spacing as i32,
            config.color_key,
        );
        palette.set_selected(selected);

        Ok(Self {
            camera_ctl: CameraController::new(config.camera_margin, config.camera_edge_pad),
            clock: FixedTimestep::new(config.ticks_per_second),
            commands: CommandQueue::new(),
            scene: vec![SceneNode::Player(player), SceneNode::Palette(palette)],
            renderer,
            catalog,
            map,
            config,
            selected,
        })
    }

    /// Configuration the session was built with.
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Map being edited.
    pub fn map(&self) -> &TileMap {
        &self.map
    }

    /// Frame buffer.
    pub fn renderer(&self) -> &Renderer {
        &self.renderer
    }

    /// Frame buffer, mutably.
    pub fn renderer_mut(&mut self) -> &mut Renderer {
        &mut self.renderer
    }

    /// Tile that clicks place.
    pub fn selected_tile(&self) -> Option<TileId> {
        self.selected
    }

    /// The player, if the scene has one.
    pub fn player(&self) -> Option<&Player> {
        self.scene.iter().find_map(|n| match n {
            SceneNode::Player(p) => Some(p),
            _ => None,
        })
    }

    fn player_mut(&mut self) -> Option<&mut Player> {
        self.scene.iter_mut().find_map(|n| match n {
            SceneNode::Player(p) => Some(p),
            _ => None,
        })
    }

    /// The palette, if the scene has one.
    pub fn palette(&self) -> Option<&Palette> {
        self.scene.iter().find_map(|n| match n {
            SceneNode::Palette(p) => Some(p),
            _ => None,
        })
    }

    fn palette_mut(&mut self) -> Option<&mut Palette> {
        self.scene.iter_mut().find_map(|n| match n {
            SceneNode::Palette(p) => Some(p),
            _ => None,
        })
    }

    /// Queue a command for the next tick.
    pub fn push(&mut self, cmd: Command) {
        self.commands.push(cmd);
    }

    /// Commands waiting for the next tick.
    pub fn pending_commands(&self) -> usize {
        self.commands.len()
    }

    /// One loop iteration: run every tick `elapsed` made due, then render once.
    /// Returns the number of ticks run.
    pub fn frame(&mut self, elapsed: Duration) -> u32 {
        let ticks = self.clock.advance(elapsed);
        for _ in 0..ticks {
            self.tick();
        }
        self.render();
        ticks
    }

    /// Apply queued commands, update the scene, then move the camera.
    pub fn tick(&mut self) {
        let pending: Vec<Command> = self.commands.drain().collect();
        for cmd in pending {
            self.apply(cmd);
        }

        let zoom = self.config.zoom;
        let ctx = UpdateContext {
            map_px: self.map.pixel_size(zoom, zoom),
        };
        for node in &mut self.scene {
            node.update(&ctx);
        }

        if let Some(tracked) = self.player().map(Player::world_rect) {
            let cam = *self.renderer.camera();
            let mut next = cam;
            self.camera_ctl.follow_and_clamp(
                &mut next,
                &tracked,
                ctx.map_px,
                (cam.width, cam.height),
            );
            *self.renderer.camera_mut() = next;
        }
    }

    fn apply(&mut self, cmd: Command) {
        let zoom = self.config.zoom;
        match cmd {
            Command::PrimaryClick { x, y } => {
                let pointer = Rectangle::new(x, y, 1, 1);
                let camera = *self.renderer.camera();
                let consumed = self
                    .scene
                    .iter_mut()
                    .find_map(|n| n.handle_pointer(&pointer, &camera, zoom, zoom));
                match consumed {
                    Some(follow_up) => self.apply(follow_up),
                    None => self.paint(x, y),
                }
            }
            Command::SecondaryClick { x, y } => self.erase(x, y),
            Command::SelectTile(id) => {
                if self.catalog.get(id).is_none() {
                    tracing::warn!(tile = id.0, "selected tile is not in the catalog");
                    return;
                }
                tracing::debug!(tile = id.0, "tile selected");
                self.selected = Some(id);
                if let Some(p) = self.palette_mut() {
                    p.set_selected(Some(id));
                }
            }
            Command::Steer { dx, dy } => {
                if let Some(p) = self.player_mut() {
                    p.set_direction(dx, dy);
                }
            }
            Command::Save => {
                if let Err(e) = self.map.save() {
                    tracing::error!(error = %e, "saving the map failed");
                }
            }
            Command::TogglePalette => {
                if let Some(p) = self.palette_mut() {
                    p.toggle();
                }
            }
            Command::Resize { width, height } => self.renderer.resize(width, height),
            Command::LoadMap(path) => self.load_map(&path),
        }
    }

    fn cell_px(&self) -> (i32, i32) {
        let c = self.config.cell_pixels();
        (c, c)
    }

    fn paint(&mut self, x: i32, y: i32) {
        let Some(id) = self.selected else {
            return;
        };
        let cell = screen_to_grid(x, y, self.renderer.camera(), self.cell_px());
        if let Err(e) = self.map.set_tile(cell.x, cell.y, id) {
            tracing::warn!(error = %e, "placing tile failed");
        }
    }

    fn erase(&mut self, x: i32, y: i32) {
        let layer = match self.catalog.layer_of(self.selected) {
            Ok(layer) => layer,
            Err(e) => {
                tracing::warn!(error = %e, "removing tile failed");
                return;
            }
        };
        let cell = screen_to_grid(x, y, self.renderer.camera(), self.cell_px());
        self.map.remove_tile(cell.x, cell.y, layer);
    }

    /// Swap in another map built on the same catalog. On failure the current map stays.
    fn load_map(&mut self, path: &Path) {
        match TileMap::load(path, self.config.tile_size, Arc::clone(&self.catalog)) {
            Ok(map) => self.map = map,
            Err(e) => tracing::error!(path = %path.display(), error = %e, "loading map failed"),
        }
    }

    /// Draw the map, then the scene objects, into the frame buffer.
    pub fn render(&mut self) {
        let zoom = self.config.zoom;
        self.map.render(&mut self.renderer, zoom, zoom);
        for node in &self.scene {
            node.render(&mut self.renderer, zoom, zoom);
        }
    }

    /// Copy the finished frame to `surface` and clear the buffer for the next one.
    pub fn present_to(&mut self, surface: &mut Image) {
        self.renderer.present_to(surface);
        self.renderer.clear();
    }
}
