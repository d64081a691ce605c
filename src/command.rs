use crate::catalog::TileId;
use std::collections::VecDeque;
use std::path::PathBuf;

/// Something the player or editor asked for. Produced by input handling,
/// consumed by the next simulation tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Left click at screen coordinates.
    PrimaryClick {
        /// Screen x.
        x: i32,
        /// Screen y.
        y: i32,
    },
    /// Right click at screen coordinates.
    SecondaryClick {
        /// Screen x.
        x: i32,
        /// Screen y.
        y: i32,
    },
    /// Make this tile the one clicks place.
    SelectTile(TileId),
    /// Held movement direction, each axis in `-1..=1`. Stays in effect until replaced.
    Steer {
        /// Horizontal direction.
        dx: i32,
        /// Vertical direction.
        dy: i32,
    },
    /// Write the map back to its source file.
    Save,
    /// Show or hide the tile palette.
    TogglePalette,
    /// Window resized to `width x height`.
    Resize {
        /// New window width.
        width: i32,
        /// New window height.
        height: i32,
    },
    /// Replace the map with another file built on the same catalog.
    LoadMap(PathBuf),
}

/// FIFO of pending commands, drained once per tick.
#[derive(Debug, Default)]
pub struct CommandQueue {
    pending: VecDeque<Command>,
}

impl CommandQueue {
    /// Empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a command.
    pub fn push(&mut self, cmd: Command) {
        self.pending.push_back(cmd);
    }

    /// Number of pending commands.
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// True when nothing is pending.
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Take everything queued so far, oldest first.
    pub fn drain(&mut self) -> impl Iterator<Item = Command> + '_ {
        self.pending.drain(..)
    }
}
