//! Map grid of tile identifiers

use crate::{TileId, Tileset, TILE_SIZE};
use serde::{Deserialize, Serialize};

/// Default map width in tiles
pub const DEFAULT_MAP_WIDTH: u32 = 64;
/// Default map height in tiles
pub const DEFAULT_MAP_HEIGHT: u32 = 32;
/// Largest map side in tiles (4096 pixels)
pub const MAX_MAP_SIDE: u32 = 512;

/// Reasons a stored map can't be used
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MapError {
    /// A side is zero or larger than `MAX_MAP_SIDE`
    InvalidSize { width: u32, height: u32 },
    /// The tile list doesn't hold exactly `width * height` entries
    TileCountMismatch { expected: usize, found: usize },
}

impl std::fmt::Display for MapError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MapError::InvalidSize { width, height } => write!(
                f,
                "map size {}x{} is outside 1..={} tiles",
                width, height, MAX_MAP_SIDE
            ),
            MapError::TileCountMismatch { expected, found } => {
                write!(f, "map has {} tiles, expected {}", found, expected)
            }
        }
    }
}

impl std::error::Error for MapError {}

/// Map as stored on disk, checked before it becomes a `Map`
#[derive(Deserialize)]
struct MapData {
    width: u32,
    height: u32,
    tiles: Vec<TileId>,
    #[serde(default)]
    tileset: Tileset,
}

impl TryFrom<MapData> for Map {
    type Error = MapError;

    fn try_from(data: MapData) -> Result<Self, Self::Error> {
        let side_ok = |side: u32| (1..=MAX_MAP_SIDE).contains(&side);
        if !side_ok(data.width) || !side_ok(data.height) {
            return Err(MapError::InvalidSize {
                width: data.width,
                height: data.height,
            });
        }

        let expected = data.width as usize * data.height as usize;
        if data.tiles.len() != expected {
            return Err(MapError::TileCountMismatch {
                expected,
                found: data.tiles.len(),
            });
        }

        Ok(Self {
            width: data.width,
            height: data.height,
            tiles: data.tiles,
            tileset: data.tileset,
        })
    }
}

/// A fixed-size grid of tile identifiers plus the tileset they index
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "MapData")]
pub struct Map {
    width: u32,
    height: u32,
    /// Row-major tile identifiers
    tiles: Vec<TileId>,
    #[serde(default)]
    tileset: Tileset,
}

impl Default for Map {
    fn default() -> Self {
        Self::new(DEFAULT_MAP_WIDTH, DEFAULT_MAP_HEIGHT)
    }
}

impl Map {
    /// Create a map with every cell set to tile 0.
    ///
    /// Each side is clamped to `1..=MAX_MAP_SIDE`.
    pub fn new(width: u32, height: u32) -> Self {
        let width = width.clamp(1, MAX_MAP_SIDE);
        let height = height.clamp(1, MAX_MAP_SIDE);
        Self {
            width,
            height,
            tiles: vec![0; (width * height) as usize],
            tileset: Tileset::new(),
        }
    }

    /// Width in tiles
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in tiles
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Size of the whole map in pixels
    pub fn pixel_size(&self) -> (u32, u32) {
        (self.width * TILE_SIZE, self.height * TILE_SIZE)
    }

    /// Get the tile at a cell
    pub fn get_tile(&self, x: u32, y: u32) -> Option<TileId> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.tiles.get((y * self.width + x) as usize).copied()
    }

    /// Overwrite the tile at a cell. Returns false if the cell is out of bounds.
    pub fn set_tile(&mut self, x: u32, y: u32, tile: TileId) -> bool {
        if x >= self.width || y >= self.height {
            return false;
        }
        match self.tiles.get_mut((y * self.width + x) as usize) {
            Some(cell) => {
                *cell = tile;
                true
            }
            None => false,
        }
    }

    /// Set every cell to the same tile
    pub fn fill(&mut self, tile: TileId) {
        self.tiles.iter_mut().for_each(|cell| *cell = tile);
    }

    pub fn tileset(&self) -> &Tileset {
        &self.tileset
    }

    pub fn tileset_mut(&mut self) -> &mut Tileset {
        &mut self.tileset
    }
}
