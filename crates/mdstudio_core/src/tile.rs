//! 8x8 indexed-colour tiles

use crate::PaletteId;
use serde::{Deserialize, Serialize};

/// Width and height of a tile in pixels
pub const TILE_SIZE: u32 = 8;

const PIXELS_PER_TILE: usize = (TILE_SIZE * TILE_SIZE) as usize;

/// An 8x8 block of palette colour indices
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    /// Row-major colour indices into the tile's palette
    pixels: Vec<u8>,
    palette_id: PaletteId,
}

impl Default for Tile {
    fn default() -> Self {
        Self::new(0)
    }
}

impl Tile {
    /// Create a tile filled with colour index 0
    pub fn new(palette_id: PaletteId) -> Self {
        Self {
            pixels: vec![0; PIXELS_PER_TILE],
            palette_id,
        }
    }

    /// Create a tile filled with a single colour index
    pub fn filled(palette_id: PaletteId, colour_index: u8) -> Self {
        Self {
            pixels: vec![colour_index; PIXELS_PER_TILE],
            palette_id,
        }
    }

    /// Palette this tile is drawn with
    pub fn palette_id(&self) -> PaletteId {
        self.palette_id
    }

    pub fn set_palette_id(&mut self, palette_id: PaletteId) {
        self.palette_id = palette_id;
    }

    /// Colour index at a pixel. Returns None outside the tile.
    pub fn pixel(&self, x: u32, y: u32) -> Option<u8> {
        if x >= TILE_SIZE || y >= TILE_SIZE {
            return None;
        }
        self.pixels.get((y * TILE_SIZE + x) as usize).copied()
    }

    /// Set the colour index at a pixel
    pub fn set_pixel(&mut self, x: u32, y: u32, colour_index: u8) {
        if x >= TILE_SIZE || y >= TILE_SIZE {
            return;
        }
        if let Some(pixel) = self.pixels.get_mut((y * TILE_SIZE + x) as usize) {
            *pixel = colour_index;
        }
    }
}
