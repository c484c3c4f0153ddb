//! Palettes of colours with used/unused flags

use crate::Colour;
use serde::{Deserialize, Serialize};

/// Number of colours in a single palette
pub const COLOURS_PER_PALETTE: usize = 16;

/// Maximum number of palettes a project can hold
pub const MAX_PALETTES: usize = 4;

/// Index of a palette within a project
pub type PaletteId = u8;

/// An ordered set of colours.
///
/// Each slot carries a used flag. Unused slots are drawn as a hatch pattern
/// by the editor instead of their stored colour.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Palette {
    colours: [Colour; COLOURS_PER_PALETTE],
    used: [bool; COLOURS_PER_PALETTE],
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            colours: [Colour::BLACK; COLOURS_PER_PALETTE],
            used: [false; COLOURS_PER_PALETTE],
        }
    }
}

impl Palette {
    /// Create a palette with every slot unused
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a palette from a list of colours, marking each given slot used
    pub fn from_colours(colours: &[Colour]) -> Self {
        let mut palette = Self::default();
        for (index, colour) in colours.iter().take(COLOURS_PER_PALETTE).enumerate() {
            palette.set_colour(index, *colour);
        }
        palette
    }

    /// Get the colour at a slot
    pub fn colour(&self, index: usize) -> Option<Colour> {
        self.colours.get(index).copied()
    }

    /// Set the colour at a slot and mark it used
    pub fn set_colour(&mut self, index: usize, colour: Colour) {
        if index < COLOURS_PER_PALETTE {
            self.colours[index] = colour;
            self.used[index] = true;
        }
    }

    /// Check whether a slot is in use
    pub fn is_colour_used(&self, index: usize) -> bool {
        self.used.get(index).copied().unwrap_or(false)
    }

    /// Mark a slot used or unused without touching its colour
    pub fn set_colour_used(&mut self, index: usize, used: bool) {
        if index < COLOURS_PER_PALETTE {
            self.used[index] = used;
        }
    }

    /// Number of slots currently in use
    pub fn used_count(&self) -> usize {
        self.used.iter().filter(|u| **u).count()
    }
}
