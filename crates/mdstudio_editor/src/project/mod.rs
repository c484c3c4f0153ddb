//! Project management for the editor
//!
//! This module handles the Project resource and its file save/load.

mod file;

pub use file::*;

use bevy::prelude::Resource;
use mdstudio_core::{
    Colour, Map, Palette, PaletteId, Tile, TileId, COLOURS_PER_PALETTE, MAX_PALETTES,
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use uuid::Uuid;

/// Project file format version written by this editor
pub const PROJECT_VERSION: u32 = 1;

/// Colours of the palette created for new projects
const DEFAULT_PALETTE: [Colour; COLOURS_PER_PALETTE] = [
    Colour::new(0x00, 0x00, 0x00),
    Colour::new(0xFF, 0xFF, 0xFF),
    Colour::new(0xB6, 0xB6, 0xB6),
    Colour::new(0x6C, 0x6C, 0x6C),
    Colour::new(0xDA, 0x24, 0x24),
    Colour::new(0x91, 0x00, 0x00),
    Colour::new(0xFF, 0xB6, 0x48),
    Colour::new(0xDA, 0x91, 0x00),
    Colour::new(0xFF, 0xFF, 0x48),
    Colour::new(0x48, 0xB6, 0x24),
    Colour::new(0x00, 0x6C, 0x00),
    Colour::new(0x48, 0xDA, 0xFF),
    Colour::new(0x24, 0x6C, 0xDA),
    Colour::new(0x00, 0x24, 0x91),
    Colour::new(0xB6, 0x6C, 0xDA),
    Colour::new(0x6C, 0x24, 0x48),
];

/// The entire editor project
#[derive(Debug, Clone, Serialize, Deserialize, Resource)]
pub struct Project {
    pub version: u32,
    pub id: Uuid,
    pub name: String,
    map: Map,
    palettes: Vec<Palette>,
    /// Tile placed by the left mouse button
    #[serde(default)]
    paint_tile: Option<TileId>,
    /// Tile placed by the right mouse button
    #[serde(default)]
    erase_tile: Option<TileId>,
    /// Colour index selected in the palette view
    #[serde(default)]
    paint_colour: Option<u8>,
    #[serde(skip)]
    pub path: Option<PathBuf>,
    #[serde(skip)]
    pub dirty: bool,
    /// Set when the whole map needs redrawing to the canvas
    #[serde(skip)]
    map_invalidated: bool,
}

impl Default for Project {
    fn default() -> Self {
        Self::with_defaults(
            "Untitled".to_string(),
            mdstudio_core::DEFAULT_MAP_WIDTH,
            mdstudio_core::DEFAULT_MAP_HEIGHT,
        )
    }
}

impl Project {
    /// Create an empty project with no palettes and an empty tileset
    pub fn new(name: String, width: u32, height: u32) -> Self {
        Self {
            version: PROJECT_VERSION,
            id: Uuid::new_v4(),
            name,
            map: Map::new(width, height),
            palettes: Vec::new(),
            paint_tile: None,
            erase_tile: None,
            paint_colour: None,
            path: None,
            dirty: false,
            map_invalidated: true,
        }
    }

    /// Create a project with a starter palette and tileset.
    ///
    /// Tile 0 is blank and tiles 1..=16 are solid fills of each palette colour.
    pub fn with_defaults(name: String, width: u32, height: u32) -> Self {
        let mut project = Self::new(name, width, height);
        project.add_palette(Palette::from_colours(&DEFAULT_PALETTE));

        let tileset = project.map.tileset_mut();
        let blank = tileset.add_tile(Tile::new(0));
        for index in 0..COLOURS_PER_PALETTE as u8 {
            tileset.add_tile(Tile::filled(0, index));
        }

        project.erase_tile = Some(blank);
        project.paint_tile = Some(blank + 1);
        project
    }

    pub fn map(&self) -> &Map {
        &self.map
    }

    /// Mutable map access. Marks the project modified.
    pub fn map_mut(&mut self) -> &mut Map {
        self.dirty = true;
        &mut self.map
    }

    /// Get a palette by ID
    pub fn palette(&self, id: PaletteId) -> Option<&Palette> {
        self.palettes.get(id as usize)
    }

    /// Get a mutable palette by ID
    pub fn palette_mut(&mut self, id: PaletteId) -> Option<&mut Palette> {
        self.palettes.get_mut(id as usize)
    }

    /// Add a palette, returning its ID. Fails once `MAX_PALETTES` exist.
    pub fn add_palette(&mut self, palette: Palette) -> Option<PaletteId> {
        if self.palettes.len() >= MAX_PALETTES {
            return None;
        }
        self.palettes.push(palette);
        self.dirty = true;
        Some((self.palettes.len() - 1) as PaletteId)
    }

    pub fn num_palettes(&self) -> usize {
        self.palettes.len()
    }

    /// Flag (or clear) the whole map as needing a full redraw
    pub fn invalidate_map(&mut self, invalidated: bool) {
        self.map_invalidated = invalidated;
    }

    pub fn map_is_invalidated(&self) -> bool {
        self.map_invalidated
    }

    pub fn paint_tile(&self) -> Option<TileId> {
        self.paint_tile
    }

    pub fn set_paint_tile(&mut self, tile: Option<TileId>) {
        self.paint_tile = tile;
    }

    pub fn erase_tile(&self) -> Option<TileId> {
        self.erase_tile
    }

    pub fn set_erase_tile(&mut self, tile: Option<TileId>) {
        self.erase_tile = tile;
    }

    pub fn paint_colour(&self) -> Option<u8> {
        self.paint_colour
    }

    pub fn set_paint_colour(&mut self, colour: Option<u8>) {
        self.paint_colour = colour;
    }

    /// Mark project as modified
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Check if project has unsaved changes
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Drop data that loaded files may carry beyond editor limits
    pub fn validate_and_cleanup(&mut self) {
        if self.palettes.len() > MAX_PALETTES {
            bevy::log::warn!(
                "Project '{}' has {} palettes, keeping the first {}",
                self.name,
                self.palettes.len(),
                MAX_PALETTES
            );
            self.palettes.truncate(MAX_PALETTES);
            self.dirty = true;
        }

        let tile_count = self.map.tileset().len() as TileId;
        if self.paint_tile.is_some_and(|t| t >= tile_count) {
            self.paint_tile = None;
        }
        if self.erase_tile.is_some_and(|t| t >= tile_count) {
            self.erase_tile = None;
        }
    }
}
