//! Core data structures for MD Studio
//!
//! This crate provides the fundamental types for representing Mega Drive
//! graphics data:
//! - `Colour` - A 24-bit RGB colour
//! - `Palette` - A fixed set of colours with per-colour used flags
//! - `Tile` - An 8x8 block of palette indices
//! - `Tileset` - Tiles addressed by `TileId`
//! - `Map` - A grid of tile identifiers backed by a tileset

mod colour;
mod map;
mod palette;
mod tile;
mod tileset;

pub use colour::Colour;
pub use map::{Map, MapError, DEFAULT_MAP_HEIGHT, DEFAULT_MAP_WIDTH, MAX_MAP_SIDE};
pub use palette::{Palette, PaletteId, COLOURS_PER_PALETTE, MAX_PALETTES};
pub use tile::{Tile, TILE_SIZE};
pub use tileset::{TileId, Tileset};
