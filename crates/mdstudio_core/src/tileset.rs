//! Tileset: tiles addressed by identifier

use crate::Tile;
use serde::{Deserialize, Serialize};

/// Identifier of a tile within a tileset
pub type TileId = u32;

/// Ordered collection of tiles
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Tileset {
    tiles: Vec<Tile>,
}

impl Tileset {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a tile by ID
    pub fn get_tile(&self, id: TileId) -> Option<&Tile> {
        self.tiles.get(id as usize)
    }

    /// Get a mutable tile by ID
    pub fn get_tile_mut(&mut self, id: TileId) -> Option<&mut Tile> {
        self.tiles.get_mut(id as usize)
    }

    /// Append a tile, returning its ID
    pub fn add_tile(&mut self, tile: Tile) -> TileId {
        self.tiles.push(tile);
        (self.tiles.len() - 1) as TileId
    }

    /// Iterate over all tiles with their IDs
    pub fn iter(&self) -> impl Iterator<Item = (TileId, &Tile)> {
        self.tiles
            .iter()
            .enumerate()
            .map(|(idx, tile)| (idx as TileId, tile))
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_and_get_tile() {
        let mut tileset = Tileset::new();
        assert!(tileset.is_empty());

        let first = tileset.add_tile(Tile::filled(0, 1));
        let second = tileset.add_tile(Tile::filled(1, 2));
        assert_eq!(first, 0);
        assert_eq!(second, 1);
        assert_eq!(tileset.len(), 2);
        assert_eq!(tileset.get_tile(1).map(|t| t.palette_id()), Some(1));
        assert!(tileset.get_tile(2).is_none());
    }
}
