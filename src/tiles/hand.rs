//! A player's private tiles.
//!
//! Requests point at hand tiles by index, so the order is part of the
//! contract: tiles are appended at the end and removed by position.

use serde::{Deserialize, Serialize};

use super::tile::Tile;
use crate::core::GameError;

/// Tiles held by one player.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Hand {
    tiles: Vec<Tile>,
}

impl Hand {
    /// Create an empty hand.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of tiles held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    /// True when the player has gone out.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Tile at `index`.
    pub fn get(&self, index: usize) -> Result<&Tile, GameError> {
        self.tiles.get(index).ok_or(GameError::NoSuchPiece(index))
    }

    /// Copy out the tiles at `indices`, in request order.
    ///
    /// Fails on the first index that is out of range or repeated.
    pub fn gather(&self, indices: &[usize]) -> Result<Vec<Tile>, GameError> {
        let mut seen = vec![false; self.tiles.len()];
        let mut gathered = Vec::with_capacity(indices.len());

        for &index in indices {
            let tile = *self.get(index)?;
            if std::mem::replace(&mut seen[index], true) {
                return Err(GameError::DuplicatePiece(index));
            }
            gathered.push(tile);
        }

        Ok(gathered)
    }

    /// Append a tile, neutralising it if it is a joker.
    pub fn push(&mut self, tile: Tile) {
        self.tiles.push(tile.cleared());
    }

    /// Append several tiles.
    pub fn extend(&mut self, tiles: impl IntoIterator<Item = Tile>) {
        for tile in tiles {
            self.push(tile);
        }
    }

    /// Remove the tile at `index`.
    pub fn remove(&mut self, index: usize) -> Result<Tile, GameError> {
        if index >= self.tiles.len() {
            return Err(GameError::NoSuchPiece(index));
        }
        Ok(self.tiles.remove(index))
    }

    /// Remove the tiles at `indices`, highest index first so the remaining
    /// indices stay valid. Callers check the indices with [`Hand::gather`]
    /// first; out-of-range or repeated indices are skipped.
    pub fn remove_many(&mut self, indices: &[usize]) -> Vec<Tile> {
        let mut sorted = indices.to_vec();
        sorted.sort_unstable_by(|a, b| b.cmp(a));
        sorted.dedup();

        sorted
            .into_iter()
            .filter_map(|index| self.remove(index).ok())
            .collect()
    }

    /// Remove and return every tile.
    pub fn take_all(&mut self) -> Vec<Tile> {
        std::mem::take(&mut self.tiles)
    }

    /// Highest number in the hand; neutral jokers count as 0.
    #[must_use]
    pub fn largest_number(&self) -> u8 {
        self.tiles.iter().map(|t| t.number).max().unwrap_or(0)
    }

    /// The tiles in hand order.
    #[must_use]
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }
}

impl FromIterator<Tile> for Hand {
    fn from_iter<I: IntoIterator<Item = Tile>>(iter: I) -> Self {
        let mut hand = Hand::new();
        hand.extend(iter);
        hand
    }
}
