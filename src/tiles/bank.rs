//! The full tile pack and the undealt draw pile.

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

use super::color::Color;
use super::tile::Tile;
use crate::core::{GameRng, RulesConfig};

/// Build every tile of a fresh game: for each deck, one joker followed by
/// every color's numbers in ascending order.
#[must_use]
pub fn full_pack(config: &RulesConfig) -> Vec<Tile> {
    let mut pack = Vec::with_capacity(config.pack_size());

    for _ in 0..config.decks {
        pack.push(Tile::joker());
        for color in Color::REAL {
            for number in config.min_number..=config.max_number {
                pack.push(Tile::numbered(number, color));
            }
        }
    }

    pack
}

/// Undealt tiles. The front is always what gets dealt or drawn.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bank {
    tiles: VecDeque<Tile>,
}

impl Bank {
    /// A bank holding the full pack in pack order.
    #[must_use]
    pub fn full(config: &RulesConfig) -> Self {
        Self {
            tiles: full_pack(config).into(),
        }
    }

    /// Number of undealt tiles.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    /// True when nothing is left to draw.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Shuffle in place.
    pub fn shuffle(&mut self, rng: &mut GameRng) {
        rng.shuffle(self.tiles.make_contiguous());
    }

    /// Take up to `count` tiles from the front. Returns fewer when the bank
    /// runs short, none when it is empty.
    pub fn draw(&mut self, count: usize) -> Vec<Tile> {
        let count = count.min(self.tiles.len());
        self.tiles.drain(..count).collect()
    }

    /// Take out the first tile equal to `tile`, jokers matched as neutral.
    pub fn take(&mut self, tile: &Tile) -> Option<Tile> {
        let wanted = tile.cleared();
        let pos = self.tiles.iter().position(|t| *t == wanted)?;
        self.tiles.remove(pos)
    }

    /// Return tiles to the back of the bank, neutralising jokers.
    pub fn put_back(&mut self, tiles: impl IntoIterator<Item = Tile>) {
        self.tiles.extend(tiles.into_iter().map(Tile::cleared));
    }

    /// Iterate over the undealt tiles from the front.
    pub fn iter(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.iter()
    }
}
