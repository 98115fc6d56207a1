//! The tile value type.
//!
//! A joker is a tile like any other, with `joker` set. While it sits in a
//! validated combination it carries the number and color it stands in for;
//! anywhere else it is neutral (number 0, `Color::Joker`).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::color::Color;
use crate::core::GameError;

/// Number shown by a neutral joker.
pub const JOKER_NUMBER: u8 = 0;

/// A single tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tile {
    pub number: u8,
    pub color: Color,
    pub joker: bool,
}

impl Tile {
    /// Create a numbered tile. Needs a real color and a number from 1.
    pub fn new(number: u8, color: Color) -> Result<Self, GameError> {
        if !color.is_real() || number == JOKER_NUMBER {
            return Err(GameError::InvalidTile(format!("{color:?} {number}")));
        }
        Ok(Self::numbered(number, color))
    }

    /// Numbered tile from inputs already known to be valid.
    pub(crate) const fn numbered(number: u8, color: Color) -> Self {
        Self {
            number,
            color,
            joker: false,
        }
    }

    /// Create a neutral joker.
    #[must_use]
    pub const fn joker() -> Self {
        Self {
            number: JOKER_NUMBER,
            color: Color::Joker,
            joker: true,
        }
    }

    /// Check if this is a joker, impersonating or not.
    #[must_use]
    pub const fn is_joker(&self) -> bool {
        self.joker
    }

    /// True for a joker not standing in for any tile.
    #[must_use]
    pub fn is_neutral_joker(&self) -> bool {
        self.joker && self.number == JOKER_NUMBER && self.color == Color::Joker
    }

    /// Make a joker stand in for `number` of `color`. No-op on numbered tiles.
    pub fn impersonate(&mut self, number: u8, color: Color) {
        if self.joker {
            self.number = number;
            self.color = color;
        }
    }

    /// Reset a joker to neutral. No-op on numbered tiles.
    pub fn clear_if_joker(&mut self) {
        if self.joker {
            self.number = JOKER_NUMBER;
            self.color = Color::Joker;
        }
    }

    /// Same tile with joker impersonation cleared.
    #[must_use]
    pub fn cleared(mut self) -> Self {
        self.clear_if_joker();
        self
    }

    /// Face value, counting an impersonating joker as the tile it stands for.
    #[must_use]
    pub fn value(&self) -> u32 {
        u32::from(self.number)
    }
}

impl fmt::Display for Tile {
    /// `k7` for black 7, `J` for a neutral joker, `J(k7)` for a joker
    /// standing in for black 7.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_neutral_joker() {
            write!(f, "J")
        } else if self.joker {
            write!(f, "J({}{})", self.color.letter(), self.number)
        } else {
            write!(f, "{}{}", self.color.letter(), self.number)
        }
    }
}

impl FromStr for Tile {
    type Err = GameError;

    /// Parse `J` (joker) or a color letter followed by a number: `r13`, `k1`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || GameError::InvalidTile(s.to_string());

        if s.eq_ignore_ascii_case("j") {
            return Ok(Tile::joker());
        }

        let mut chars = s.chars();
        let color = chars.next().and_then(Color::from_letter).ok_or_else(invalid)?;
        let number: u8 = chars.as_str().parse().map_err(|_| invalid())?;
        if number == JOKER_NUMBER {
            return Err(invalid());
        }

        Ok(Tile::numbered(number, color))
    }
}

/// Parse a whitespace-separated list of tiles, e.g. `"r9 r10 J"`.
pub fn parse_tiles(s: &str) -> Result<Vec<Tile>, GameError> {
    s.split_whitespace().map(str::parse).collect()
}
