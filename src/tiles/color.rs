//! Tile colors.

use serde::{Deserialize, Serialize};

/// Color of a tile. `Joker` is the color of a joker that is not currently
/// standing in for a real tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Color {
    Black,
    Red,
    Blue,
    Orange,
    #[serde(rename = "jokerColor")]
    Joker,
}

impl Color {
    /// The four colors real tiles come in, in pack order.
    pub const REAL: [Color; 4] = [Color::Black, Color::Red, Color::Blue, Color::Orange];

    /// Short letter used in the text form of tiles.
    #[must_use]
    pub const fn letter(self) -> char {
        match self {
            Color::Black => 'k',
            Color::Red => 'r',
            Color::Blue => 'b',
            Color::Orange => 'o',
            Color::Joker => 'J',
        }
    }

    /// Parse a real color from its letter.
    #[must_use]
    pub fn from_letter(letter: char) -> Option<Self> {
        Color::REAL
            .into_iter()
            .find(|c| c.letter() == letter.to_ascii_lowercase())
    }

    /// True for the four real colors.
    #[must_use]
    pub fn is_real(self) -> bool {
        self != Color::Joker
    }
}
