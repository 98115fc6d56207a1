//! Tiles and the places they live outside the table.
//!
//! - `Color`, `Tile`: the value types
//! - `Bank`: the undealt draw pile, built from the full pack
//! - `Hand`: a player's tiles, addressed by index

pub mod color;
pub mod tile;
pub mod bank;
pub mod hand;

pub use color::Color;
pub use tile::{parse_tiles, Tile, JOKER_NUMBER};
pub use bank::{full_pack, Bank};
pub use hand::Hand;
