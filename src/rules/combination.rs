//! Meld validation with joker inference.
//!
//! A candidate tile list is either a *group* (same number, distinct colors)
//! or a *run* (consecutive numbers, one color). Validation resolves every
//! joker in the candidate to the tile it stands in for; a candidate that is
//! neither has its jokers reset to neutral.
//!
//! Candidates are always copies of the tiles in hands and on the table, so a
//! failed validation never touches game state. The resolved tiles are only
//! written back when the whole action succeeds.

use serde::{Deserialize, Serialize};

use crate::core::{GameError, RulesConfig};
use crate::tiles::{Color, Tile};

/// Kind of a validated meld.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CombinationKind {
    /// Same number, distinct colors.
    #[serde(rename = "G")]
    Group,
    /// Consecutive numbers, same color.
    #[serde(rename = "R")]
    Run,
}

/// A validated meld, tiles sorted ascending by (resolved) number.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Combination {
    tiles: Vec<Tile>,
    kind: CombinationKind,
}

impl Combination {
    /// Validate `tiles` as a group or a run.
    ///
    /// ```
    /// use rummy_engine::core::RulesConfig;
    /// use rummy_engine::rules::{Combination, CombinationKind};
    /// use rummy_engine::tiles::parse_tiles;
    ///
    /// let config = RulesConfig::default();
    /// let run = Combination::validate(parse_tiles("r11 J r9").unwrap(), &config).unwrap();
    /// assert_eq!(run.kind(), CombinationKind::Run);
    /// assert_eq!(run.to_string(), "[r9 J(r10) r11]");
    /// ```
    pub fn validate(mut tiles: Vec<Tile>, config: &RulesConfig) -> Result<Self, GameError> {
        let kind = resolve(&mut tiles, config).ok_or(GameError::NotACombination)?;
        tiles.sort_by_key(|t| t.number);
        Ok(Self { tiles, kind })
    }

    /// Validate `tiles` as a player's first meld: a legal combination whose
    /// resolved numbers sum to at least `config.initial_meld_sum`.
    pub fn validate_initial_meld(tiles: Vec<Tile>, config: &RulesConfig) -> Result<Self, GameError> {
        let combination = Self::validate(tiles, config)?;
        let sum = combination.value();
        if sum < config.initial_meld_sum {
            return Err(GameError::InitialMeldTooLow {
                sum,
                required: config.initial_meld_sum,
            });
        }
        Ok(combination)
    }

    /// Group or run.
    #[must_use]
    pub fn kind(&self) -> CombinationKind {
        self.kind
    }

    /// The tiles, ascending by number.
    #[must_use]
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    /// Number of tiles.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    /// Always false for a validated combination; present for API symmetry.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Sum of resolved tile numbers.
    #[must_use]
    pub fn value(&self) -> u32 {
        self.tiles.iter().map(Tile::value).sum()
    }

    /// Give up the tiles, e.g. to pool them into a new candidate.
    #[must_use]
    pub fn into_tiles(self) -> Vec<Tile> {
        self.tiles
    }
}

impl std::fmt::Display for Combination {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[")?;
        for (i, tile) in self.tiles.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{tile}")?;
        }
        write!(f, "]")
    }
}

/// Resolve `tiles` in place as a group, else as a run.
///
/// On success every joker carries the number and color it stands in for.
/// On failure every joker is neutral.
pub fn resolve(tiles: &mut [Tile], config: &RulesConfig) -> Option<CombinationKind> {
    if resolve_group(tiles, config) {
        return Some(CombinationKind::Group);
    }
    if resolve_run(tiles, config) {
        return Some(CombinationKind::Run);
    }

    for tile in tiles.iter_mut() {
        tile.clear_if_joker();
    }
    None
}

fn resolve_group(tiles: &mut [Tile], config: &RulesConfig) -> bool {
    if tiles.len() < config.min_group_size || tiles.len() > config.max_group_size {
        return false;
    }

    let mut number = None;
    let mut used: Vec<Color> = Vec::with_capacity(Color::REAL.len());

    for tile in tiles.iter().filter(|t| !t.is_joker()) {
        match number {
            None => number = Some(tile.number),
            Some(n) if n != tile.number => return false,
            Some(_) => {}
        }
        if used.contains(&tile.color) {
            return false;
        }
        used.push(tile.color);
    }

    // A group needs at least one real tile to fix its number.
    let Some(number) = number else {
        return false;
    };

    let mut free = Color::REAL.into_iter().filter(|c| !used.contains(c));
    for joker in tiles.iter_mut().filter(|t| t.is_joker()) {
        let Some(color) = free.next() else {
            return false;
        };
        joker.impersonate(number, color);
    }

    true
}

fn resolve_run(tiles: &mut [Tile], config: &RulesConfig) -> bool {
    if tiles.len() < config.min_run_size {
        return false;
    }

    for tile in tiles.iter_mut() {
        tile.clear_if_joker();
    }
    tiles.sort_by_key(|t| t.number);

    // Every joker is credit: internal gaps first, then extension.
    let jokers = tiles.iter().take_while(|t| t.is_joker()).count();
    if jokers == tiles.len() {
        return false;
    }

    let (joker_slots, reals) = tiles.split_at_mut(jokers);
    let color = reals[reals.len() - 1].color;
    if reals.iter().any(|t| t.color != color) {
        return false;
    }

    let mut credit = jokers;
    let mut values: Vec<u8> = Vec::with_capacity(jokers);
    let mut last = reals[0].number;

    for tile in &reals[1..] {
        if tile.number <= last {
            return false;
        }
        let gap = usize::from(tile.number - last - 1);
        if gap > credit {
            return false;
        }
        credit -= gap;
        values.extend(last + 1..tile.number);
        last = tile.number;
    }

    // Leftover jokers extend the run upward, then downward once the top
    // number is reached.
    let mut first = reals[0].number;
    while credit > 0 && last < config.max_number {
        last += 1;
        values.push(last);
        credit -= 1;
    }
    while credit > 0 && first > config.min_number {
        first -= 1;
        values.push(first);
        credit -= 1;
    }
    if credit > 0 {
        return false;
    }

    for (joker, number) in joker_slots.iter_mut().zip(values) {
        joker.impersonate(number, color);
    }

    true
}
