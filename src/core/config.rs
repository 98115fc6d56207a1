//! Rule constants for a game.
//!
//! `RulesConfig::default()` is the standard two-deck game. Callers that host
//! variants build a config with the `with_*` methods, or deserialize one, and
//! hand it to `GameBuilder`.

use serde::{Deserialize, Serialize};

use super::error::GameError;
use crate::tiles::Color;

/// Tunable rule constants.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RulesConfig {
    /// Tiles dealt to every player at the start.
    pub hand_size: usize,

    /// Lowest number on a tile.
    pub min_number: u8,

    /// Highest number on a tile.
    pub max_number: u8,

    /// Number of full decks in the pack. Each deck adds one joker.
    pub decks: usize,

    /// Tiles drawn on a pass or an exceeded move timer.
    pub penalty_size: usize,

    /// Minimal sum of tile numbers in an initial meld.
    pub initial_meld_sum: u32,

    /// Smallest legal group.
    pub min_group_size: usize,

    /// Largest legal group.
    pub max_group_size: usize,

    /// Smallest legal run.
    pub min_run_size: usize,

    /// Fewest players a game can start with.
    pub min_players: usize,

    /// Most players a game can hold.
    pub max_players: usize,

    /// Move time limit. Advisory: the engine never reads a clock, callers
    /// set `timer_exceeded` on the request instead.
    pub move_time_limit_secs: u64,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            hand_size: 14,
            min_number: 1,
            max_number: 13,
            decks: 2,
            penalty_size: 3,
            initial_meld_sum: 30,
            min_group_size: 3,
            max_group_size: 4,
            min_run_size: 3,
            min_players: 2,
            max_players: 4,
            move_time_limit_secs: 60,
        }
    }
}

impl RulesConfig {
    /// Create the standard configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the starting hand size.
    #[must_use]
    pub fn with_hand_size(mut self, hand_size: usize) -> Self {
        self.hand_size = hand_size;
        self
    }

    /// Set the tile number range.
    #[must_use]
    pub fn with_numbers(mut self, min_number: u8, max_number: u8) -> Self {
        self.min_number = min_number;
        self.max_number = max_number;
        self
    }

    /// Set the number of decks.
    #[must_use]
    pub fn with_decks(mut self, decks: usize) -> Self {
        self.decks = decks;
        self
    }

    /// Set the pass/timeout penalty.
    #[must_use]
    pub fn with_penalty_size(mut self, penalty_size: usize) -> Self {
        self.penalty_size = penalty_size;
        self
    }

    /// Set the initial meld threshold.
    #[must_use]
    pub fn with_initial_meld_sum(mut self, sum: u32) -> Self {
        self.initial_meld_sum = sum;
        self
    }

    /// Set the allowed player count range.
    #[must_use]
    pub fn with_players(mut self, min_players: usize, max_players: usize) -> Self {
        self.min_players = min_players;
        self.max_players = max_players;
        self
    }

    /// Set the advisory move time limit.
    #[must_use]
    pub fn with_move_time_limit_secs(mut self, secs: u64) -> Self {
        self.move_time_limit_secs = secs;
        self
    }

    /// Distinct numbers per color.
    #[must_use]
    pub fn numbers_per_color(&self) -> usize {
        usize::from(self.max_number - self.min_number) + 1
    }

    /// Total tiles in the pack: `decks × (colors × numbers + 1 joker)`.
    #[must_use]
    pub fn pack_size(&self) -> usize {
        self.decks * (Color::REAL.len() * self.numbers_per_color() + 1)
    }

    /// Check that the settings describe a playable game.
    pub fn validate(&self) -> Result<(), GameError> {
        let reject = |reason: &str| Err(GameError::InvalidConfig(reason.to_string()));

        if self.min_number == 0 || self.min_number > self.max_number {
            return reject("tile numbers must satisfy 1 <= min <= max");
        }
        if self.decks == 0 {
            return reject("at least one deck is required");
        }
        if self.min_group_size == 0
            || self.min_group_size > self.max_group_size
            || self.max_group_size > Color::REAL.len()
        {
            return reject("group sizes must satisfy 1 <= min <= max <= 4");
        }
        if self.min_run_size == 0 {
            return reject("runs need at least one tile");
        }
        if self.min_players < 2 || self.min_players > self.max_players {
            return reject("player counts must satisfy 2 <= min <= max");
        }
        if self.max_players > usize::from(u8::MAX) {
            return reject("at most 255 players supported");
        }
        if self.max_players * self.hand_size > self.pack_size() {
            return reject("pack too small to deal every hand");
        }
        Ok(())
    }
}
