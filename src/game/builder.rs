//! Builder for [`Game`].
//!
//! ```
//! use rummy_engine::core::RulesConfig;
//! use rummy_engine::game::GameBuilder;
//!
//! let game = GameBuilder::new()
//!     .players(["alice", "bob", "carol"])
//!     .config(RulesConfig::default().with_penalty_size(2))
//!     .seed(42)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(game.player_count(), 3);
//! assert!(!game.is_started());
//! ```

use super::engine::Game;
use crate::core::{GameError, GameRng, GameRngState, Roster, RulesConfig};

/// Collects players, rules and seed before building a [`Game`].
#[derive(Clone, Debug, Default)]
pub struct GameBuilder {
    players: Vec<String>,
    config: RulesConfig,
    seed: Option<u64>,
    rng_state: Option<GameRngState>,
}

impl GameBuilder {
    /// Start with no players, default rules and an entropy seed.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register one player.
    #[must_use]
    pub fn player(mut self, name: impl Into<String>) -> Self {
        self.players.push(name.into());
        self
    }

    /// Register several players, in seat order.
    #[must_use]
    pub fn players<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.players.extend(names.into_iter().map(Into::into));
        self
    }

    /// Use these rules.
    #[must_use]
    pub fn config(mut self, config: RulesConfig) -> Self {
        self.config = config;
        self
    }

    /// Fix the RNG seed for a reproducible deal.
    #[must_use]
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Continue from a saved RNG state, e.g. one taken with
    /// [`Game::rng_state`]. Takes precedence over [`GameBuilder::seed`].
    #[must_use]
    pub fn rng_state(mut self, state: GameRngState) -> Self {
        self.rng_state = Some(state);
        self
    }

    /// Build a game ready to [`Game::start`]. Needs between `min_players` and
    /// `max_players` distinct names.
    pub fn build(self) -> Result<Game, GameError> {
        let (min, max) = (self.config.min_players, self.config.max_players);
        if !(min..=max).contains(&self.players.len()) {
            return Err(GameError::PlayerCount { min, max });
        }
        self.build_lobby()
    }

    /// Build a game that still accepts players through [`Game::add_player`].
    /// Up to `max_players` names may be given up front.
    pub fn build_lobby(self) -> Result<Game, GameError> {
        self.config.validate()?;

        let (min, max) = (self.config.min_players, self.config.max_players);
        if self.players.len() > max {
            return Err(GameError::PlayerCount { min, max });
        }

        let mut roster = Roster::new();
        for name in self.players {
            if roster.contains(&name) {
                return Err(GameError::DuplicatePlayer(name));
            }
            roster.push(name);
        }

        let rng = match (&self.rng_state, self.seed) {
            (Some(state), _) => GameRng::from_state(state),
            (None, Some(seed)) => GameRng::new(seed),
            (None, None) => GameRng::from_entropy(),
        };

        Ok(Game::from_parts(self.config, roster, rng))
    }
}
