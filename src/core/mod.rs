//! Core engine types: players, RNG, rule configuration, errors.
//!
//! These are the building blocks every other module depends on.

pub mod player;
pub mod rng;
pub mod config;
pub mod error;

pub use player::{PlayerId, PlayerMap, Roster};
pub use rng::{GameRng, GameRngState};
pub use config::RulesConfig;
pub use error::{ErrorClass, GameError};
