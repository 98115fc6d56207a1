//! # rummy-engine
//!
//! Rule engine for tile rummy: a shared table of groups and runs, private
//! hands, jokers that stand in for any tile, and an initial meld threshold.
//!
//! ## Design Principles
//!
//! 1. **Validate, then commit**: every action is checked against copies of
//!    the tiles it touches. A rejected action changes nothing.
//!
//! 2. **Tiles are values**: a joker's impersonation is a field of the tile
//!    held by its combination. Jokers leaving the table are neutralised.
//!
//! 3. **Configuration Over Convention**: hand size, number range, decks,
//!    penalty and thresholds live in `RulesConfig`.
//!
//! ## Architecture
//!
//! - **Append-only history**: every placed combination gets a step number;
//!   the live table maps step numbers to combinations.
//!
//! - **Persistent Data Structures**: the history is an `im::Vector`, so a
//!   `Game` clones cheaply for snapshots.
//!
//! - **Caller-driven timing**: there are no internal timers; callers flag
//!   expired turns on the request.
//!
//! ## Modules
//!
//! - `core`: players, RNG, rules configuration, errors
//! - `tiles`: tiles, the bank, hands
//! - `rules`: combination validation and player stages
//! - `table`: step numbers, the live table, the history log
//! - `game`: requests, state snapshots, the `Game` aggregate
//!
//! ## Example
//!
//! ```
//! use rummy_engine::{ActionKind, ActionRequest, GameBuilder, parse_tiles};
//!
//! let mut game = GameBuilder::new().players(["alice", "bob"]).seed(1).build().unwrap();
//! game.start_with_hands(&[
//!     parse_tiles("r9 r10 r11 k2").unwrap(),
//!     parse_tiles("b1 b2 b3").unwrap(),
//! ]).unwrap();
//!
//! let meld = ActionRequest::new("alice", ActionKind::InitialMeld).with_pieces(&[0, 1, 2]);
//! game.handle_action(&meld).unwrap();
//!
//! assert_eq!(game.field_size(), 1);
//! assert_eq!(game.current_player(), Some("bob"));
//! ```

pub mod core;
pub mod tiles;
pub mod rules;
pub mod table;
pub mod game;

// Re-export commonly used types
pub use crate::core::{
    ErrorClass, GameError,
    GameRng, GameRngState,
    PlayerId, PlayerMap, Roster,
    RulesConfig,
};

pub use crate::tiles::{parse_tiles, Bank, Color, Hand, Tile, JOKER_NUMBER};

pub use crate::rules::{Combination, CombinationKind, Stage};

pub use crate::table::{Field, History, Step, StepId};

pub use crate::game::{
    ActionKind, ActionRequest, ActionResponse,
    FieldView, Game, GameBuilder, State,
};
