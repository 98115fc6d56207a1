//! The game itself: requests in, state snapshots out.
//!
//! - `action`: request and response shapes
//! - `state`: per-player snapshots
//! - `engine`: the `Game` aggregate and its action handlers
//! - `builder`: `GameBuilder` for players, rules and seed

pub mod action;
pub mod state;
pub mod engine;
pub mod builder;

pub use action::{ActionKind, ActionRequest, ActionResponse};
pub use state::{FieldView, State};
pub use engine::{leading_player, Game};
pub use builder::GameBuilder;
