//! Game rules independent of any particular table state.
//!
//! - `combination`: group/run validation and joker inference
//! - `stage`: which actions each player stage permits

pub mod combination;
pub mod stage;

pub use combination::{resolve, Combination, CombinationKind};
pub use stage::Stage;
