//! Per-player state snapshots.
//!
//! A snapshot is what one player may see: their own hand, the whole table,
//! and public counters. Other players' hands are never included.

use serde::{Deserialize, Serialize};

use super::action::ActionKind;
use crate::core::GameError;
use crate::rules::CombinationKind;
use crate::table::StepId;
use crate::tiles::Tile;

/// One live table combination as shown to players.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldView {
    pub step: StepId,
    /// Name of the player who placed it.
    pub owner: String,
    pub kind: CombinationKind,
    pub tiles: Vec<Tile>,
}

/// Snapshot of the game from one player's seat.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct State {
    /// True when it is this player's turn.
    pub turn: bool,
    pub hand: Vec<Tile>,
    /// Empty unless it is this player's turn in a running game.
    pub available_actions: Vec<ActionKind>,
    pub started: bool,
    pub finished: bool,
    pub winner: Option<String>,
    pub field: Vec<FieldView>,
    pub bank_size: usize,
}

impl State {
    /// Encode as JSON.
    pub fn to_json(&self) -> Result<String, GameError> {
        Ok(serde_json::to_string(self)?)
    }
}
