//! Action requests and responses.
//!
//! A request names the acting player, the action kind, and the things it
//! points at: hand tiles by index, table combinations by step, an index
//! inside a combination, a split position. Which of these an action needs is
//! checked by the handler for that action.
//!
//! ```
//! use rummy_engine::game::{ActionKind, ActionRequest};
//!
//! let request = ActionRequest::new("alice", ActionKind::AddPiece)
//!     .with_pieces(&[4])
//!     .with_combinations(&[2]);
//!
//! let json = request.to_json().unwrap();
//! assert_eq!(ActionRequest::from_json(&json).unwrap(), request);
//! ```

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;

use crate::core::GameError;
use crate::table::StepId;

/// Every action a player can request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ActionKind {
    /// First meld, worth at least the initial meld sum.
    InitialMeld,
    /// Add one hand tile to a table combination.
    AddPiece,
    /// Take one tile out of a table combination into the hand.
    RemovePiece,
    /// Swap a hand tile with a tile in a table combination.
    ReplacePiece,
    /// Lay down a new combination from hand.
    AddCombination,
    /// Merge two or more table combinations.
    ConcatCombinations,
    /// Split a table combination in two.
    SplitCombination,
    /// Draw penalty tiles and end the turn.
    Pass,
}

impl ActionKind {
    /// Every action kind.
    pub const ALL: [ActionKind; 8] = [
        ActionKind::InitialMeld,
        ActionKind::AddPiece,
        ActionKind::RemovePiece,
        ActionKind::ReplacePiece,
        ActionKind::AddCombination,
        ActionKind::ConcatCombinations,
        ActionKind::SplitCombination,
        ActionKind::Pass,
    ];

    /// Wire name of the action.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            ActionKind::InitialMeld => "initialMeld",
            ActionKind::AddPiece => "addPiece",
            ActionKind::RemovePiece => "removePiece",
            ActionKind::ReplacePiece => "replacePiece",
            ActionKind::AddCombination => "addCombination",
            ActionKind::ConcatCombinations => "concatCombinations",
            ActionKind::SplitCombination => "splitCombination",
            ActionKind::Pass => "pass",
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A player's request to act.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionRequest {
    /// Name of the acting player.
    pub player: String,

    /// What to do.
    pub action: ActionKind,

    /// Hand indices of the tiles put on the table.
    #[serde(default)]
    pub added_pieces: SmallVec<[usize; 4]>,

    /// Index of a tile inside the referenced combination.
    #[serde(default)]
    pub removed_piece: Option<usize>,

    /// Split the referenced combination before this index.
    #[serde(default, alias = "splitAfterIndex")]
    pub split_before_index: Option<usize>,

    /// Steps of the table combinations involved.
    #[serde(default)]
    pub used_combinations: SmallVec<[StepId; 4]>,

    /// Set by the caller when the move timer ran out. Turns the request into
    /// a penalty draw whatever the action.
    #[serde(default)]
    pub timer_exceeded: bool,
}

impl ActionRequest {
    /// Create a request with no references.
    pub fn new(player: impl Into<String>, action: ActionKind) -> Self {
        Self {
            player: player.into(),
            action,
            added_pieces: SmallVec::new(),
            removed_piece: None,
            split_before_index: None,
            used_combinations: SmallVec::new(),
            timer_exceeded: false,
        }
    }

    /// Reference hand tiles by index.
    #[must_use]
    pub fn with_pieces(mut self, indices: &[usize]) -> Self {
        self.added_pieces = SmallVec::from_slice(indices);
        self
    }

    /// Reference a tile inside the combination.
    #[must_use]
    pub fn with_removed_piece(mut self, index: usize) -> Self {
        self.removed_piece = Some(index);
        self
    }

    /// Set the split position.
    #[must_use]
    pub fn with_split_before(mut self, index: usize) -> Self {
        self.split_before_index = Some(index);
        self
    }

    /// Reference table combinations by step number.
    #[must_use]
    pub fn with_combinations(mut self, steps: &[u32]) -> Self {
        self.used_combinations = steps.iter().copied().map(StepId::new).collect();
        self
    }

    /// Mark the move timer as exceeded.
    #[must_use]
    pub fn timed_out(mut self) -> Self {
        self.timer_exceeded = true;
        self
    }

    /// Parse a JSON request.
    pub fn from_json(json: &str) -> Result<Self, GameError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Encode as JSON.
    pub fn to_json(&self) -> Result<String, GameError> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Outcome of handling one request.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionResponse {
    pub success: bool,
    #[serde(default)]
    pub error: Option<String>,
}

impl ActionResponse {
    /// The action was applied.
    #[must_use]
    pub fn success() -> Self {
        Self {
            success: true,
            error: None,
        }
    }

    /// The action was rejected; nothing changed.
    #[must_use]
    pub fn failure(error: &GameError) -> Self {
        Self {
            success: false,
            error: Some(error.to_string()),
        }
    }

    /// Encode as JSON.
    #[must_use]
    pub fn to_json(&self) -> String {
        serde_json::json!({
            "success": self.success,
            "error": self.error,
        })
        .to_string()
    }
}

impl From<&Result<(), GameError>> for ActionResponse {
    fn from(result: &Result<(), GameError>) -> Self {
        match result {
            Ok(()) => Self::success(),
            Err(e) => Self::failure(e),
        }
    }
}
