//! Per-player stage: which actions a player may take.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::game::ActionKind;

const INITIAL_MELD_ACTIONS: [ActionKind; 2] = [ActionKind::InitialMeld, ActionKind::Pass];

const MAIN_GAME_ACTIONS: [ActionKind; 7] = [
    ActionKind::AddPiece,
    ActionKind::RemovePiece,
    ActionKind::ReplacePiece,
    ActionKind::AddCombination,
    ActionKind::ConcatCombinations,
    ActionKind::SplitCombination,
    ActionKind::Pass,
];

/// Stage of a single player. Players move from `InitialMeld` to `MainGame`
/// once, on their own successful initial meld, and never back.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Stage {
    /// Has not laid down an initial meld yet.
    #[default]
    InitialMeld,
    /// May rearrange the table freely.
    MainGame,
}

impl Stage {
    /// Actions permitted in this stage.
    #[must_use]
    pub fn available_actions(self) -> &'static [ActionKind] {
        match self {
            Stage::InitialMeld => &INITIAL_MELD_ACTIONS,
            Stage::MainGame => &MAIN_GAME_ACTIONS,
        }
    }

    /// Check whether `action` is permitted in this stage.
    #[must_use]
    pub fn permits(self, action: ActionKind) -> bool {
        self.available_actions().contains(&action)
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::InitialMeld => write!(f, "initial meld stage"),
            Stage::MainGame => write!(f, "main game stage"),
        }
    }
}
