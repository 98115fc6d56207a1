//! Error type shared by setup, validation and action handling.
//!
//! Every failure is returned as a value; no error leaves the game state
//! changed.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::game::ActionKind;
use crate::rules::Stage;
use crate::table::StepId;

/// Coarse classification of a [`GameError`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ErrorClass {
    /// Game construction, lobby management, configuration.
    Setup,
    /// Malformed request or a reference to something that does not exist.
    Structural,
    /// Action not permitted in the player's stage.
    Stage,
    /// Wrong number of referenced tiles or combinations.
    Cardinality,
    /// Referenced tiles do not form a legal combination.
    Rule,
}

/// Errors reported by the engine.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum GameError {
    #[error("must be between {min} and {max} players")]
    PlayerCount { min: usize, max: usize },
    #[error("player {0} is already registered")]
    DuplicatePlayer(String),
    #[error("game already started")]
    AlreadyStarted,
    #[error("invalid rules config: {0}")]
    InvalidConfig(String),

    #[error("there is no player with id {0}")]
    UnknownPlayer(String),
    #[error("game is not started yet")]
    NotStarted,
    #[error("game is finished")]
    GameFinished,
    #[error("not your turn")]
    OutOfTurn,
    #[error("malformed request: {0}")]
    MalformedRequest(String),
    #[error("there is no piece with index {0}")]
    NoSuchPiece(usize),
    #[error("piece index {0} used more than once")]
    DuplicatePiece(usize),
    #[error("there is no combination with index {0}")]
    NoSuchCombination(StepId),
    #[error("combination {0} used more than once")]
    DuplicateCombination(StepId),
    #[error("index {index} out of range in combination {step}")]
    IndexOutOfRange { index: usize, step: StepId },
    #[error("invalid tile {0:?}")]
    InvalidTile(String),
    #[error("tile {0} is not in the bank")]
    TileNotInBank(String),
    #[error("corrupt history log: {0}")]
    CorruptHistory(String),

    #[error("wrong game stage for {action}: player is in {stage}")]
    WrongStage { action: ActionKind, stage: Stage },

    #[error("{action} needs {expected} piece(s) from hand, got {got}")]
    PieceCount {
        action: ActionKind,
        expected: &'static str,
        got: usize,
    },
    #[error("{action} needs {expected} combination(s), got {got}")]
    CombinationCount {
        action: ActionKind,
        expected: &'static str,
        got: usize,
    },
    #[error("{action} needs {field}")]
    MissingIndex {
        action: ActionKind,
        field: &'static str,
    },

    #[error("not a combination")]
    NotACombination,
    #[error("initial meld sums to {sum}, at least {required} required")]
    InitialMeldTooLow { sum: u32, required: u32 },
    #[error("can't create two valid combinations from splitting combination {step} on index {index}")]
    InvalidSplit { step: StepId, index: usize },
}

impl GameError {
    /// Classify this error.
    #[must_use]
    pub fn class(&self) -> ErrorClass {
        match self {
            Self::PlayerCount { .. }
            | Self::DuplicatePlayer(_)
            | Self::AlreadyStarted
            | Self::InvalidConfig(_) => ErrorClass::Setup,
            Self::UnknownPlayer(_)
            | Self::NotStarted
            | Self::GameFinished
            | Self::OutOfTurn
            | Self::MalformedRequest(_)
            | Self::NoSuchPiece(_)
            | Self::DuplicatePiece(_)
            | Self::NoSuchCombination(_)
            | Self::DuplicateCombination(_)
            | Self::IndexOutOfRange { .. }
            | Self::InvalidTile(_)
            | Self::TileNotInBank(_)
            | Self::CorruptHistory(_) => ErrorClass::Structural,
            Self::WrongStage { .. } => ErrorClass::Stage,
            Self::PieceCount { .. } | Self::CombinationCount { .. } | Self::MissingIndex { .. } => {
                ErrorClass::Cardinality
            }
            Self::NotACombination | Self::InitialMeldTooLow { .. } | Self::InvalidSplit { .. } => {
                ErrorClass::Rule
            }
        }
    }
}

impl From<serde_json::Error> for GameError {
    fn from(err: serde_json::Error) -> Self {
        Self::MalformedRequest(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let err = GameError::PlayerCount { min: 2, max: 4 };
        assert_eq!(err.to_string(), "must be between 2 and 4 players");

        let err = GameError::NoSuchCombination(StepId::new(7));
        assert_eq!(err.to_string(), "there is no combination with index 7");

        let err = GameError::PieceCount {
            action: ActionKind::AddPiece,
            expected: "exactly 1",
            got: 2,
        };
        assert_eq!(err.to_string(), "addPiece needs exactly 1 piece(s) from hand, got 2");
    }

    #[test]
    fn test_classes() {
        assert_eq!(GameError::AlreadyStarted.class(), ErrorClass::Setup);
        assert_eq!(GameError::NoSuchPiece(3).class(), ErrorClass::Structural);
        assert_eq!(
            GameError::WrongStage {
                action: ActionKind::AddPiece,
                stage: Stage::InitialMeld,
            }
            .class(),
            ErrorClass::Stage
        );
        assert_eq!(
            GameError::CombinationCount {
                action: ActionKind::ConcatCombinations,
                expected: "at least 2",
                got: 1,
            }
            .class(),
            ErrorClass::Cardinality
        );
        assert_eq!(GameError::NotACombination.class(), ErrorClass::Rule);
    }

    #[test]
    fn test_from_json_error() {
        let err: GameError = serde_json::from_str::<u32>("nope").unwrap_err().into();
        assert_eq!(err.class(), ErrorClass::Structural);
    }
}
