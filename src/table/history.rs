//! Append-only record of every combination ever placed.
//!
//! Steps live in an arena indexed by step number, so "previous" and "next"
//! are plain arithmetic. Slot 0 is the sentinel. Entries are never removed,
//! even after the combination leaves the table.
//!
//! The arena is an `im::Vector`, so cloning a game (for snapshots or
//! what-if evaluation) does not copy the log.

use im::Vector;
use serde::{Deserialize, Serialize};

use super::step::StepId;
use crate::core::{GameError, RulesConfig};
use crate::rules::Combination;

/// One placement event.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    /// Step number.
    pub id: StepId,
    /// Name of the player who placed the combination.
    pub player: String,
    /// The combination as placed.
    pub combination: Combination,
}

/// Chronological placement log.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct History {
    // steps[0] is the sentinel and is always None
    steps: Vector<Option<Step>>,
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}

impl History {
    /// Create a history holding only the sentinel.
    #[must_use]
    pub fn new() -> Self {
        let mut steps = Vector::new();
        steps.push_back(None);
        Self { steps }
    }

    /// Number of placements recorded (the sentinel is not counted).
    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len() - 1
    }

    /// True when nothing has been placed yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The sentinel head.
    #[must_use]
    pub fn first(&self) -> StepId {
        StepId::SENTINEL
    }

    /// The most recent step, or the sentinel.
    #[must_use]
    pub fn last(&self) -> StepId {
        StepId((self.steps.len() - 1) as u32)
    }

    /// The number the next placement will get.
    #[must_use]
    pub fn next_id(&self) -> StepId {
        self.last().succ()
    }

    /// Append a placement and return its step number.
    pub fn record(&mut self, player: &str, combination: Combination) -> StepId {
        let id = self.next_id();
        self.steps.push_back(Some(Step {
            id,
            player: player.to_string(),
            combination,
        }));
        id
    }

    /// Look up a recorded step. `None` for the sentinel and unknown steps.
    #[must_use]
    pub fn get(&self, id: StepId) -> Option<&Step> {
        self.steps.get(id.raw() as usize)?.as_ref()
    }

    /// The step before `id`; the sentinel has none.
    #[must_use]
    pub fn prev(&self, id: StepId) -> Option<StepId> {
        if id > self.last() {
            return None;
        }
        id.prev()
    }

    /// The step after `id`; the latest step has none.
    #[must_use]
    pub fn next(&self, id: StepId) -> Option<StepId> {
        (id < self.last()).then(|| id.succ())
    }

    /// Every recorded step in order, sentinel excluded.
    pub fn iter(&self) -> impl Iterator<Item = &Step> {
        self.steps.iter().filter_map(Option::as_ref)
    }

    /// Encode as a compact binary audit log.
    pub fn to_bytes(&self) -> Result<Vec<u8>, GameError> {
        bincode::serialize(self).map_err(|e| GameError::CorruptHistory(e.to_string()))
    }

    /// Decode an audit log produced by [`History::to_bytes`].
    ///
    /// Every decoded combination is run through the validator again under
    /// `config` and must come out exactly as stored.
    pub fn from_bytes(bytes: &[u8], config: &RulesConfig) -> Result<Self, GameError> {
        let corrupt = |reason: String| GameError::CorruptHistory(reason);

        let history: History = bincode::deserialize(bytes).map_err(|e| corrupt(e.to_string()))?;
        if !matches!(history.steps.front(), Some(None)) {
            return Err(corrupt("missing sentinel step".to_string()));
        }

        for (index, slot) in history.steps.iter().enumerate().skip(1) {
            let Some(step) = slot else {
                return Err(corrupt(format!("empty slot at step {index}")));
            };
            if usize::try_from(step.id.raw()) != Ok(index) {
                return Err(corrupt(format!("step {} stored at slot {index}", step.id)));
            }
            let revalidated = Combination::validate(step.combination.tiles().to_vec(), config)
                .map_err(|_| corrupt(format!("step {} is not a combination", step.id)))?;
            if revalidated != step.combination {
                return Err(corrupt(format!("step {} does not match its tiles", step.id)));
            }
        }

        Ok(history)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::RulesConfig;
    use crate::tiles::parse_tiles;

    fn combination(s: &str) -> Combination {
        Combination::validate(parse_tiles(s).unwrap(), &RulesConfig::default()).unwrap()
    }

    #[test]
    fn test_new_has_sentinel_only() {
        let history = History::new();

        assert!(history.is_empty());
        assert_eq!(history.first(), StepId::SENTINEL);
        assert_eq!(history.last(), StepId::SENTINEL);
        assert_eq!(history.next_id(), StepId::new(1));
        assert!(history.get(StepId::SENTINEL).is_none());
    }

    #[test]
    fn test_record_numbers_sequentially() {
        let mut history = History::new();
        let a = history.record("alice", combination("r1 r2 r3"));
        let b = history.record("bob", combination("b7 k7 o7"));

        assert_eq!(a, StepId::new(1));
        assert_eq!(b, StepId::new(2));
        assert_eq!(history.len(), 2);
        assert_eq!(history.get(b).unwrap().player, "bob");
    }

    #[test]
    fn test_links() {
        let mut history = History::new();
        history.record("alice", combination("r1 r2 r3"));
        history.record("alice", combination("r4 r5 r6"));

        assert_eq!(history.next(StepId::SENTINEL), Some(StepId::new(1)));
        assert_eq!(history.next(StepId::new(1)), Some(StepId::new(2)));
        assert_eq!(history.next(StepId::new(2)), None);
        assert_eq!(history.prev(StepId::new(2)), Some(StepId::new(1)));
        assert_eq!(history.prev(StepId::new(1)), Some(StepId::SENTINEL));
        assert_eq!(history.prev(StepId::SENTINEL), None);
        assert_eq!(history.prev(StepId::new(9)), None);
    }

    #[test]
    fn test_clone_is_independent() {
        let mut history = History::new();
        history.record("alice", combination("r1 r2 r3"));

        let snapshot = history.clone();
        history.record("bob", combination("b1 b2 b3"));

        assert_eq!(snapshot.len(), 1);
        assert_eq!(history.len(), 2);
    }

    #[test]
    fn test_binary_round_trip() {
        let mut history = History::new();
        history.record("alice", combination("r9 J r11"));

        let bytes = history.to_bytes().unwrap();
        let restored = History::from_bytes(&bytes, &RulesConfig::default()).unwrap();
        assert_eq!(restored, history);

        assert!(History::from_bytes(&[1, 2, 3], &RulesConfig::default()).is_err());
    }

    #[test]
    fn test_decode_rejects_tampered_combination() {
        let mut history = History::new();
        history.record("alice", combination("r9 r10 r11"));

        let mut value = serde_json::to_value(&history).unwrap();
        value["steps"][1]["combination"]["tiles"][0]["color"] = "blue".into();
        let forged: History = serde_json::from_value(value).unwrap();

        let bytes = forged.to_bytes().unwrap();
        let err = History::from_bytes(&bytes, &RulesConfig::default()).unwrap_err();
        assert_eq!(err, GameError::CorruptHistory("step 1 is not a combination".to_string()));
    }

    #[test]
    fn test_decode_checks_against_rules() {
        let mut history = History::new();
        history.record("alice", combination("r9 J r11"));
        let bytes = history.to_bytes().unwrap();

        let strict = RulesConfig {
            min_run_size: 4,
            ..RulesConfig::default()
        };
        let err = History::from_bytes(&bytes, &strict).unwrap_err();
        assert!(matches!(err, GameError::CorruptHistory(_)));
    }
}
