//! The live table: combinations currently laid down, by step.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::step::StepId;
use crate::core::GameError;
use crate::rules::Combination;

/// Combinations on the table, keyed directly by their step number.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Field {
    combinations: BTreeMap<StepId, Combination>,
}

impl Field {
    /// Create an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live combinations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.combinations.len()
    }

    /// True when nothing is on the table.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.combinations.is_empty()
    }

    /// Combination placed at `step`, if it is still on the table.
    pub fn get(&self, step: StepId) -> Result<&Combination, GameError> {
        self.combinations
            .get(&step)
            .ok_or(GameError::NoSuchCombination(step))
    }

    /// Check whether `step` is on the table.
    #[must_use]
    pub fn contains(&self, step: StepId) -> bool {
        self.combinations.contains_key(&step)
    }

    /// Lay down a combination under a fresh step.
    pub fn insert(&mut self, step: StepId, combination: Combination) {
        self.combinations.insert(step, combination);
    }

    /// Take a combination off the table.
    pub fn remove(&mut self, step: StepId) -> Option<Combination> {
        self.combinations.remove(&step)
    }

    /// Live combinations in placement order.
    pub fn iter(&self) -> impl Iterator<Item = (StepId, &Combination)> {
        self.combinations.iter().map(|(s, c)| (*s, c))
    }

    /// Total tiles on the table.
    #[must_use]
    pub fn tile_count(&self) -> usize {
        self.combinations.values().map(Combination::len).sum()
    }
}
