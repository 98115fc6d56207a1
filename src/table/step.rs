//! Step identifiers.
//!
//! Every placement of a combination gets the next step number. Step 0 is
//! the sentinel at the head of the history and never holds a combination.

use serde::{Deserialize, Serialize};

/// Sequential placement number.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StepId(pub u32);

impl StepId {
    /// The sentinel head of every history.
    pub const SENTINEL: StepId = StepId(0);

    /// Create a new step ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw step number.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// True for step 0.
    #[must_use]
    pub const fn is_sentinel(self) -> bool {
        self.0 == 0
    }

    /// The step placed just before this one, `None` for the sentinel.
    #[must_use]
    pub fn prev(self) -> Option<StepId> {
        self.0.checked_sub(1).map(StepId)
    }

    /// The step number following this one.
    #[must_use]
    pub const fn succ(self) -> StepId {
        StepId(self.0 + 1)
    }
}

impl std::fmt::Display for StepId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
