//! Shared table state: step numbering, live combinations, placement log.

pub mod step;
pub mod field;
pub mod history;

pub use step::StepId;
pub use field::Field;
pub use history::{History, Step};
