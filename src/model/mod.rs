//! Planning domain types.
//!
//! - [`TimeSlot`] / [`SlotCatalog`]: the fixed daily reservation windows
//! - [`Consumer`] / [`PriorityMap`]: demands and their priority ordering
//! - [`CandidateAssignment`]: one slot subset covering a demand
//! - [`SlotProblem`]: a validated instance ready to solve

mod candidate;
mod consumer;
mod problem;
mod slot;

pub use candidate::CandidateAssignment;
pub use consumer::{Consumer, PriorityMap};
pub use problem::SlotProblem;
pub use slot::{ParseSlotError, SlotCatalog, TimeSlot};
