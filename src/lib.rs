//! Slot-based reservation planning as a constraint satisfaction problem.
//!
//! A set of consumers (e.g. irrigation plots sharing one pump) each need a
//! number of hours out of a fixed daily catalog of time slots. The solver
//! assigns every consumer a subset of slots such that:
//!
//! - each consumer receives at least its need,
//! - no slot serves two consumers,
//! - a higher-priority consumer finishes before a lower-priority one starts,
//! - the total stays within the daily budget.
//!
//! # Modules
//!
//! - **`model`**: Domain types — `TimeSlot`, `SlotCatalog`, `Consumer`,
//!   `PriorityMap`, `CandidateAssignment`, `SlotProblem`
//! - **`csp`**: Domain generation, compatibility, AC-3, ordering heuristics
//!   and backtracking search
//! - **`validation`**: Input integrity checks (duplicate IDs, empty slots, budget)
//! - **`report`**: Plain-text schedule summary
//!
//! # Features
//!
//! - `serde`: `Serialize`/`Deserialize` for model and result types
//! - `parallel`: generate per-consumer domains on the rayon pool

pub mod csp;
pub mod model;
pub mod report;
pub mod validation;
