//! Constraint satisfaction core.
//!
//! Each consumer is a variable whose domain is the set of slot subsets
//! covering its need. Two placements are compatible when they share no
//! slot and, for different priorities, the more important consumer
//! finishes before the other starts. A daily budget caps the total.
//!
//! # Key Components
//!
//! - **Domains**: [`generate_domain`], [`Domains`] — ranked candidate sets
//! - **Constraint**: [`compatible`], [`conflict`] — pairwise predicate
//! - **Propagation**: [`ArcConsistency`] — AC-3 preprocessing
//! - **Ordering**: [`select_next`] — variable selection
//! - **Search**: [`BacktrackingSolver`] — depth-first search with forward checking
//!
//! # References
//!
//! Russell & Norvig (2021), "Artificial Intelligence: A Modern Approach", Ch. 6

mod ac3;
mod config;
mod constraint;
mod domain;
mod error;
mod heuristics;
mod solver;

pub use ac3::{Ac3Outcome, Ac3Report, ArcConsistency};
pub use config::{BudgetAccounting, DegreeHeuristic, SolverConfig};
pub use constraint::{compatible, conflict, Conflict};
pub use domain::{generate_domain, Domains};
pub use error::SolveError;
pub use heuristics::{degree, select_next};
pub use solver::{Assignment, BacktrackingSolver, Placement, SearchStats, SlotSolver, Solution};
