//! Solver configuration.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// How the degree tie-break of variable selection is computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum DegreeHeuristic {
    /// Number of other unassigned consumers.
    ///
    /// Identical for every candidate variable, so it never changes the
    /// selection. Kept as the default for reproducible orderings.
    #[default]
    UnassignedCount,
    /// Number of other unassigned consumers with at least one candidate
    /// that conflicts with one of this consumer's candidates.
    ConflictDegree,
}

/// What the daily budget is charged with when a consumer is placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum BudgetAccounting {
    /// The consumer's nominal need.
    ///
    /// Over-reserving candidates are charged less than the slot time they
    /// actually hold.
    #[default]
    Need,
    /// The total duration of the chosen candidate.
    Reserved,
}

/// Configuration for [`super::BacktrackingSolver`].
///
/// # Examples
///
/// ```
/// use u_slotplan::csp::{BudgetAccounting, SolverConfig};
///
/// let config = SolverConfig::default()
///     .with_budget_accounting(BudgetAccounting::Reserved)
///     .with_time_limit_ms(500);
/// assert_eq!(config.time_limit_ms, Some(500));
/// assert!(config.run_arc_consistency);
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SolverConfig {
    /// Run AC-3 on the generated domains before searching.
    pub run_arc_consistency: bool,

    /// Filter unassigned domains after each placement and reject values
    /// that empty any of them.
    pub forward_checking: bool,

    /// Degree tie-break used by variable selection.
    pub degree_heuristic: DegreeHeuristic,

    /// Budget charging rule.
    pub budget_accounting: BudgetAccounting,

    /// Optional wall-clock limit in milliseconds.
    ///
    /// Checked before every branching step and between value attempts;
    /// the solve stops once the elapsed time reaches the limit, so `0`
    /// stops at the first check. `None` disables the limit (the default).
    pub time_limit_ms: Option<u64>,

    /// Optional cap on the number of search nodes expanded.
    pub max_nodes: Option<u64>,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            run_arc_consistency: true,
            forward_checking: true,
            degree_heuristic: DegreeHeuristic::default(),
            budget_accounting: BudgetAccounting::default(),
            time_limit_ms: None,
            max_nodes: None,
        }
    }
}

impl SolverConfig {
    /// Enables or disables AC-3 preprocessing.
    pub fn with_arc_consistency(mut self, enabled: bool) -> Self {
        self.run_arc_consistency = enabled;
        self
    }

    /// Enables or disables forward checking.
    pub fn with_forward_checking(mut self, enabled: bool) -> Self {
        self.forward_checking = enabled;
        self
    }

    /// Sets the degree tie-break.
    pub fn with_degree_heuristic(mut self, heuristic: DegreeHeuristic) -> Self {
        self.degree_heuristic = heuristic;
        self
    }

    /// Sets the budget charging rule.
    pub fn with_budget_accounting(mut self, accounting: BudgetAccounting) -> Self {
        self.budget_accounting = accounting;
        self
    }

    /// Sets a wall-clock limit.
    pub fn with_time_limit_ms(mut self, ms: u64) -> Self {
        self.time_limit_ms = Some(ms);
        self
    }

    /// Sets a node limit.
    pub fn with_max_nodes(mut self, nodes: u64) -> Self {
        self.max_nodes = Some(nodes);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = SolverConfig::default();
        assert!(config.run_arc_consistency);
        assert!(config.forward_checking);
        assert_eq!(config.degree_heuristic, DegreeHeuristic::UnassignedCount);
        assert_eq!(config.budget_accounting, BudgetAccounting::Need);
        assert!(config.time_limit_ms.is_none());
        assert!(config.max_nodes.is_none());
    }

    #[test]
    fn test_config_builder() {
        let config = SolverConfig::default()
            .with_arc_consistency(false)
            .with_forward_checking(false)
            .with_degree_heuristic(DegreeHeuristic::ConflictDegree)
            .with_budget_accounting(BudgetAccounting::Reserved)
            .with_time_limit_ms(250)
            .with_max_nodes(10_000);

        assert!(!config.run_arc_consistency);
        assert!(!config.forward_checking);
        assert_eq!(config.degree_heuristic, DegreeHeuristic::ConflictDegree);
        assert_eq!(config.budget_accounting, BudgetAccounting::Reserved);
        assert_eq!(config.time_limit_ms, Some(250));
        assert_eq!(config.max_nodes, Some(10_000));
    }
}
