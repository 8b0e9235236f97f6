//! Plain-text schedule summary.

use std::fmt;

use crate::csp::Solution;
use crate::model::SlotProblem;

/// Renders a solution as one line per consumer, earliest start first,
/// followed by the budget usage.
///
/// ```text
/// P1 (high) -> 6-10
/// P2 (low) -> 10-14 & 14-18
///
/// Total pump time: 12 h / 12 h
/// ```
pub struct ScheduleReport<'a> {
    problem: &'a SlotProblem,
    solution: &'a Solution,
}

impl<'a> ScheduleReport<'a> {
    /// Creates a report for `solution` of `problem`.
    pub fn new(problem: &'a SlotProblem, solution: &'a Solution) -> Self {
        Self { problem, solution }
    }
}

impl fmt::Display for ScheduleReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut rows: Vec<_> = self.solution.assignment.iter().collect();
        rows.sort_by_key(|p| p.candidate.earliest_start());

        for p in rows {
            writeln!(
                f,
                "{} ({}) -> {}",
                p.consumer.id, p.consumer.priority_label, p.candidate
            )?;
        }
        writeln!(f)?;
        write!(
            f,
            "Total pump time: {} h / {} h",
            self.solution.assignment.total_need(),
            self.problem.budget()
        )
    }
}
