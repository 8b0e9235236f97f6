//! Arc consistency preprocessing (AC-3).
//!
//! # Algorithm
//!
//! 1. Queue every ordered pair `(xi, xj)` of distinct consumers
//! 2. Pop a pair and revise: drop each value of `xi` with no compatible
//!    value in `xj`
//! 3. If `xi` lost values: stop on an empty domain, otherwise re-queue
//!    `(xk, xi)` for every `xk` other than `xi` and `xj`
//! 4. Repeat until the queue is empty
//!
//! Arc consistency is necessary but not sufficient: a consistent result
//! can still have no full assignment.
//!
//! # Reference
//!
//! Mackworth, A. K. (1977). "Consistency in Networks of Relations",
//! *Artificial Intelligence* 8(1), 99-118.

use std::collections::VecDeque;

use super::constraint::compatible;
use super::domain::Domains;
use crate::model::SlotProblem;

/// Outcome of an AC-3 pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ac3Outcome {
    /// Every remaining value has support in every other domain.
    Consistent,
    /// The domain of this consumer was emptied.
    Wipeout {
        /// Index of the consumer whose domain became empty.
        consumer: usize,
    },
}

/// Result of an AC-3 pass, with work counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ac3Report {
    /// Consistency outcome.
    pub outcome: Ac3Outcome,
    /// Number of `revise` calls.
    pub revisions: usize,
    /// Number of values removed across all domains.
    pub removed: usize,
}

impl Ac3Report {
    /// Whether the pass ended without a wipeout.
    pub fn is_consistent(&self) -> bool {
        self.outcome == Ac3Outcome::Consistent
    }
}

/// AC-3 engine.
pub struct ArcConsistency;

impl ArcConsistency {
    /// Removes values of `xi` that have no compatible value in `xj`.
    ///
    /// Returns the number of values removed.
    pub fn revise(problem: &SlotProblem, domains: &mut Domains, xi: usize, xj: usize) -> usize {
        let prio_i = problem.consumer(xi).priority_score;
        let prio_j = problem.consumer(xj).priority_score;

        let support = domains.get(xj);
        let kept: Vec<_> = domains
            .get(xi)
            .iter()
            .filter(|v| support.iter().any(|w| compatible(v, prio_i, w, prio_j)))
            .cloned()
            .collect();

        let removed = domains.get(xi).len() - kept.len();
        if removed > 0 {
            domains.replace(xi, kept);
        }
        removed
    }

    /// Runs AC-3 to a fixpoint, pruning `domains` in place.
    ///
    /// Stops at the first wipeout; domains are then left partially pruned.
    pub fn run(problem: &SlotProblem, domains: &mut Domains) -> Ac3Report {
        let n = domains.len();
        let mut queue: VecDeque<(usize, usize)> = (0..n)
            .flat_map(|xi| (0..n).filter(move |&xj| xj != xi).map(move |xj| (xi, xj)))
            .collect();

        let mut report = Ac3Report {
            outcome: Ac3Outcome::Consistent,
            revisions: 0,
            removed: 0,
        };

        while let Some((xi, xj)) = queue.pop_front() {
            report.revisions += 1;
            let removed = Self::revise(problem, domains, xi, xj);
            if removed == 0 {
                continue;
            }
            report.removed += removed;

            if domains.get(xi).is_empty() {
                log::debug!(
                    "AC-3 wiped out domain of '{}' while revising against '{}'",
                    problem.consumer(xi).id,
                    problem.consumer(xj).id
                );
                report.outcome = Ac3Outcome::Wipeout { consumer: xi };
                return report;
            }

            queue.extend((0..n).filter(|&xk| xk != xi && xk != xj).map(|xk| (xk, xi)));
        }

        log::debug!(
            "AC-3 consistent after {} revisions, {} values removed",
            report.revisions,
            report.removed
        );
        report
    }
}
