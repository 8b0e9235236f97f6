//! Backtracking search with forward checking.
//!
//! # Algorithm
//!
//! 1. Generate every consumer's domain; an empty one ends the solve
//! 2. Optionally prune with AC-3; a wipeout ends the solve
//! 3. Depth-first search:
//!    a. Select the next consumer (see [`super::heuristics`])
//!    b. For each candidate in canonical order, reject it if it conflicts
//!       with a placed candidate or would exceed the daily budget
//!    c. Forward check: filter every other unassigned domain against the
//!       candidate; reject it if any becomes empty
//!    d. Place the candidate and recurse on the filtered domains; undo the
//!       placement if the subtree fails
//!
//! Each branch owns its domain map. Filtering replaces entries in a fresh
//! shallow copy, so the parent's domains are never touched. The partial
//! assignment is shared and follows a strict place/undo stack discipline.

use std::time::Instant;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::ac3::{Ac3Outcome, ArcConsistency};
use super::config::{BudgetAccounting, SolverConfig};
use super::constraint::compatible;
use super::domain::Domains;
use super::error::SolveError;
use super::heuristics::select_next;
use crate::model::{CandidateAssignment, Consumer, SlotProblem};

/// One consumer and the candidate chosen for it.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Placement {
    /// The consumer.
    pub consumer: Consumer,
    /// Its chosen slots.
    pub candidate: CandidateAssignment,
}

/// A complete assignment of candidates to consumers.
///
/// Placements are kept in the problem's consumer order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Assignment {
    placements: Vec<Placement>,
}

impl Assignment {
    /// Candidate chosen for consumer `id`.
    pub fn get(&self, id: &str) -> Option<&CandidateAssignment> {
        self.placements
            .iter()
            .find(|p| p.consumer.id == id)
            .map(|p| &p.candidate)
    }

    /// Placements in consumer order.
    pub fn iter(&self) -> impl Iterator<Item = &Placement> {
        self.placements.iter()
    }

    /// Number of placed consumers.
    pub fn len(&self) -> usize {
        self.placements.len()
    }

    /// Whether nothing is placed.
    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }

    /// Sum of nominal needs.
    pub fn total_need(&self) -> i64 {
        self.placements.iter().map(|p| p.consumer.need).sum()
    }

    /// Sum of slot time actually reserved.
    pub fn total_reserved(&self) -> i64 {
        self.placements
            .iter()
            .map(|p| p.candidate.total_duration())
            .sum()
    }
}

/// Work counters of one solve.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SearchStats {
    /// Branching steps expanded.
    pub nodes: u64,
    /// Placements undone after a failed subtree.
    pub backtracks: u64,
    /// Candidates rejected because forward checking emptied a domain.
    pub pruned_by_forward_check: u64,
    /// AC-3 `revise` calls.
    pub ac3_revisions: usize,
    /// Values removed by AC-3.
    pub ac3_removed: usize,
}

/// A successful solve.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Solution {
    /// The full assignment.
    pub assignment: Assignment,
    /// Work counters.
    pub stats: SearchStats,
    /// Wall-clock solve time in milliseconds.
    pub solve_time_ms: u64,
}

/// Trait for slot planning solvers.
pub trait SlotSolver {
    /// Solves the problem, returning a full assignment or the failure kind.
    fn solve(&self, problem: &SlotProblem) -> Result<Solution, SolveError>;
}

/// Depth-first CSP solver with AC-3 preprocessing and forward checking.
///
/// Deterministic: identical inputs always yield the same first solution.
///
/// # Examples
///
/// ```
/// use u_slotplan::csp::{BacktrackingSolver, SlotSolver};
/// use u_slotplan::model::{Consumer, PriorityMap, SlotProblem};
///
/// let priorities = PriorityMap::default();
/// let problem = SlotProblem::new(
///     "6-10;10-14;14-18".parse().unwrap(),
///     vec![
///         Consumer::new("P1", 4, "high", &priorities),
///         Consumer::new("P2", 4, "low", &priorities),
///     ],
///     8,
/// )
/// .unwrap();
///
/// let solution = BacktrackingSolver::default().solve(&problem).unwrap();
/// assert_eq!(solution.assignment.get("P1").unwrap().to_string(), "6-10");
/// assert_eq!(solution.assignment.get("P2").unwrap().to_string(), "10-14");
/// ```
#[derive(Debug, Clone, Default)]
pub struct BacktrackingSolver {
    config: SolverConfig,
}

impl BacktrackingSolver {
    /// Creates a solver with the given configuration.
    pub fn new(config: SolverConfig) -> Self {
        Self { config }
    }

    /// The active configuration.
    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Runs the search on already generated (and possibly pruned) domains.
    ///
    /// `domains` must hold one entry per consumer of `problem`.
    pub fn search(&self, problem: &SlotProblem, domains: &Domains) -> Result<Solution, SolveError> {
        self.search_from(problem, domains, Instant::now(), SearchStats::default())
    }

    fn search_from(
        &self,
        problem: &SlotProblem,
        domains: &Domains,
        started: Instant,
        stats: SearchStats,
    ) -> Result<Solution, SolveError> {
        let mut search = Search {
            problem,
            config: &self.config,
            started,
            placed: vec![None; problem.consumer_count()],
            assigned: vec![false; problem.consumer_count()],
            charged: 0,
            stats,
        };

        if !search.backtrack(domains)? {
            log::info!(
                "search exhausted after {} nodes, {} backtracks",
                search.stats.nodes,
                search.stats.backtracks
            );
            return Err(SolveError::SearchExhaustion {
                nodes: search.stats.nodes,
            });
        }

        let placements = problem
            .consumers()
            .iter()
            .zip(search.placed)
            .filter_map(|(consumer, candidate)| {
                candidate.map(|candidate| Placement {
                    consumer: consumer.clone(),
                    candidate,
                })
            })
            .collect();

        let solution = Solution {
            assignment: Assignment { placements },
            stats: search.stats,
            solve_time_ms: elapsed_ms(started),
        };
        log::info!(
            "found assignment for {} consumers in {} ms ({} nodes)",
            solution.assignment.len(),
            solution.solve_time_ms,
            solution.stats.nodes
        );
        Ok(solution)
    }
}

impl SlotSolver for BacktrackingSolver {
    fn solve(&self, problem: &SlotProblem) -> Result<Solution, SolveError> {
        let started = Instant::now();
        let mut domains = Domains::generate(problem);

        if let Some(i) = domains.first_empty() {
            let consumer = problem.consumer(i).id.clone();
            log::info!("no slot combination covers '{consumer}'");
            return Err(SolveError::EmptyDomain { consumer });
        }

        let mut stats = SearchStats::default();
        if self.config.run_arc_consistency {
            let report = ArcConsistency::run(problem, &mut domains);
            stats.ac3_revisions = report.revisions;
            stats.ac3_removed = report.removed;
            if let Ac3Outcome::Wipeout { consumer } = report.outcome {
                let consumer = problem.consumer(consumer).id.clone();
                log::info!("structurally infeasible: no candidate left for '{consumer}'");
                return Err(SolveError::StructuralInfeasibility { consumer });
            }
        }

        self.search_from(problem, &domains, started, stats)
    }
}

fn elapsed_ms(started: Instant) -> u64 {
    started.elapsed().as_millis() as u64
}

/// Mutable state of one depth-first search.
struct Search<'a> {
    problem: &'a SlotProblem,
    config: &'a SolverConfig,
    started: Instant,
    placed: Vec<Option<CandidateAssignment>>,
    assigned: Vec<bool>,
    charged: i64,
    stats: SearchStats,
}

impl Search<'_> {
    /// Returns `Ok(true)` once every consumer is placed.
    fn backtrack(&mut self, domains: &Domains) -> Result<bool, SolveError> {
        self.check_time()?;

        let Some(var) = select_next(
            self.problem,
            domains,
            &self.assigned,
            self.config.degree_heuristic,
        ) else {
            return Ok(true);
        };

        if let Some(limit) = self.config.max_nodes {
            if self.stats.nodes >= limit {
                return Err(SolveError::NodeLimit {
                    nodes: self.stats.nodes,
                });
            }
        }
        self.stats.nodes += 1;

        let problem = self.problem;
        let consumer = problem.consumer(var);
        for value in domains.get(var) {
            self.check_time()?;

            if !self.consistent_with_placed(var, value) {
                continue;
            }

            let charge = match self.config.budget_accounting {
                BudgetAccounting::Need => consumer.need,
                BudgetAccounting::Reserved => value.total_duration(),
            };
            let Some(charged) = self
                .charged
                .checked_add(charge)
                .filter(|&total| total <= problem.budget())
            else {
                continue;
            };

            let child = if self.config.forward_checking {
                match self.forward_check(domains, var, value) {
                    Some(child) => child,
                    None => {
                        self.stats.pruned_by_forward_check += 1;
                        continue;
                    }
                }
            } else {
                domains.clone()
            };

            log::trace!("place '{}' -> {}", consumer.id, value);
            self.placed[var] = Some(value.clone());
            self.assigned[var] = true;
            self.charged = charged;

            if self.backtrack(&child)? {
                return Ok(true);
            }

            log::trace!("undo '{}' -> {}", consumer.id, value);
            self.placed[var] = None;
            self.assigned[var] = false;
            self.charged -= charge;
            self.stats.backtracks += 1;
        }

        Ok(false)
    }

    fn consistent_with_placed(&self, var: usize, value: &CandidateAssignment) -> bool {
        let prio = self.problem.consumer(var).priority_score;
        self.placed.iter().enumerate().all(|(k, other)| match other {
            Some(other) => compatible(value, prio, other, self.problem.consumer(k).priority_score),
            None => true,
        })
    }

    /// Filters every other unassigned domain against `value`.
    ///
    /// Returns the branch-local domains, or `None` if some domain empties.
    fn forward_check(
        &self,
        domains: &Domains,
        var: usize,
        value: &CandidateAssignment,
    ) -> Option<Domains> {
        let prio = self.problem.consumer(var).priority_score;
        let mut child = domains.clone();

        for k in (0..domains.len()).filter(|&k| k != var && !self.assigned[k]) {
            let prio_k = self.problem.consumer(k).priority_score;
            let current = domains.get(k);
            let kept: Vec<_> = current
                .iter()
                .filter(|w| compatible(value, prio, w, prio_k))
                .cloned()
                .collect();

            if kept.is_empty() {
                return None;
            }
            if kept.len() != current.len() {
                child.replace(k, kept);
            }
        }

        Some(child)
    }

    fn check_time(&self) -> Result<(), SolveError> {
        if let Some(limit) = self.config.time_limit_ms {
            let elapsed_ms = elapsed_ms(self.started);
            if elapsed_ms >= limit {
                return Err(SolveError::Timeout { elapsed_ms });
            }
        }
        Ok(())
    }
}
