//! Variable and value ordering.
//!
//! Variables are chosen by the lexicographic key
//! `(priority score asc, need desc, domain size asc, degree desc)`,
//! with remaining ties broken by input order. Values are tried in the
//! canonical domain order produced by [`super::generate_domain`].

use std::cmp::Reverse;

use super::config::DegreeHeuristic;
use super::constraint::compatible;
use super::domain::Domains;
use crate::model::SlotProblem;

/// Degree of `var` among the unassigned consumers.
pub fn degree(
    problem: &SlotProblem,
    domains: &Domains,
    assigned: &[bool],
    var: usize,
    heuristic: DegreeHeuristic,
) -> usize {
    let others = (0..problem.consumer_count()).filter(|&k| k != var && !assigned[k]);
    match heuristic {
        DegreeHeuristic::UnassignedCount => others.count(),
        DegreeHeuristic::ConflictDegree => {
            let prio = problem.consumer(var).priority_score;
            others
                .filter(|&k| {
                    let prio_k = problem.consumer(k).priority_score;
                    domains.get(var).iter().any(|v| {
                        domains
                            .get(k)
                            .iter()
                            .any(|w| !compatible(v, prio, w, prio_k))
                    })
                })
                .count()
        }
    }
}

/// Picks the next consumer to branch on, or `None` if all are assigned.
pub fn select_next(
    problem: &SlotProblem,
    domains: &Domains,
    assigned: &[bool],
    heuristic: DegreeHeuristic,
) -> Option<usize> {
    let key = |i: usize| {
        let c = problem.consumer(i);
        (
            c.priority_score,
            Reverse(c.need),
            domains.get(i).len(),
            Reverse(degree(problem, domains, assigned, i, heuristic)),
        )
    };

    (0..problem.consumer_count())
        .filter(|&i| !assigned[i])
        .min_by_key(|&i| (key(i), i))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CandidateAssignment, Consumer, PriorityMap, SlotCatalog, TimeSlot};

    fn problem(consumers: &[(&str, i64, &str)]) -> SlotProblem {
        let map = PriorityMap::default();
        SlotProblem::new(
            SlotCatalog::new([
                TimeSlot::new("A", 6, 10),
                TimeSlot::new("B", 10, 14),
                TimeSlot::new("C", 14, 18),
                TimeSlot::new("D", 18, 20),
            ]),
            consumers
                .iter()
                .map(|&(id, need, prio)| Consumer::new(id, need, prio, &map))
                .collect(),
            100,
        )
        .unwrap()
    }

    #[test]
    fn test_priority_first() {
        let p = problem(&[("P1", 2, "low"), ("P2", 2, "high"), ("P3", 8, "medium")]);
        let d = Domains::generate(&p);
        let pick = select_next(&p, &d, &[false; 3], DegreeHeuristic::UnassignedCount);
        assert_eq!(pick, Some(1));
    }

    #[test]
    fn test_explicit_score_outranks_labels() {
        let map = PriorityMap::default();
        let p = SlotProblem::new(
            SlotCatalog::new([TimeSlot::new("A", 6, 10), TimeSlot::new("B", 10, 14)]),
            vec![
                Consumer::new("P1", 4, "high", &map),
                Consumer::with_score("P2", 2, -1, "urgent"),
            ],
            100,
        )
        .unwrap();
        let d = Domains::generate(&p);
        let pick = select_next(&p, &d, &[false; 2], DegreeHeuristic::UnassignedCount);
        assert_eq!(pick, Some(1));
    }

    #[test]
    fn test_larger_need_breaks_priority_tie() {
        let p = problem(&[("P1", 2, "high"), ("P2", 8, "high")]);
        let d = Domains::generate(&p);
        let pick = select_next(&p, &d, &[false; 2], DegreeHeuristic::UnassignedCount);
        assert_eq!(pick, Some(1));
    }

    #[test]
    fn test_smaller_domain_breaks_need_tie() {
        let p = problem(&[("P1", 4, "high"), ("P2", 4, "high")]);
        let mut d = Domains::generate(&p);
        d.get_mut(0).truncate(1);
        let pick = select_next(&p, &d, &[false; 2], DegreeHeuristic::UnassignedCount);
        assert_eq!(pick, Some(0));

        d.get_mut(1).clear();
        let pick = select_next(&p, &d, &[false; 2], DegreeHeuristic::UnassignedCount);
        assert_eq!(pick, Some(1));
    }

    #[test]
    fn test_input_order_breaks_full_tie() {
        let p = problem(&[("P1", 4, "low"), ("P2", 4, "low")]);
        let d = Domains::generate(&p);
        let pick = select_next(&p, &d, &[false; 2], DegreeHeuristic::UnassignedCount);
        assert_eq!(pick, Some(0));
    }

    #[test]
    fn test_skips_assigned_and_finishes() {
        let p = problem(&[("P1", 4, "high"), ("P2", 4, "low")]);
        let d = Domains::generate(&p);
        assert_eq!(
            select_next(&p, &d, &[true, false], DegreeHeuristic::UnassignedCount),
            Some(1)
        );
        assert_eq!(
            select_next(&p, &d, &[true, true], DegreeHeuristic::UnassignedCount),
            None
        );
    }

    #[test]
    fn test_unassigned_count_degree_is_uniform() {
        let p = problem(&[("P1", 4, "high"), ("P2", 2, "low"), ("P3", 2, "low")]);
        let d = Domains::generate(&p);
        let assigned = [false; 3];
        let degrees: Vec<_> = (0..3)
            .map(|i| degree(&p, &d, &assigned, i, DegreeHeuristic::UnassignedCount))
            .collect();
        assert_eq!(degrees, vec![2, 2, 2]);
    }

    #[test]
    fn test_conflict_degree_counts_real_conflicts() {
        let p = problem(&[("P1", 2, "high"), ("P2", 2, "high"), ("P3", 2, "high")]);
        let slot = |l: &str, s, e| {
            CandidateAssignment::new(vec![std::sync::Arc::new(TimeSlot::new(l, s, e))]).unwrap()
        };
        // P1 and P2 compete for D; P3 uses a slot nobody else wants.
        let d = Domains::from_lists(vec![
            vec![slot("D", 18, 20)],
            vec![slot("D", 18, 20)],
            vec![slot("A", 6, 10)],
        ]);
        let assigned = [false; 3];
        let conflict = |i| degree(&p, &d, &assigned, i, DegreeHeuristic::ConflictDegree);
        assert_eq!(conflict(0), 1);
        assert_eq!(conflict(1), 1);
        assert_eq!(conflict(2), 0);
    }
}
