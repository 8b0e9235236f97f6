//! Candidate domain generation.
//!
//! A consumer's domain is every slot subset that covers its demand:
//! exact matches when any exist, otherwise every subset that
//! over-reserves. Domains are sorted by `(earliest start, total duration)`
//! and that order is used unchanged by the search.

use std::sync::Arc;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::model::{CandidateAssignment, SlotCatalog, SlotProblem, TimeSlot};

/// Generates the ranked domain for a single demand.
///
/// Pure function of `(catalog, need)`. An empty result means no
/// combination of slots reaches `need`.
///
/// # Examples
///
/// ```
/// use u_slotplan::csp::generate_domain;
/// use u_slotplan::model::{SlotCatalog, TimeSlot};
///
/// let catalog = SlotCatalog::new([TimeSlot::new("A", 6, 9), TimeSlot::new("B", 9, 15)]);
/// let domain = generate_domain(&catalog, 4);
/// // No exact match for 4h: falls back to {B} and {A, B}.
/// assert_eq!(domain.len(), 2);
/// assert_eq!(domain[0].total_duration(), 9);
/// ```
pub fn generate_domain(catalog: &SlotCatalog, need: i64) -> Vec<CandidateAssignment> {
    let mut exact = Vec::new();
    let mut over = Vec::new();

    for_each_subset(catalog.slots(), |subset| {
        let total: i64 = subset.iter().map(|s| s.duration()).sum();
        if total < need {
            return;
        }
        if let Some(candidate) = CandidateAssignment::new(subset.to_vec()) {
            if total == need {
                exact.push(candidate);
            } else if exact.is_empty() {
                over.push(candidate);
            }
        }
    });

    let mut domain = if exact.is_empty() { over } else { exact };
    // Stable: ties keep enumeration order (size, then catalog position).
    domain.sort_by(|a, b| a.canonical_cmp(b));
    domain
}

/// Visits every non-empty subset, smallest subsets first, each size in
/// lexicographic order of catalog positions.
fn for_each_subset<F>(slots: &[Arc<TimeSlot>], mut visit: F)
where
    F: FnMut(&[Arc<TimeSlot>]),
{
    let n = slots.len();
    let mut picked: Vec<Arc<TimeSlot>> = Vec::with_capacity(n);

    for size in 1..=n {
        let mut idx: Vec<usize> = (0..size).collect();
        loop {
            picked.clear();
            picked.extend(idx.iter().map(|&i| Arc::clone(&slots[i])));
            visit(&picked);

            // Advance to the next combination.
            let Some(pos) = (0..size).rev().find(|&i| idx[i] != i + n - size) else {
                break;
            };
            idx[pos] += 1;
            for j in pos + 1..size {
                idx[j] = idx[j - 1] + 1;
            }
        }
    }
}

/// Per-consumer domains, indexed by consumer position in the problem.
///
/// Each entry is reference counted: cloning a `Domains` is shallow and
/// an entry is copied only when it is modified. A search branch can
/// therefore fork the map and replace the few entries it filters while
/// the parent's view stays untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Domains {
    entries: Vec<Arc<Vec<CandidateAssignment>>>,
}

impl Domains {
    /// Generates the domain of every consumer.
    ///
    /// With the `parallel` feature the consumers are processed on the
    /// rayon pool; the result is identical either way.
    pub fn generate(problem: &SlotProblem) -> Self {
        let catalog = problem.catalog();

        #[cfg(feature = "parallel")]
        let entries = problem
            .consumers()
            .par_iter()
            .map(|c| Arc::new(generate_domain(catalog, c.need)))
            .collect();

        #[cfg(not(feature = "parallel"))]
        let entries = problem
            .consumers()
            .iter()
            .map(|c| Arc::new(generate_domain(catalog, c.need)))
            .collect();

        let domains = Self { entries };
        log::debug!(
            "generated domains for {} consumers, sizes {:?}",
            domains.len(),
            domains.sizes()
        );
        domains
    }

    /// Wraps explicitly constructed domains.
    pub fn from_lists(lists: Vec<Vec<CandidateAssignment>>) -> Self {
        Self {
            entries: lists.into_iter().map(Arc::new).collect(),
        }
    }

    /// Number of consumers covered.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether there are no consumers.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Domain of consumer `index`.
    pub fn get(&self, index: usize) -> &[CandidateAssignment] {
        &self.entries[index]
    }

    /// Mutable domain of consumer `index`, unsharing it first if needed.
    pub fn get_mut(&mut self, index: usize) -> &mut Vec<CandidateAssignment> {
        Arc::make_mut(&mut self.entries[index])
    }

    /// Replaces the domain of consumer `index`.
    pub fn replace(&mut self, index: usize, values: Vec<CandidateAssignment>) {
        self.entries[index] = Arc::new(values);
    }

    /// Domain sizes in consumer order.
    pub fn sizes(&self) -> Vec<usize> {
        self.entries.iter().map(|d| d.len()).collect()
    }

    /// Total number of candidates across all consumers.
    pub fn total_candidates(&self) -> usize {
        self.entries.iter().map(|d| d.len()).sum()
    }

    /// First consumer whose domain is empty.
    pub fn first_empty(&self) -> Option<usize> {
        self.entries.iter().position(|d| d.is_empty())
    }

    /// Whether entry `index` is shared with another `Domains` value.
    pub fn is_shared(&self, index: usize) -> bool {
        Arc::strong_count(&self.entries[index]) > 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Consumer, PriorityMap};
    use proptest::prelude::*;

    fn labels(c: &CandidateAssignment) -> Vec<&str> {
        c.labels().collect()
    }

    #[test]
    fn test_subset_enumeration_order() {
        let catalog = SlotCatalog::new([
            TimeSlot::new("A", 0, 1),
            TimeSlot::new("B", 1, 2),
            TimeSlot::new("C", 2, 3),
        ]);
        let mut seen = Vec::new();
        for_each_subset(catalog.slots(), |s| {
            seen.push(s.iter().map(|t| t.label.clone()).collect::<String>())
        });
        assert_eq!(seen, vec!["A", "B", "C", "AB", "AC", "BC", "ABC"]);
    }

    #[test]
    fn test_exact_matches_only() {
        let catalog = SlotCatalog::new([
            TimeSlot::new("A", 6, 10),
            TimeSlot::new("B", 10, 14),
            TimeSlot::new("C", 14, 18),
        ]);
        let domain = generate_domain(&catalog, 4);
        assert_eq!(domain.len(), 3);
        assert!(domain.iter().all(|c| c.total_duration() == 4));
        assert_eq!(labels(&domain[0]), vec!["A"]);
        assert_eq!(labels(&domain[2]), vec!["C"]);
    }

    #[test]
    fn test_over_reservation_fallback() {
        let catalog = SlotCatalog::new([TimeSlot::new("A", 6, 9), TimeSlot::new("B", 9, 15)]);
        let domain = generate_domain(&catalog, 4);
        assert_eq!(domain.len(), 2);
        // (6, 9) sorts before (9, 6).
        assert_eq!(labels(&domain[0]), vec!["A", "B"]);
        assert_eq!(labels(&domain[1]), vec!["B"]);
        assert!(domain.iter().all(|c| c.total_duration() >= 4));
    }

    #[test]
    fn test_unreachable_need_gives_empty_domain() {
        let catalog = SlotCatalog::new([TimeSlot::new("A", 6, 10)]);
        assert!(generate_domain(&catalog, 5).is_empty());
        assert!(generate_domain(&SlotCatalog::default(), 1).is_empty());
    }

    #[test]
    fn test_ties_keep_enumeration_order() {
        // {A,C} and {A,D} tie on (start, duration) and keep catalog order.
        let catalog = SlotCatalog::new([
            TimeSlot::new("A", 0, 2),
            TimeSlot::new("B", 2, 6),
            TimeSlot::new("C", 6, 8),
            TimeSlot::new("D", 8, 10),
        ]);
        let domain = generate_domain(&catalog, 4);
        let all: Vec<Vec<&str>> = domain.iter().map(labels).collect();
        assert_eq!(all, vec![vec!["A", "C"], vec!["A", "D"], vec!["B"], vec!["C", "D"]]);
    }

    #[test]
    fn test_domains_copy_on_write() {
        let map = PriorityMap::default();
        let problem = SlotProblem::new(
            SlotCatalog::new([TimeSlot::new("A", 6, 10), TimeSlot::new("B", 10, 14)]),
            vec![Consumer::new("P1", 4, "high", &map), Consumer::new("P2", 8, "low", &map)],
            12,
        )
        .unwrap();

        let parent = Domains::generate(&problem);
        assert_eq!(parent.sizes(), vec![2, 1]);

        let mut child = parent.clone();
        assert!(child.is_shared(0));
        child.get_mut(0).truncate(1);
        assert!(!child.is_shared(0));
        assert!(child.is_shared(1));

        assert_eq!(parent.get(0).len(), 2);
        assert_eq!(child.get(0).len(), 1);
        assert_eq!(child.total_candidates(), 2);
        assert_eq!(child.first_empty(), None);
    }

    proptest! {
        #[test]
        fn prop_domain_is_valid_and_sorted(
            slots in prop::collection::vec((0i64..20, 1i64..5), 0..7),
            need in 1i64..12,
        ) {
            let catalog = SlotCatalog::new(
                slots
                    .iter()
                    .enumerate()
                    .map(|(i, &(start, len))| TimeSlot::new(format!("s{i}"), start, start + len)),
            );
            let domain = generate_domain(&catalog, need);

            prop_assert!(domain.iter().all(|c| c.total_duration() >= need));
            if domain.iter().any(|c| c.total_duration() == need) {
                prop_assert!(domain.iter().all(|c| c.total_duration() == need));
            }
            for pair in domain.windows(2) {
                prop_assert!(pair[0].canonical_cmp(&pair[1]).is_le());
            }
            prop_assert_eq!(&domain, &generate_domain(&catalog, need));
        }
    }
}
