//! Pairwise compatibility between candidate assignments.

use crate::model::CandidateAssignment;

/// Why two candidates cannot coexist.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Conflict {
    /// Both candidates use the same slot.
    SharedSlot,
    /// The higher-priority candidate ends after the lower-priority one starts.
    PriorityOrder,
}

/// Checks two candidates belonging to different consumers.
///
/// Rules, in order:
/// 1. A slot serves at most one consumer.
/// 2. When priorities differ, the higher-priority candidate (smaller score)
///    must end no later than the other begins. Equal priorities impose no
///    ordering.
///
/// Returns the first rule that fires, or `None` if the pair is compatible.
/// Swapping the two `(candidate, priority)` pairs never changes whether a
/// conflict is reported.
pub fn conflict(
    a: &CandidateAssignment,
    priority_a: i32,
    b: &CandidateAssignment,
    priority_b: i32,
) -> Option<Conflict> {
    if a.shares_slot_with(b) {
        return Some(Conflict::SharedSlot);
    }

    let ordered = match priority_a.cmp(&priority_b) {
        std::cmp::Ordering::Less => a.latest_end() <= b.earliest_start(),
        std::cmp::Ordering::Greater => b.latest_end() <= a.earliest_start(),
        std::cmp::Ordering::Equal => true,
    };

    if ordered {
        None
    } else {
        Some(Conflict::PriorityOrder)
    }
}

/// Whether two candidates can coexist. See [`conflict`].
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use u_slotplan::csp::compatible;
/// use u_slotplan::model::{CandidateAssignment, TimeSlot};
///
/// let early = CandidateAssignment::new(vec![Arc::new(TimeSlot::new("A", 6, 10))]).unwrap();
/// let late = CandidateAssignment::new(vec![Arc::new(TimeSlot::new("B", 10, 14))]).unwrap();
///
/// assert!(compatible(&early, 0, &late, 2));
/// assert!(!compatible(&late, 0, &early, 2));
/// ```
pub fn compatible(
    a: &CandidateAssignment,
    priority_a: i32,
    b: &CandidateAssignment,
    priority_b: i32,
) -> bool {
    conflict(a, priority_a, b, priority_b).is_none()
}
