//! Candidate assignments: one way of covering a consumer's demand.

use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::TimeSlot;

/// A set of slots that together satisfy one consumer's demand.
///
/// The time bounds and total duration are computed once at construction.
/// Slots are shared with the [`super::SlotCatalog`] they came from.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CandidateAssignment {
    slots: Vec<Arc<TimeSlot>>,
    total_duration: i64,
    earliest_start: i64,
    latest_end: i64,
}

impl CandidateAssignment {
    /// Builds a candidate from a non-empty slot set.
    ///
    /// Returns `None` for an empty set, which has no time bounds.
    pub fn new(slots: Vec<Arc<TimeSlot>>) -> Option<Self> {
        let earliest_start = slots.iter().map(|s| s.start).min()?;
        let latest_end = slots.iter().map(|s| s.end).max()?;
        let total_duration = slots.iter().map(|s| s.duration()).sum();
        Some(Self {
            slots,
            total_duration,
            earliest_start,
            latest_end,
        })
    }

    /// Member slots, in catalog order.
    pub fn slots(&self) -> &[Arc<TimeSlot>] {
        &self.slots
    }

    /// Labels of the member slots.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.slots.iter().map(|s| s.label.as_str())
    }

    /// Whether a slot with this label is part of the candidate.
    pub fn contains_label(&self, label: &str) -> bool {
        self.slots.iter().any(|s| s.label == label)
    }

    /// Whether the two candidates use a common slot.
    pub fn shares_slot_with(&self, other: &CandidateAssignment) -> bool {
        self.slots.iter().any(|s| other.contains_label(&s.label))
    }

    /// Sum of member slot durations.
    pub fn total_duration(&self) -> i64 {
        self.total_duration
    }

    /// Start of the earliest member slot.
    pub fn earliest_start(&self) -> i64 {
        self.earliest_start
    }

    /// End of the latest member slot.
    pub fn latest_end(&self) -> i64 {
        self.latest_end
    }

    /// Canonical ordering: earliest start, then total duration.
    pub fn canonical_cmp(&self, other: &Self) -> Ordering {
        (self.earliest_start, self.total_duration)
            .cmp(&(other.earliest_start, other.total_duration))
    }
}

impl fmt::Display for CandidateAssignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, slot) in self.slots.iter().enumerate() {
            if i > 0 {
                f.write_str(" & ")?;
            }
            f.write_str(&slot.label)?;
        }
        Ok(())
    }
}
