//! Time slots and the daily slot catalog.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Error raised when a slot or catalog text cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseSlotError {
    /// The text has no `-` separating start and end.
    #[error("slot '{0}' is not of the form <start>-<end>")]
    MissingSeparator(String),
    /// One of the bounds is not an integer.
    #[error("slot '{text}' has a non-integer bound '{bound}'")]
    InvalidBound { text: String, bound: String },
}

/// A fixed reservation window within one day.
///
/// Times are whole hours. The duration is `end - start`; slots with a
/// non-positive or unrepresentable duration are rejected by
/// [`crate::validation`]. The slot displays as its label, the same text
/// candidate assignments and reports print.
///
/// # Examples
///
/// ```
/// use u_slotplan::model::TimeSlot;
///
/// let slot: TimeSlot = "6-10".parse().unwrap();
/// assert_eq!(slot.label, "6-10");
/// assert_eq!(slot.duration(), 4);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TimeSlot {
    /// Unique label within the catalog.
    pub label: String,
    /// Start hour.
    pub start: i64,
    /// End hour (exclusive).
    pub end: i64,
}

impl TimeSlot {
    /// Creates a new slot.
    pub fn new(label: impl Into<String>, start: i64, end: i64) -> Self {
        Self {
            label: label.into(),
            start,
            end,
        }
    }

    /// Length of the window in hours.
    ///
    /// Saturates for bounds whose difference does not fit in `i64`;
    /// validation rejects such slots before they reach a solver.
    pub fn duration(&self) -> i64 {
        self.end.saturating_sub(self.start)
    }
}

impl FromStr for TimeSlot {
    type Err = ParseSlotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.trim();
        let (lo, hi) = text
            .split_once('-')
            .ok_or_else(|| ParseSlotError::MissingSeparator(text.to_string()))?;

        let bound = |b: &str| {
            b.trim()
                .parse::<i64>()
                .map_err(|_| ParseSlotError::InvalidBound {
                    text: text.to_string(),
                    bound: b.trim().to_string(),
                })
        };

        Ok(Self::new(text, bound(lo)?, bound(hi)?))
    }
}

impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label)
    }
}

/// The ordered set of slots available for one day.
///
/// Slots are stored behind [`Arc`] so candidate assignments share them
/// instead of copying.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SlotCatalog {
    slots: Vec<Arc<TimeSlot>>,
}

impl SlotCatalog {
    /// Creates a catalog from slots, preserving their order.
    pub fn new(slots: impl IntoIterator<Item = TimeSlot>) -> Self {
        Self {
            slots: slots.into_iter().map(Arc::new).collect(),
        }
    }

    /// Appends a slot.
    pub fn push(&mut self, slot: TimeSlot) {
        self.slots.push(Arc::new(slot));
    }

    /// Number of slots.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether the catalog holds no slots.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Slots in catalog order.
    pub fn slots(&self) -> &[Arc<TimeSlot>] {
        &self.slots
    }

    /// Looks up a slot by label.
    pub fn get(&self, label: &str) -> Option<&Arc<TimeSlot>> {
        self.slots.iter().find(|s| s.label == label)
    }

    /// Sum of all slot durations.
    pub fn total_duration(&self) -> i64 {
        self.slots.iter().map(|s| s.duration()).sum()
    }
}

impl FromStr for SlotCatalog {
    type Err = ParseSlotError;

    /// Parses `"6-10;10-14;14-18"`.
    ///
    /// Quotes are stripped and fragments without a `-` are skipped, which
    /// tolerates trailing separators in exported settings files.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let cleaned = s.replace(['"', '\''], "");
        let slots = cleaned
            .split(';')
            .map(str::trim)
            .filter(|part| part.contains('-'))
            .map(TimeSlot::from_str)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(slots))
    }
}
