//! Consumers (plots) and priority resolution.

use std::collections::HashMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Maps priority labels to numeric scores.
///
/// Lower score = higher priority. Labels are matched case-insensitively
/// after trimming. Unknown labels score one past the largest known score,
/// so they rank below every recognized label.
///
/// # Examples
///
/// ```
/// use u_slotplan::model::PriorityMap;
///
/// let map = PriorityMap::default();
/// assert_eq!(map.score("High"), 0);
/// assert_eq!(map.score("low"), 2);
/// assert_eq!(map.score("urgent?"), 3);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PriorityMap {
    scores: HashMap<String, i32>,
}

impl Default for PriorityMap {
    fn default() -> Self {
        Self::new()
            .with_label("high", 0)
            .with_label("medium", 1)
            .with_label("low", 2)
    }
}

impl PriorityMap {
    /// Creates an empty map. Every label is then "unknown" with score 0.
    pub fn new() -> Self {
        Self {
            scores: HashMap::new(),
        }
    }

    /// Registers a label with its score.
    pub fn with_label(mut self, label: &str, score: i32) -> Self {
        self.scores.insert(normalize(label), score);
        self
    }

    /// Score for an unrecognized label.
    pub fn unknown_score(&self) -> i32 {
        self.scores.values().max().map_or(0, |m| m + 1)
    }

    /// Resolves a label to its score.
    pub fn score(&self, label: &str) -> i32 {
        self.scores
            .get(&normalize(label))
            .copied()
            .unwrap_or_else(|| self.unknown_score())
    }
}

fn normalize(label: &str) -> String {
    label.trim().to_lowercase()
}

/// A resource consumer with an hourly demand and a priority.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Consumer {
    /// Unique identifier.
    pub id: String,
    /// Hours of slot time required.
    pub need: i64,
    /// Resolved priority score (lower = more important).
    pub priority_score: i32,
    /// Normalized priority label, kept for reporting.
    pub priority_label: String,
}

impl Consumer {
    /// Creates a consumer, resolving its label through `priorities`.
    pub fn new(
        id: impl Into<String>,
        need: i64,
        priority_label: &str,
        priorities: &PriorityMap,
    ) -> Self {
        Self {
            id: id.into(),
            need,
            priority_score: priorities.score(priority_label),
            priority_label: normalize(priority_label),
        }
    }

    /// Creates a consumer with an explicit score.
    pub fn with_score(
        id: impl Into<String>,
        need: i64,
        priority_score: i32,
        priority_label: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            need,
            priority_score,
            priority_label: priority_label.into(),
        }
    }
}
