//! A validated planning instance.

use super::{Consumer, SlotCatalog};
use crate::csp::SolveError;
use crate::validation::validate_problem;

/// One day's planning instance: slots, consumers and the daily budget.
///
/// Constructed only from valid input, so downstream code can rely on
/// unique identifiers, positive durations and a positive budget.
/// Consumers keep their input order; that order is the final tie-break
/// of variable selection.
///
/// # Examples
///
/// ```
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
/// assert_eq!(problem.consumer_count(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct SlotProblem {
    catalog: SlotCatalog,
    consumers: Vec<Consumer>,
    budget: i64,
}

impl SlotProblem {
    /// Validates and assembles a problem.
    ///
    /// # Errors
    /// [`SolveError::InvalidInput`] carrying every validation failure.
    pub fn new(
        catalog: SlotCatalog,
        consumers: Vec<Consumer>,
        budget: i64,
    ) -> Result<Self, SolveError> {
        validate_problem(&catalog, &consumers, budget)?;
        Ok(Self {
            catalog,
            consumers,
            budget,
        })
    }

    /// The slot catalog.
    pub fn catalog(&self) -> &SlotCatalog {
        &self.catalog
    }

    /// Consumers in input order.
    pub fn consumers(&self) -> &[Consumer] {
        &self.consumers
    }

    /// Consumer at `index`.
    pub fn consumer(&self, index: usize) -> &Consumer {
        &self.consumers[index]
    }

    /// Number of consumers.
    pub fn consumer_count(&self) -> usize {
        self.consumers.len()
    }

    /// Index of the consumer with this id.
    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.consumers.iter().position(|c| c.id == id)
    }

    /// Daily budget in hours.
    pub fn budget(&self) -> i64 {
        self.budget
    }

    /// Total demand of all consumers.
    pub fn total_need(&self) -> i64 {
        self.consumers.iter().map(|c| c.need).sum()
    }
}
