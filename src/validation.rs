//! Input validation for slot planning problems.
//!
//! Checks structural integrity of the catalog, consumers and budget
//! before any domain is generated. Detects:
//! - Duplicate slot labels and consumer IDs
//! - Slots whose end does not follow their start
//! - Non-positive demands and budgets
//! - Catalogs too large for exhaustive subset enumeration
//! - Hour arithmetic that would overflow `i64`

use std::collections::HashSet;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::model::{Consumer, SlotCatalog};

/// Largest catalog accepted. Domain generation enumerates `2^n - 1` subsets.
pub const MAX_CATALOG_SLOTS: usize = 20;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ValidationErrorKind {
    /// Two slots or two consumers share an identifier.
    DuplicateId,
    /// A slot has `end <= start`.
    EmptySlot,
    /// A consumer needs zero or negative hours.
    NonPositiveNeed,
    /// The daily budget is zero or negative.
    NonPositiveBudget,
    /// The catalog exceeds [`MAX_CATALOG_SLOTS`].
    CatalogTooLarge,
    /// A slot duration, the catalog total or the total demand does not
    /// fit in `i64`.
    OutOfRange,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

/// Validates the inputs of one solve.
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with every detected issue.
pub fn validate_problem(
    catalog: &SlotCatalog,
    consumers: &[Consumer],
    budget: i64,
) -> ValidationResult {
    let mut errors = Vec::new();

    if catalog.len() > MAX_CATALOG_SLOTS {
        errors.push(ValidationError::new(
            ValidationErrorKind::CatalogTooLarge,
            format!(
                "Catalog has {} slots, at most {} are supported",
                catalog.len(),
                MAX_CATALOG_SLOTS
            ),
        ));
    }

    let mut labels = HashSet::new();
    let mut total_duration = Some(0i64);
    for slot in catalog.slots() {
        if !labels.insert(slot.label.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate slot label: {}", slot.label),
            ));
        }
        match slot.end.checked_sub(slot.start) {
            Some(duration) if duration > 0 => {
                total_duration = total_duration.and_then(|t| t.checked_add(duration));
            }
            Some(_) => errors.push(ValidationError::new(
                ValidationErrorKind::EmptySlot,
                format!(
                    "Slot '{}' ends at {} but starts at {}",
                    slot.label, slot.end, slot.start
                ),
            )),
            None => errors.push(ValidationError::new(
                ValidationErrorKind::OutOfRange,
                format!(
                    "Slot '{}' spans {}..{}, which overflows the hour range",
                    slot.label, slot.start, slot.end
                ),
            )),
        }
    }
    if total_duration.is_none() {
        errors.push(ValidationError::new(
            ValidationErrorKind::OutOfRange,
            "Total slot time overflows the hour range",
        ));
    }

    let mut ids = HashSet::new();
    let mut total_need = Some(0i64);
    for consumer in consumers {
        if !ids.insert(consumer.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate consumer ID: {}", consumer.id),
            ));
        }
        if consumer.need <= 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::NonPositiveNeed,
                format!("Consumer '{}' needs {} hours", consumer.id, consumer.need),
            ));
        } else {
            total_need = total_need.and_then(|t| t.checked_add(consumer.need));
        }
    }
    if total_need.is_none() {
        errors.push(ValidationError::new(
            ValidationErrorKind::OutOfRange,
            "Total demand overflows the hour range",
        ));
    }

    if budget <= 0 {
        errors.push(ValidationError::new(
            ValidationErrorKind::NonPositiveBudget,
            format!("Daily budget must be positive, got {budget}"),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
