//! Solve failures.

use crate::validation::ValidationError;

/// Why a solve produced no assignment.
///
/// Every kind is terminal for one solve: the solver is deterministic, so
/// retrying with the same inputs gives the same error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SolveError {
    /// The inputs failed validation.
    #[error("invalid input: {}", join(.0))]
    InvalidInput(Vec<ValidationError>),

    /// No slot combination covers this consumer's need.
    #[error("no slot combination covers the need of '{consumer}'")]
    EmptyDomain {
        /// Consumer id.
        consumer: String,
    },

    /// Arc consistency emptied this consumer's domain before search.
    #[error("arc consistency left no candidate for '{consumer}'")]
    StructuralInfeasibility {
        /// Consumer id.
        consumer: String,
    },

    /// The search tried every branch without a full assignment.
    #[error("search exhausted after {nodes} nodes without a full assignment")]
    SearchExhaustion {
        /// Nodes expanded.
        nodes: u64,
    },

    /// The configured time limit expired.
    #[error("time limit exceeded after {elapsed_ms} ms")]
    Timeout {
        /// Elapsed wall-clock time.
        elapsed_ms: u64,
    },

    /// The configured node limit was reached.
    #[error("node limit of {nodes} reached")]
    NodeLimit {
        /// Nodes expanded.
        nodes: u64,
    },
}

impl SolveError {
    /// Whether infeasibility was detected before search began.
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            Self::EmptyDomain { .. } | Self::StructuralInfeasibility { .. }
        )
    }

    /// Whether the search stopped on a limit rather than a proof.
    pub fn is_limit(&self) -> bool {
        matches!(self, Self::Timeout { .. } | Self::NodeLimit { .. })
    }
}

impl From<Vec<ValidationError>> for SolveError {
    fn from(errors: Vec<ValidationError>) -> Self {
        Self::InvalidInput(errors)
    }
}

fn join(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}
