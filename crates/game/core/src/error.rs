//! Error taxonomy for the decision core.
//!
//! None of these errors ever reach the caller of the public decision API.
//! Internal steps return `Result<T, DecisionError>` and the snapshot builder
//! or sequence planner decides, per field or per candidate, which safe default
//! replaces the failed value.
//!
//! # Classes
//!
//! - **MissingData**: absent unit fields or empty collections. Resolved to a
//!   neutral default.
//! - **Infeasible**: the requested action cannot happen this cycle (target
//!   unreachable, nothing to plan). Resolved to "no action".
//! - **Collaborator**: an oracle failed or returned malformed data. The affected
//!   field or candidate is dropped and the decision continues.

use crate::ability::AbilityHandle;
use crate::unit::UnitId;

/// Classification of a [`DecisionError`], used to pick the recovery policy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FailureClass {
    MissingData,
    Infeasible,
    Collaborator,
}

impl FailureClass {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::MissingData => "missing-data",
            Self::Infeasible => "infeasible",
            Self::Collaborator => "collaborator",
        }
    }

    /// Collaborator failures are worth a warning; the others are routine.
    pub const fn is_unexpected(&self) -> bool {
        matches!(self, Self::Collaborator)
    }
}

/// Errors raised inside a single decision cycle.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum DecisionError {
    /// The world oracle does not know this unit.
    #[error("unit {0} not found")]
    UnitNotFound(UnitId),

    /// A required collection or field was empty.
    #[error("missing data: {0}")]
    MissingData(&'static str),

    /// Target cannot be reached with the remaining budget.
    #[error("target {target} unreachable with {ability} (distance {distance:.1}, reach {reach:.1})")]
    Unreachable {
        ability: AbilityHandle,
        target: UnitId,
        distance: f32,
        reach: f32,
    },

    /// No candidate survived generation or evaluation.
    #[error("no candidates to evaluate")]
    NoCandidates,

    /// An oracle reported a failure.
    #[error("{oracle} oracle failed: {reason}")]
    Collaborator { oracle: &'static str, reason: String },

    /// An oracle returned data the core cannot use (NaN positions, negative ranges).
    #[error("malformed data from {source_name}: {detail}")]
    Malformed {
        source_name: &'static str,
        detail: String,
    },
}

impl DecisionError {
    pub fn collaborator(oracle: &'static str, reason: impl Into<String>) -> Self {
        Self::Collaborator {
            oracle,
            reason: reason.into(),
        }
    }

    pub fn malformed(source_name: &'static str, detail: impl Into<String>) -> Self {
        Self::Malformed {
            source_name,
            detail: detail.into(),
        }
    }

    pub const fn class(&self) -> FailureClass {
        match self {
            Self::UnitNotFound(_) | Self::MissingData(_) => FailureClass::MissingData,
            Self::Unreachable { .. } | Self::NoCandidates => FailureClass::Infeasible,
            Self::Collaborator { .. } | Self::Malformed { .. } => FailureClass::Collaborator,
        }
    }
}

pub type DecisionResult<T> = Result<T, DecisionError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classes_follow_taxonomy() {
        assert_eq!(
            DecisionError::UnitNotFound(UnitId(3)).class(),
            FailureClass::MissingData
        );
        assert_eq!(DecisionError::NoCandidates.class(), FailureClass::Infeasible);
        assert_eq!(
            DecisionError::collaborator("targeting", "boom").class(),
            FailureClass::Collaborator
        );
        assert!(FailureClass::Collaborator.is_unexpected());
        assert!(!FailureClass::Infeasible.is_unexpected());
    }

    #[test]
    fn display_includes_context() {
        let err = DecisionError::Unreachable {
            ability: AbilityHandle(7),
            target: UnitId(2),
            distance: 25.0,
            reach: 10.0,
        };
        assert_eq!(
            err.to_string(),
            "target #2 unreachable with ability:7 (distance 25.0, reach 10.0)"
        );
    }
}
