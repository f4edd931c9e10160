//! Outcome classification
//!
//! Compares what a record expected with what the subject did. Every input
//! classifies to exactly one of pass or fail; a crashed subject is a failure
//! with its message kept for diagnostics.

use serde::Serialize;
use std::fmt;

use crate::corpus::Expectation;
use crate::subject::{SubjectError, SubjectResult};

/// Conformance verdict for a single test
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "verdict", rename_all = "lowercase")]
pub enum Classification {
    Pass,
    Fail { reason: String },
}

impl Classification {
    pub fn is_pass(&self) -> bool {
        matches!(self, Classification::Pass)
    }

    fn fail(reason: impl Into<String>) -> Self {
        Classification::Fail {
            reason: reason.into(),
        }
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Classification::Pass => write!(f, "PASS"),
            Classification::Fail { reason } => write!(f, "FAIL: {}", reason),
        }
    }
}

/// Classify a subject result against the record's expectation
pub fn classify(expectation: Expectation, actual: &SubjectResult) -> Classification {
    match (expectation, actual) {
        (_, Err(SubjectError::Crashed(message))) => {
            Classification::fail(format!("parser crashed: {}", message))
        }
        (Expectation::Success, Ok(())) => Classification::Pass,
        (Expectation::Success, Err(SubjectError::Rejected(rejection))) => {
            Classification::fail(format!("expected success, got {}", rejection))
        }
        (Expectation::FailureAt(phase), Ok(())) => {
            Classification::fail(format!("expected {} error, but the source was accepted", phase))
        }
        (Expectation::FailureAt(phase), Err(SubjectError::Rejected(rejection))) => {
            // Parsers report early errors as syntax errors, so parse and
            // early rejections satisfy each other.
            if rejection.phase == phase || (phase.is_early() && rejection.phase.is_early()) {
                Classification::Pass
            } else {
                Classification::fail(format!("expected {} error, got {}", phase, rejection))
            }
        }
    }
}
