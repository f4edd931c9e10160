//! The parser under test
//!
//! A [`Subject`] takes one source text, parses it with the requested
//! capabilities switched on, and either accepts it or rejects it with a
//! phase. The harness treats the parser as a black box and may call it from
//! several threads at once.

pub mod command;

use serde::Serialize;
use std::fmt;

use crate::corpus::{Phase, SourceKind};

pub use command::CommandSubject;

/// Input for one subject invocation
#[derive(Debug, Clone, Copy)]
pub struct ParseRequest<'a> {
    pub source_text: &'a str,
    pub source_kind: SourceKind,
    pub capabilities: &'a [&'a str],
}

/// A subject's refusal to accept a source text
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Rejection {
    pub phase: Phase,
    pub message: String,
}

impl Rejection {
    pub fn new(phase: Phase, message: impl Into<String>) -> Self {
        Self {
            phase,
            message: message.into(),
        }
    }

    /// A syntax error reported while parsing
    pub fn syntax(message: impl Into<String>) -> Self {
        Self::new(Phase::Parse, message)
    }
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} error: {}", self.phase, self.message)
    }
}

/// Why a subject invocation did not succeed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubjectError {
    /// The parser rejected the input; an ordinary outcome
    Rejected(Rejection),
    /// The parser itself broke (panic, abnormal exit, bad output)
    Crashed(String),
}

impl fmt::Display for SubjectError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubjectError::Rejected(rejection) => write!(f, "{}", rejection),
            SubjectError::Crashed(message) => write!(f, "crash: {}", message),
        }
    }
}

impl From<Rejection> for SubjectError {
    fn from(rejection: Rejection) -> Self {
        SubjectError::Rejected(rejection)
    }
}

pub type SubjectResult = std::result::Result<(), SubjectError>;

/// A parser that can be conformance tested
pub trait Subject: Sync {
    /// Attempt to parse one source text
    fn parse(&self, request: &ParseRequest<'_>) -> SubjectResult;
}

impl<F> Subject for F
where
    F: Fn(&ParseRequest<'_>) -> SubjectResult + Sync,
{
    fn parse(&self, request: &ParseRequest<'_>) -> SubjectResult {
        self(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closure_is_a_subject() {
        let subject = |req: &ParseRequest<'_>| -> SubjectResult {
            if req.source_text.contains("@@") {
                Err(Rejection::syntax("unexpected token").into())
            } else {
                Ok(())
            }
        };
        let ok = ParseRequest {
            source_text: "var a;",
            source_kind: SourceKind::Script,
            capabilities: &[],
        };
        assert_eq!(subject.parse(&ok), Ok(()));
        let bad = ParseRequest {
            source_text: "@@",
            ..ok
        };
        assert_eq!(
            subject.parse(&bad),
            Err(SubjectError::Rejected(Rejection::syntax("unexpected token")))
        );
    }

    #[test]
    fn test_error_display() {
        let err: SubjectError = Rejection::new(Phase::Early, "duplicate binding").into();
        assert_eq!(err.to_string(), "early error: duplicate binding");
        assert_eq!(SubjectError::Crashed("boom".into()).to_string(), "crash: boom");
    }
}
