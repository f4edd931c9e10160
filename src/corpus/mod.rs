//! Test records produced by the conformance corpus
//!
//! A [`TestRecord`] is one test file run under one scenario. The harness never
//! looks at how records are produced; [`stream::Test262Stream`] is the producer
//! for an on-disk test262 checkout, and tests build records by hand.

pub mod metadata;
pub mod stream;

use serde::{Deserialize, Serialize};
use std::fmt;

pub use metadata::{Negative, TestMetadata};
pub use stream::Test262Stream;

/// Parsing goal for a test's source text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    Script,
    Module,
}

impl SourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceKind::Script => "script",
            SourceKind::Module => "module",
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Phase at which a negative test is declared to fail, or at which a subject
/// rejected its input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Parse,
    Early,
    Resolution,
    Runtime,
}

impl Phase {
    /// Parse and early errors are detected before any evaluation happens,
    /// which is the only kind of failure a parser can be held to.
    pub fn is_early(&self) -> bool {
        matches!(self, Phase::Parse | Phase::Early)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Parse => "parse",
            Phase::Early => "early",
            Phase::Resolution => "resolution",
            Phase::Runtime => "runtime",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What the harness expects the subject to do with a record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Expectation {
    /// The subject must accept the source text
    Success,
    /// The subject must reject the source text at this phase.
    ///
    /// Records read from the corpus only ever carry `Parse` or `Early` here
    /// (see [`Expectation::from_declared_phase`]). `Resolution` and
    /// `Runtime` appear only in hand-built records and are satisfied by a
    /// rejection at exactly that phase.
    FailureAt(Phase),
}

impl Expectation {
    /// Derive the expectation from a declared negative phase.
    ///
    /// Resolution and runtime failures are semantic, not syntactic, so a
    /// parser is expected to accept those sources.
    pub fn from_declared_phase(phase: Option<Phase>) -> Self {
        match phase {
            Some(phase) if phase.is_early() => Expectation::FailureAt(phase),
            _ => Expectation::Success,
        }
    }

    pub fn expects_rejection(&self) -> bool {
        matches!(self, Expectation::FailureAt(_))
    }
}

impl fmt::Display for Expectation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expectation::Success => write!(f, "success"),
            Expectation::FailureAt(phase) => write!(f, "{} error", phase),
        }
    }
}

/// A single test case under a single scenario
#[derive(Debug, Clone)]
pub struct TestRecord {
    /// Stable identifier, e.g. `language/expressions/a.js(strict mode)`
    pub id: String,
    /// Corpus-relative file name, used for skip rules and chapter grouping
    pub file_name: String,
    pub source_text: String,
    pub source_kind: SourceKind,
    /// Declared features, in declaration order
    pub features: Vec<String>,
    pub expectation: Expectation,
}

impl TestRecord {
    /// Build a script record that is expected to parse
    pub fn new(file_name: impl Into<String>, scenario: &str, source_text: impl Into<String>) -> Self {
        let file_name = file_name.into();
        Self {
            id: format!("{}({})", file_name, scenario),
            file_name,
            source_text: source_text.into(),
            source_kind: SourceKind::Script,
            features: Vec::new(),
            expectation: Expectation::Success,
        }
    }

    pub fn with_kind(mut self, kind: SourceKind) -> Self {
        self.source_kind = kind;
        self
    }

    pub fn with_features<I, S>(mut self, features: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.features = features.into_iter().map(Into::into).collect();
        self
    }

    pub fn expecting(mut self, expectation: Expectation) -> Self {
        self.expectation = expectation;
        self
    }

    /// First path component of the file name (`language`, `built-ins`, ...)
    pub fn chapter(&self) -> &str {
        self.file_name.split('/').next().unwrap_or("unknown")
    }
}
