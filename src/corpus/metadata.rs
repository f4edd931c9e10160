//! test262 front matter
//!
//! Every test262 file carries a YAML block between `/*---` and `---*/`
//! describing its features, flags and negative expectation.

use serde::Deserialize;

use super::Phase;

/// Expected error from test metadata
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Negative {
    /// Error phase (parse, early, resolution, runtime)
    pub phase: Phase,
    /// Error type (SyntaxError, ReferenceError, ...)
    #[serde(rename = "type")]
    pub error_type: String,
}

/// Metadata parsed from a test's front matter
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TestMetadata {
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default)]
    pub flags: Vec<String>,
    #[serde(default)]
    pub negative: Option<Negative>,
}

impl TestMetadata {
    /// Parse the front matter of a test file.
    ///
    /// Returns a description of the problem when the block is missing or is
    /// not valid YAML; the caller attaches the file path.
    pub fn parse(source: &str) -> Result<Self, String> {
        let start = source
            .find("/*---")
            .ok_or_else(|| "missing front matter".to_string())?;
        let body = &source[start + 5..];
        let end = body
            .find("---*/")
            .ok_or_else(|| "unterminated front matter".to_string())?;

        serde_yaml::from_str(&body[..end]).map_err(|e| format!("invalid front matter: {}", e))
    }

    pub fn has_flag(&self, flag: &str) -> bool {
        self.flags.iter().any(|f| f == flag)
    }

    /// Phase of the declared negative expectation, if any
    pub fn negative_phase(&self) -> Option<Phase> {
        self.negative.as_ref().map(|neg| neg.phase)
    }
}
