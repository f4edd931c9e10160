//! Skip rules
//!
//! Whole directories of the corpus that are never sent to the parser.

/// Directories skipped by default: regular expression pattern syntax is
/// validated by a separate component, not by the parser.
pub const DEFAULT_SKIP_PREFIXES: &[&str] = &["built-ins/RegExp/", "language/literals/regexp/"];

/// Ordered list of corpus path prefixes to skip
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SkipRules {
    prefixes: Vec<String>,
}

impl SkipRules {
    pub fn new<I, S>(prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            prefixes: prefixes.into_iter().map(Into::into).collect(),
        }
    }

    pub fn with_defaults() -> Self {
        Self::new(DEFAULT_SKIP_PREFIXES.iter().copied())
    }

    /// `file_name` is corpus-relative, without the leading `test/`
    pub fn should_skip(&self, file_name: &str) -> bool {
        self.prefixes.iter().any(|prefix| file_name.starts_with(prefix.as_str()))
    }

    pub fn prefixes(&self) -> &[String] {
        &self.prefixes
    }
}
