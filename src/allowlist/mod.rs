//! Allowlist of known failures
//!
//! The allowlist is a flat text file: one test id per line, sorted, no
//! duplicates, no blank lines, trailing newline. Keeping it in that shape
//! makes every change to it a readable line diff.

use serde::Serialize;
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use crate::error::{Error, Result};

/// What to do with the allowlist at the end of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AllowlistMode {
    /// Compare against the allowlist and fail on any drift
    #[default]
    Report,
    /// Replace the allowlist with the current set of failures
    Update,
}

/// Set of test ids accepted as currently failing
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Allowlist {
    ids: BTreeSet<String>,
}

impl Allowlist {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse allowlist text. Whitespace around ids and blank lines are
    /// tolerated; duplicates collapse.
    pub fn parse(text: &str) -> Self {
        text.lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect()
    }

    /// Load the allowlist file. A missing file is an empty allowlist.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        match fs::read_to_string(path) {
            Ok(text) => {
                let allowlist = Self::parse(&text);
                tracing::debug!(path = %path.display(), entries = allowlist.len(), "loaded allowlist");
                Ok(allowlist)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!(path = %path.display(), "allowlist not found, starting empty");
                Ok(Self::new())
            }
            Err(e) => Err(Error::io(path, e)),
        }
    }

    /// Serialized form: sorted ids, one per line, trailing newline
    pub fn to_file_contents(&self) -> String {
        let mut out = String::new();
        for id in &self.ids {
            out.push_str(id);
            out.push('\n');
        }
        out
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        fs::write(path, self.to_file_contents()).map_err(|e| Error::io(path, e))?;
        tracing::info!(path = %path.display(), entries = self.len(), "allowlist written");
        Ok(())
    }

    pub fn insert(&mut self, id: impl Into<String>) -> bool {
        self.ids.insert(id.into())
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.ids.iter().map(String::as_str)
    }

    /// Compare this allowlist with the failures of a run.
    ///
    /// `failing` holds every failing id. `passed_allowlisted` holds the
    /// allowlisted ids that were run and passed; it only serves to tell
    /// fixed tests apart from allowlist entries that were never run.
    pub fn reconcile(
        &self,
        failing: &BTreeSet<String>,
        passed_allowlisted: &BTreeSet<String>,
    ) -> Reconciliation {
        let still_failing: Vec<String> = failing.intersection(&self.ids).cloned().collect();
        let newly_failing: Vec<String> = failing.difference(&self.ids).cloned().collect();
        let newly_fixed: Vec<String> = self.ids.difference(failing).cloned().collect();
        let unrecognized = newly_fixed
            .iter()
            .filter(|id| !passed_allowlisted.contains(*id))
            .cloned()
            .collect();

        Reconciliation {
            still_failing,
            newly_failing,
            newly_fixed,
            unrecognized,
        }
    }
}

impl<S: Into<String>> FromIterator<S> for Allowlist {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            ids: iter.into_iter().map(Into::into).collect(),
        }
    }
}

/// Difference between a run's failures and the allowlist. Every list is
/// sorted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Reconciliation {
    /// Failing and allowlisted: tolerated
    pub still_failing: Vec<String>,
    /// Failing but not allowlisted: regressions
    pub newly_failing: Vec<String>,
    /// Allowlisted but not failing: should be dropped from the allowlist
    pub newly_fixed: Vec<String>,
    /// Subset of `newly_fixed` that was not run at all (skipped or removed
    /// from the corpus)
    pub unrecognized: Vec<String>,
}

impl Reconciliation {
    /// True when the allowlist no longer matches the failures
    pub fn has_drift(&self) -> bool {
        !self.newly_failing.is_empty() || !self.newly_fixed.is_empty()
    }
}
