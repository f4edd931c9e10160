//! Lazy producer of test records from a test262 checkout
//!
//! Walks `<root>/test` in file-name order and turns every test file into one
//! or two records (non-strict and strict scenarios). Nothing is read ahead:
//! a file is only loaded once the previous file's records are consumed.

use std::collections::VecDeque;
use std::fs;
use std::path::{Path, PathBuf};

use walkdir::{DirEntry, WalkDir};

use super::{Expectation, SourceKind, TestMetadata, TestRecord};
use crate::error::{Error, Result};

/// Prefix added to the source of strict-mode scenarios
pub const STRICT_PRELUDE: &str = "\"use strict\";\n";

/// Execution scenario of a test file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scenario {
    Default,
    Strict,
}

impl Scenario {
    pub fn name(&self) -> &'static str {
        match self {
            Scenario::Default => "default",
            Scenario::Strict => "strict mode",
        }
    }

    /// Scenarios a file with the given metadata runs under
    pub fn for_metadata(meta: &TestMetadata) -> &'static [Scenario] {
        if meta.has_flag("raw") || meta.has_flag("module") || meta.has_flag("noStrict") {
            &[Scenario::Default]
        } else if meta.has_flag("onlyStrict") {
            &[Scenario::Strict]
        } else {
            &[Scenario::Default, Scenario::Strict]
        }
    }
}

/// Turn one test file into its records.
///
/// `file_name` is the corpus-relative path (without the leading `test/`).
pub fn expand(file_name: &str, contents: &str) -> std::result::Result<Vec<TestRecord>, String> {
    let meta = TestMetadata::parse(contents)?;
    let kind = if meta.has_flag("module") {
        SourceKind::Module
    } else {
        SourceKind::Script
    };
    let expectation = Expectation::from_declared_phase(meta.negative_phase());

    let records = Scenario::for_metadata(&meta)
        .iter()
        .map(|scenario| {
            let source_text = match scenario {
                Scenario::Default => contents.to_string(),
                Scenario::Strict => format!("{}{}", STRICT_PRELUDE, contents),
            };
            TestRecord::new(file_name, scenario.name(), source_text)
                .with_kind(kind)
                .with_features(meta.features.iter().cloned())
                .expecting(expectation)
        })
        .collect();
    Ok(records)
}

/// Streaming reader over `<root>/test`
pub struct Test262Stream {
    test_dir: PathBuf,
    walker: walkdir::IntoIter,
    pending: VecDeque<TestRecord>,
}

impl Test262Stream {
    /// Open the corpus rooted at a test262 checkout.
    ///
    /// Fails if `<root>/test` is not a directory.
    pub fn open(root: impl AsRef<Path>) -> Result<Self> {
        let test_dir = root.as_ref().join("test");
        if !test_dir.is_dir() {
            return Err(Error::io(
                &test_dir,
                std::io::Error::new(std::io::ErrorKind::NotFound, "test262 test directory not found"),
            ));
        }

        let walker = WalkDir::new(&test_dir).sort_by_file_name().into_iter();
        Ok(Self {
            test_dir,
            walker,
            pending: VecDeque::new(),
        })
    }

    fn load(&mut self, path: &Path) -> Result<()> {
        let relative = path.strip_prefix(&self.test_dir).unwrap_or(path);
        let file_name = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/");

        let contents = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        let records = expand(&file_name, &contents).map_err(|message| Error::corpus(path, message))?;

        self.pending.extend(records);
        Ok(())
    }
}

fn is_test_file(entry: &DirEntry) -> bool {
    let name = entry.file_name().to_string_lossy();
    entry.file_type().is_file() && name.ends_with(".js") && !name.contains("_FIXTURE")
}

impl Iterator for Test262Stream {
    type Item = Result<TestRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(record) = self.pending.pop_front() {
                return Some(Ok(record));
            }

            let entry = match self.walker.next()? {
                Ok(entry) => entry,
                Err(e) => {
                    let path = e
                        .path()
                        .map(Path::to_path_buf)
                        .unwrap_or_else(|| self.test_dir.clone());
                    return Some(Err(Error::io(path, e.into())));
                }
            };

            if !is_test_file(&entry) {
                continue;
            }
            if let Err(e) = self.load(entry.path()) {
                return Some(Err(e));
            }
        }
    }
}
