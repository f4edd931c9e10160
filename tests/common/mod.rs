//! Shared test helpers for integration tests

use std::fs;
use std::path::Path;
use std::sync::Mutex;

use test262_parser_harness::{
    Allowlist, CapabilityMap, Harness, HarnessConfig, ParseRequest, Rejection, SkipRules, Subject,
    SubjectResult, TestRecord,
};

/// In-memory parser: rejects any source containing one of `reject_tokens`
/// with a parse-phase error and records every capability it was asked for.
#[derive(Default)]
pub struct ScriptedParser {
    pub reject_tokens: Vec<&'static str>,
    pub calls: Mutex<Vec<(String, Vec<String>)>>,
}

#[allow(dead_code)]
impl ScriptedParser {
    pub fn rejecting(tokens: &[&'static str]) -> Self {
        Self {
            reject_tokens: tokens.to_vec(),
            ..Self::default()
        }
    }

    /// Sources the parser was called with, sorted
    pub fn sources(&self) -> Vec<String> {
        let mut sources: Vec<String> = self.calls.lock().unwrap().iter().map(|(s, _)| s.clone()).collect();
        sources.sort();
        sources
    }

    pub fn capabilities_for(&self, source: &str) -> Option<Vec<String>> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .find(|(s, _)| s == source)
            .map(|(_, caps)| caps.clone())
    }
}

impl Subject for ScriptedParser {
    fn parse(&self, request: &ParseRequest<'_>) -> SubjectResult {
        self.calls.lock().unwrap().push((
            request.source_text.to_string(),
            request.capabilities.iter().map(|c| c.to_string()).collect(),
        ));
        match self.reject_tokens.iter().find(|t| request.source_text.contains(*t)) {
            Some(token) => Err(Rejection::syntax(format!("unexpected token {}", token)).into()),
            None => Ok(()),
        }
    }
}

/// Config with a small feature table and the default skip rules
#[allow(dead_code)]
pub fn test_config(jobs: usize) -> HarnessConfig {
    let mut capabilities = CapabilityMap::new();
    capabilities
        .map_feature("import-assertions", "importAssertions")
        .ignore_feature("BigInt");
    HarnessConfig {
        capabilities,
        skip_rules: SkipRules::with_defaults(),
        jobs,
        log_interval: 0,
        ..HarnessConfig::default()
    }
}

#[allow(dead_code)]
pub fn harness<S: Subject>(subject: S, allowlist: &[&str]) -> Harness<S> {
    Harness::with_allowlist(test_config(2), subject, allowlist.iter().copied().collect::<Allowlist>())
}

/// Wrap records as a corpus that never fails
#[allow(dead_code)]
pub fn corpus(records: Vec<TestRecord>) -> Vec<test262_parser_harness::Result<TestRecord>> {
    records.into_iter().map(Ok).collect()
}

/// Write a test262 file with YAML front matter under `<root>/test/`
#[allow(dead_code)]
pub fn write_test(root: &Path, relative: &str, front_matter: &str, body: &str) {
    let path = root.join("test").join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, format!("/*---\n{}\n---*/\n{}\n", front_matter, body)).unwrap();
}
