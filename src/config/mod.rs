//! Harness configuration
//!
//! [`HarnessConfig`] is handed to the driver at construction and never
//! changes during a run. The built-in tables target the real test262 corpus;
//! a JSON file can replace any of them:
//!
//! ```json
//! {
//!   "features": { "import-assertions": "importAssertions" },
//!   "ignoredFeatures": ["BigInt", "class"],
//!   "skip": ["built-ins/RegExp/"]
//! }
//! ```

use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::allowlist::AllowlistMode;
use crate::capabilities::{defaults, CapabilityMap};
use crate::error::{Error, Result};
use crate::filter::SkipRules;

/// Progress is logged after this many tests by default
pub const DEFAULT_LOG_INTERVAL: usize = 500;

/// Configuration for one harness run
#[derive(Debug, Clone)]
pub struct HarnessConfig {
    pub capabilities: CapabilityMap,
    pub skip_rules: SkipRules,
    pub allowlist_path: PathBuf,
    pub mode: AllowlistMode,
    /// Log a progress line every this many tests (0 = never)
    pub log_interval: usize,
    /// Number of concurrent subject invocations
    pub jobs: usize,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            capabilities: CapabilityMap::with_defaults(),
            skip_rules: SkipRules::with_defaults(),
            allowlist_path: PathBuf::from("allowlist.txt"),
            mode: AllowlistMode::Report,
            log_interval: DEFAULT_LOG_INTERVAL,
            jobs: default_jobs(),
        }
    }
}

/// One job per available core
pub fn default_jobs() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

/// Table overrides read from a JSON file
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ConfigFile {
    /// Replaces the feature → capability table
    #[serde(default)]
    pub features: Option<BTreeMap<String, String>>,
    /// Replaces the ignored feature list
    #[serde(default)]
    pub ignored_features: Option<Vec<String>>,
    /// Replaces the skipped path prefixes
    #[serde(default)]
    pub skip: Option<Vec<String>>,
}

impl ConfigFile {
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| Error::config(format!("failed to parse config: {}", e)))
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        Self::from_json(&json)
    }

    /// Apply the overrides on top of `config`
    pub fn apply(self, config: &mut HarnessConfig) -> Result<()> {
        if self.features.is_some() || self.ignored_features.is_some() {
            config.capabilities = self.capability_map()?;
        }
        if let Some(skip) = self.skip {
            config.skip_rules = SkipRules::new(skip);
        }
        Ok(())
    }

    fn capability_map(&self) -> Result<CapabilityMap> {
        let mut map = CapabilityMap::new();
        match &self.features {
            Some(features) => {
                for (feature, capability) in features {
                    if feature.trim().is_empty() || capability.trim().is_empty() {
                        return Err(Error::config("feature and capability names must not be empty"));
                    }
                    map.map_feature(feature.as_str(), capability.as_str());
                }
            }
            None => {
                for (feature, capability) in defaults::FEATURE_CAPABILITIES {
                    map.map_feature(*feature, *capability);
                }
            }
        }

        let ignored: Vec<&str> = match &self.ignored_features {
            Some(ignored) => ignored.iter().map(String::as_str).collect(),
            None => defaults::IGNORED_FEATURES.to_vec(),
        };
        for feature in ignored {
            if map.capability_for(feature).is_some() {
                return Err(Error::config(format!(
                    "feature '{}' is both mapped and ignored",
                    feature
                )));
            }
            map.ignore_feature(feature);
        }
        Ok(map)
    }
}
