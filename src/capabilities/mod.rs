//! Capability resolution
//!
//! Maps the features a test declares onto the parser options ("capabilities")
//! that must be switched on for it. Features the parser handles without a
//! switch are *ignored*; anything else is *unmapped* and gets collected for
//! the end-of-run report instead of failing the run.

pub mod defaults;

use rustc_hash::{FxHashMap as HashMap, FxHashSet as HashSet};
use std::collections::BTreeSet;

/// Feature → capability table plus the set of deliberately ignored features
#[derive(Debug, Clone, Default)]
pub struct CapabilityMap {
    feature_to_capability: HashMap<String, String>,
    ignored: HashSet<String>,
}

impl CapabilityMap {
    /// Create an empty map: every feature is unmapped
    pub fn new() -> Self {
        Self::default()
    }

    /// The tables used against the real test262 corpus
    pub fn with_defaults() -> Self {
        let mut map = Self::new();
        for (feature, capability) in defaults::FEATURE_CAPABILITIES {
            map.map_feature(*feature, *capability);
        }
        for feature in defaults::IGNORED_FEATURES {
            map.ignore_feature(*feature);
        }
        map
    }

    /// Map a feature onto a capability switch, replacing any earlier mapping
    pub fn map_feature(&mut self, feature: impl Into<String>, capability: impl Into<String>) -> &mut Self {
        self.feature_to_capability.insert(feature.into(), capability.into());
        self
    }

    pub fn ignore_feature(&mut self, feature: impl Into<String>) -> &mut Self {
        self.ignored.insert(feature.into());
        self
    }

    pub fn capability_for(&self, feature: &str) -> Option<&str> {
        self.feature_to_capability.get(feature).map(String::as_str)
    }

    pub fn is_ignored(&self, feature: &str) -> bool {
        self.ignored.contains(feature)
    }

    pub fn mapped_len(&self) -> usize {
        self.feature_to_capability.len()
    }

    pub fn ignored_len(&self) -> usize {
        self.ignored.len()
    }

    /// Resolve a test's features lazily.
    ///
    /// The returned iterator yields capabilities in the order the features
    /// were declared. Unmapped features are recorded in `unmapped` as the
    /// iterator is consumed. Yielded names borrow from the map only, so they
    /// may outlive the feature list.
    pub fn resolve<'m, 'f>(
        &'m self,
        features: &'f [String],
        unmapped: &'f mut UnmappedFeatures,
    ) -> Capabilities<'m, 'f> {
        Capabilities {
            map: self,
            features: features.iter(),
            unmapped,
        }
    }
}

/// Iterator over the capabilities a single test needs
pub struct Capabilities<'m, 'f> {
    map: &'m CapabilityMap,
    features: std::slice::Iter<'f, String>,
    unmapped: &'f mut UnmappedFeatures,
}

impl<'m, 'f> Iterator for Capabilities<'m, 'f> {
    type Item = &'m str;

    fn next(&mut self) -> Option<Self::Item> {
        let map = self.map;
        for feature in self.features.by_ref() {
            if let Some(capability) = map.capability_for(feature) {
                return Some(capability);
            }
            if !map.is_ignored(feature) {
                self.unmapped.record(feature);
            }
        }
        None
    }
}

/// Features seen during a run that are neither mapped nor ignored
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UnmappedFeatures {
    features: BTreeSet<String>,
}

impl UnmappedFeatures {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a feature; recording it again is a no-op
    pub fn record(&mut self, feature: &str) {
        if !self.features.contains(feature) {
            tracing::debug!(feature, "unmapped feature");
            self.features.insert(feature.to_string());
        }
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn contains(&self, feature: &str) -> bool {
        self.features.contains(feature)
    }

    /// Features in lexicographic order
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.features.iter().map(String::as_str)
    }

    pub fn into_sorted_vec(self) -> Vec<String> {
        self.features.into_iter().collect()
    }
}
