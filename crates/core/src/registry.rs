//! The flag registry: every flag name mapped to its entry.

use crate::flag::FlagEntry;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// All flags, keyed by name.
///
/// Backed by a `BTreeMap`, so iteration and serialization are always in
/// ascending lexicographic key order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FlagRegistry {
    flags: BTreeMap<String, FlagEntry>,
}

impl FlagRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a flag by name.
    pub fn get(&self, name: &str) -> Option<&FlagEntry> {
        self.flags.get(name)
    }

    /// Check if a flag exists.
    pub fn contains(&self, name: &str) -> bool {
        self.flags.contains_key(name)
    }

    /// Flag names in sorted order.
    pub fn names(&self) -> Vec<String> {
        self.flags.keys().cloned().collect()
    }

    /// Iterate flags in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FlagEntry)> {
        self.flags.iter().map(|(name, entry)| (name.as_str(), entry))
    }

    /// Number of flags.
    pub fn len(&self) -> usize {
        self.flags.len()
    }

    /// Check if the registry has no flags.
    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }

    /// Insert or replace a flag, returning the previous entry.
    pub fn insert(&mut self, name: impl Into<String>, entry: FlagEntry) -> Option<FlagEntry> {
        self.flags.insert(name.into(), entry)
    }

    /// Remove a flag, returning its entry.
    pub fn remove(&mut self, name: &str) -> Option<FlagEntry> {
        self.flags.remove(name)
    }
}

impl FromIterator<(String, FlagEntry)> for FlagRegistry {
    fn from_iter<I: IntoIterator<Item = (String, FlagEntry)>>(iter: I) -> Self {
        Self {
            flags: iter.into_iter().collect(),
        }
    }
}
