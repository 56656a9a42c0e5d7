//! Flag entries and their per-environment state.

use serde::de::Deserializer;
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// The state of a flag in a single environment.
///
/// Only `enabled` is required; the edit stamps are absent on hand-written
/// entries until the state is first flipped by the editor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvironmentState {
    /// Whether the flag is on in this environment.
    pub enabled: bool,
    /// Who last flipped `enabled`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_edited_by: Option<String>,
    /// When `enabled` was last flipped (RFC 3339).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_edited_at: Option<String>,
    /// Fields this tool does not manage, carried through untouched.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl EnvironmentState {
    /// Create a state stamped by `user` at `at`.
    pub fn new(enabled: bool, user: impl Into<String>, at: impl Into<String>) -> Self {
        Self {
            enabled,
            last_edited_by: Some(user.into()),
            last_edited_at: Some(at.into()),
            extra: Map::new(),
        }
    }
}

/// A single feature flag.
///
/// Serialized as one JSON object: `createdBy`, `createdAt`, one key per
/// environment holding an [`EnvironmentState`], then any other keys.
/// On load, an object value that reads as an [`EnvironmentState`] (it has a
/// boolean `enabled`) is taken as an environment; everything else is kept
/// in `extra`.
#[derive(Debug, Clone, PartialEq)]
pub struct FlagEntry {
    /// Who created the flag. Never changes after creation.
    pub created_by: String,
    /// When the flag was created (RFC 3339). Never changes after creation.
    pub created_at: String,
    /// Per-environment state, keyed by environment name.
    pub environments: BTreeMap<String, EnvironmentState>,
    /// Keys that are not environment states, carried through untouched.
    pub extra: Map<String, Value>,
}

impl FlagEntry {
    /// Create an entry with no environment state yet.
    pub fn new(created_by: impl Into<String>, created_at: impl Into<String>) -> Self {
        Self {
            created_by: created_by.into(),
            created_at: created_at.into(),
            environments: BTreeMap::new(),
            extra: Map::new(),
        }
    }

    /// Get the state stored for an environment.
    pub fn environment(&self, name: &str) -> Option<&EnvironmentState> {
        self.environments.get(name)
    }

    /// Check if the flag is on in the given environment.
    ///
    /// Environments with no stored state count as disabled.
    pub fn is_enabled_in(&self, name: &str) -> bool {
        self.environment(name).is_some_and(|state| state.enabled)
    }

    /// Names of the environments the flag is on in, in key order.
    pub fn enabled_environments(&self) -> Vec<&str> {
        self.environments
            .iter()
            .filter(|(_, state)| state.enabled)
            .map(|(name, _)| name.as_str())
            .collect()
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawEntry {
    created_by: String,
    created_at: String,
    #[serde(flatten)]
    rest: Map<String, Value>,
}

impl<'de> Deserialize<'de> for FlagEntry {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = RawEntry::deserialize(deserializer)?;
        let mut entry = FlagEntry::new(raw.created_by, raw.created_at);

        for (key, value) in raw.rest {
            let state = match &value {
                Value::Object(_) => serde_json::from_value::<EnvironmentState>(value.clone()).ok(),
                _ => None,
            };
            match state {
                Some(state) => {
                    entry.environments.insert(key, state);
                }
                None => {
                    entry.extra.insert(key, value);
                }
            }
        }

        Ok(entry)
    }
}

impl Serialize for FlagEntry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let extra = self
            .extra
            .iter()
            .filter(|(key, _)| !self.environments.contains_key(key.as_str()));

        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("createdBy", &self.created_by)?;
        map.serialize_entry("createdAt", &self.created_at)?;
        for (name, state) in &self.environments {
            map.serialize_entry(name, state)?;
        }
        for (key, value) in extra {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}
