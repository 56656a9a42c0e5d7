//! Edit resolution: turning a user's choice into a new registry state.
//!
//! Per-environment edit stamps only move when the enabled state actually
//! flips. Creation stamps are written once and then carried forward.

use crate::environment::EnvironmentSet;
use crate::error::{EditError, Result};
use crate::flag::{EnvironmentState, FlagEntry};
use crate::registry::FlagRegistry;
use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// What the user wants to do to the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Add,
    Edit,
    Remove,
}

impl Action {
    /// Actions that make sense for a registry. Editing and removing need
    /// at least one existing flag.
    pub fn available(has_flags: bool) -> &'static [Action] {
        if has_flags {
            &[Action::Add, Action::Edit, Action::Remove]
        } else {
            &[Action::Add]
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Add => "add",
            Action::Edit => "edit",
            Action::Remove => "remove",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Action {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "add" | "a" => Ok(Action::Add),
            "edit" | "e" => Ok(Action::Edit),
            "remove" | "r" | "rm" => Ok(Action::Remove),
            other => Err(format!("unknown action: {other}")),
        }
    }
}

/// Who is editing, and when. Every field stamped in one edit cycle gets the
/// same values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditStamp {
    pub user: String,
    pub at: DateTime<Utc>,
}

impl EditStamp {
    pub fn new(user: impl Into<String>, at: DateTime<Utc>) -> Self {
        Self {
            user: user.into(),
            at,
        }
    }

    /// Stamp for `user` at the current time.
    pub fn now(user: impl Into<String>) -> Self {
        Self::new(user, Utc::now())
    }

    /// RFC 3339 in UTC with millisecond precision, e.g.
    /// `2024-03-01T12:00:00.000Z`. Fixed width, so string order matches
    /// time order.
    pub fn timestamp(&self) -> String {
        self.at.to_rfc3339_opts(SecondsFormat::Millis, true)
    }
}

/// A fully specified edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditRequest {
    pub action: Action,
    pub flag: String,
    /// Environments the flag should be on in. Ignored for removals.
    pub enabled_in: Vec<String>,
}

impl EditRequest {
    pub fn add(flag: impl Into<String>, enabled_in: Vec<String>) -> Self {
        Self {
            action: Action::Add,
            flag: flag.into(),
            enabled_in,
        }
    }

    pub fn edit(flag: impl Into<String>, enabled_in: Vec<String>) -> Self {
        Self {
            action: Action::Edit,
            flag: flag.into(),
            enabled_in,
        }
    }

    pub fn remove(flag: impl Into<String>) -> Self {
        Self {
            action: Action::Remove,
            flag: flag.into(),
            enabled_in: Vec::new(),
        }
    }
}

/// What an applied edit did.
#[derive(Debug, Clone, PartialEq)]
pub enum EditOutcome {
    Created { flag: String },
    /// `changed` lists the environments whose enabled state flipped.
    Updated { flag: String, changed: Vec<String> },
    Removed { flag: String, entry: FlagEntry },
}

/// Check that a name can be used as a flag: non-empty, no whitespace.
pub fn validate_flag_name(name: &str) -> Result<()> {
    let invalid = |reason| EditError::InvalidFlagName {
        name: name.to_string(),
        reason,
    };

    if name.is_empty() {
        return Err(invalid("name is empty"));
    }
    if name.chars().any(char::is_whitespace) {
        return Err(invalid("name may not contain whitespace"));
    }

    Ok(())
}

const MANAGED_STATE_KEYS: [&str; 3] = ["enabled", "lastEditedBy", "lastEditedAt"];

/// Compute the entry a flag should have after an add or edit.
///
/// For every known environment, the previous state is kept verbatim when
/// the requested enabled value matches it; otherwise the state is replaced
/// and stamped. Environments missing from `environments` are dropped;
/// non-environment keys are carried over.
pub fn resolve_entry(
    environments: &EnvironmentSet,
    previous: Option<&FlagEntry>,
    enabled_in: &[String],
    stamp: &EditStamp,
) -> FlagEntry {
    let at = stamp.timestamp();

    let mut entry = match previous {
        Some(prev) => {
            let mut entry = FlagEntry::new(prev.created_by.clone(), prev.created_at.clone());
            entry.extra = prev.extra.clone();
            entry
        }
        None => FlagEntry::new(stamp.user.clone(), at.clone()),
    };

    for name in environments.iter() {
        let enabled = enabled_in.iter().any(|e| e == name);
        // A key named after the environment that did not read as a state.
        let leftover = entry.extra.remove(name);

        let state = match previous.and_then(|p| p.environment(name)) {
            Some(prior) if prior.enabled == enabled => prior.clone(),
            Some(prior) => EnvironmentState {
                enabled,
                last_edited_by: Some(stamp.user.clone()),
                last_edited_at: Some(at.clone()),
                extra: prior.extra.clone(),
            },
            None => {
                let mut state = EnvironmentState::new(enabled, stamp.user.clone(), at.clone());
                if let Some(Value::Object(fields)) = leftover {
                    state.extra = fields
                        .into_iter()
                        .filter(|(key, _)| !MANAGED_STATE_KEYS.contains(&key.as_str()))
                        .collect();
                }
                state
            }
        };
        entry.environments.insert(name.to_string(), state);
    }

    entry
}

impl FlagRegistry {
    /// Apply an edit in place.
    pub fn apply(
        &mut self,
        request: &EditRequest,
        environments: &EnvironmentSet,
        stamp: &EditStamp,
    ) -> Result<EditOutcome> {
        let flag = request.flag.as_str();

        match request.action {
            Action::Remove => {
                let entry = self
                    .remove(flag)
                    .ok_or_else(|| EditError::UnknownFlag(flag.to_string()))?;
                Ok(EditOutcome::Removed {
                    flag: flag.to_string(),
                    entry,
                })
            }
            Action::Add | Action::Edit => {
                if let Some(env) = request
                    .enabled_in
                    .iter()
                    .find(|env| !environments.contains(env))
                {
                    return Err(EditError::UnknownEnvironment(env.clone()));
                }

                let previous = self.get(flag);
                match (request.action, previous) {
                    (Action::Add, Some(_)) => {
                        return Err(EditError::DuplicateFlag(flag.to_string()))
                    }
                    (Action::Edit, None) => return Err(EditError::UnknownFlag(flag.to_string())),
                    (Action::Add, None) => validate_flag_name(flag)?,
                    _ => {}
                }

                let entry = resolve_entry(environments, previous, &request.enabled_in, stamp);

                let outcome = match previous {
                    None => EditOutcome::Created {
                        flag: flag.to_string(),
                    },
                    Some(prev) => EditOutcome::Updated {
                        flag: flag.to_string(),
                        changed: environments
                            .iter()
                            .filter(|env| prev.environment(env) != entry.environment(env))
                            .map(str::to_string)
                            .collect(),
                    },
                };

                self.insert(flag, entry);
                Ok(outcome)
            }
        }
    }
}
