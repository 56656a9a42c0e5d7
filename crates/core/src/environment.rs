//! The set of known deployment environments.

use serde::de::{self, Deserializer, MapAccess, SeqAccess, Visitor};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Ordered, duplicate-free list of environment names.
///
/// Deserializes from either a JSON array of names or a JSON object whose
/// values are the names (keys are ignored, document order is kept).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct EnvironmentSet(Vec<String>);

impl EnvironmentSet {
    /// Build a set, keeping the first occurrence of each name.
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut set = Vec::new();
        for name in names {
            let name = name.into();
            if !set.contains(&name) {
                set.push(name);
            }
        }
        Self(set)
    }

    /// Check if an environment is known.
    pub fn contains(&self, name: &str) -> bool {
        self.0.iter().any(|n| n == name)
    }

    /// Iterate names in order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Names as a slice.
    pub fn names(&self) -> &[String] {
        &self.0
    }

    /// Number of environments.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if no environments are known.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'de> Deserialize<'de> for EnvironmentSet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct EnvironmentSetVisitor;

        impl<'de> Visitor<'de> for EnvironmentSetVisitor {
            type Value = EnvironmentSet;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("an array or object of environment names")
            }

            fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
                let mut names = Vec::new();
                while let Some(name) = seq.next_element::<String>()? {
                    names.push(name);
                }
                Ok(EnvironmentSet::new(names))
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut names = Vec::new();
                while let Some((_, name)) = map.next_entry::<de::IgnoredAny, String>()? {
                    names.push(name);
                }
                Ok(EnvironmentSet::new(names))
            }
        }

        deserializer.deserialize_any(EnvironmentSetVisitor)
    }
}
