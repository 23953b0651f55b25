//! Canonical entity names loaded once at startup.
//!
//! Accepts either a JSON array of strings (`.json`) or a plain text file with
//! one name per line, where blank lines and `#` comments are ignored.

use anyhow::{anyhow, Context, Result};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// Ordered, duplicate-free set of canonical names.
#[derive(Debug, Clone)]
pub struct Roster {
    names: Vec<String>,
    lookup: HashSet<String>,
}

impl Roster {
    /// Builds a roster, trimming names and keeping the first of any duplicates.
    ///
    /// Fails if no non-empty names remain.
    pub fn from_names<I, S>(names: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut ordered = Vec::new();
        let mut lookup = HashSet::new();

        for name in names {
            let name = name.as_ref().trim();
            if name.is_empty() {
                continue;
            }
            if lookup.insert(name.to_string()) {
                ordered.push(name.to_string());
            }
        }

        if ordered.is_empty() {
            return Err(anyhow!("Roster contains no names"));
        }

        Ok(Self {
            names: ordered,
            lookup,
        })
    }

    /// Loads a roster from disk.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .context(format!("Failed to read roster file: {}", path.display()))?;

        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        let roster = if is_json {
            let names: Vec<String> = serde_json::from_str(&content)
                .context(format!("Failed to parse roster JSON: {}", path.display()))?;
            Self::from_names(names)
        } else {
            Self::from_names(
                content
                    .lines()
                    .map(str::trim)
                    .filter(|line| !line.starts_with('#')),
            )
        };

        roster.context(format!("Invalid roster: {}", path.display()))
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Exact, case-sensitive membership.
    pub fn contains(&self, name: &str) -> bool {
        self.lookup.contains(name)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }
}
