use chrono::{DateTime, Utc};

use super::{parse_timestamp, Properties};
use crate::error::Result;

const SHORT_ID_LEN: usize = 7;

/// Version-control facts for the source snapshot the binary was built from.
///
/// Keys follow `git.properties` with the `git.` prefix stripped. Besides the
/// typed accessors, any other key stays reachable through [`GitInfo::get`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitInfo {
    entries: Properties,
    commit_id: String,
    commit_time: Option<DateTime<Utc>>,
}

impl GitInfo {
    /// Build the record from prefix-stripped entries. Without a commit id
    /// there is nothing to report and the record is absent.
    pub fn from_properties(entries: Properties) -> Result<Option<Self>> {
        let Some(commit_id) = entries
            .get("commit.id")
            .or_else(|| entries.get("commit.id.full"))
            .map(str::to_string)
        else {
            return Ok(None);
        };
        let commit_time = entries.get("commit.time").map(parse_timestamp).transpose()?;
        Ok(Some(Self {
            entries,
            commit_id,
            commit_time,
        }))
    }

    /// Full commit id.
    pub fn commit_id(&self) -> &str {
        &self.commit_id
    }

    /// `commit.id.abbrev` when recorded, else the first seven characters of
    /// the full id.
    pub fn short_commit_id(&self) -> String {
        match self.entries.get("commit.id.abbrev") {
            Some(abbrev) => abbrev.to_string(),
            None => self.commit_id.chars().take(SHORT_ID_LEN).collect(),
        }
    }

    pub fn branch(&self) -> Option<&str> {
        self.entries.get("branch")
    }

    pub fn commit_time(&self) -> Option<DateTime<Utc>> {
        self.commit_time
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key)
    }
}
