use chrono::{DateTime, Utc};

use super::{parse_timestamp, Properties};
use crate::error::Result;

/// Artifact facts recorded at packaging time (`build-info.properties` with
/// the `build.` prefix stripped).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildInfo {
    entries: Properties,
    time: Option<DateTime<Utc>>,
}

impl BuildInfo {
    /// Absent when none of `version`, `name` or `time` was recorded.
    pub fn from_properties(entries: Properties) -> Result<Option<Self>> {
        if ["version", "name", "time"]
            .iter()
            .all(|key| entries.get(key).is_none())
        {
            return Ok(None);
        }
        let time = entries.get("time").map(parse_timestamp).transpose()?;
        Ok(Some(Self { entries, time }))
    }

    pub fn version(&self) -> Option<&str> {
        self.entries.get("version")
    }

    pub fn name(&self) -> Option<&str> {
        self.entries.get("name")
    }

    pub fn time(&self) -> Option<DateTime<Utc>> {
        self.time
    }
}
