//! Info snapshot assembly behind `GET /info`.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::metadata::{iso8601, BuildInfo, GitInfo};
use crate::uptime::{Clock, Uptime};

/// Free-form git key carrying the one-line commit message.
pub const COMMIT_MESSAGE_KEY: &str = "commit.message.short";

/// Holds the resolved metadata and the process start instant.
///
/// Everything here is immutable after construction; `get_info` only reads
/// it plus the clock, so one instance serves any number of concurrent
/// requests without locking.
pub struct InfoEndpoint {
    git: Option<GitInfo>,
    build: Option<BuildInfo>,
    clock: Arc<dyn Clock>,
    started_at: DateTime<Utc>,
}

impl InfoEndpoint {
    /// Captures the start instant from `clock`.
    pub fn new(git: Option<GitInfo>, build: Option<BuildInfo>, clock: Arc<dyn Clock>) -> Self {
        let started_at = clock.now();
        Self {
            git,
            build,
            clock,
            started_at,
        }
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn git(&self) -> Option<&GitInfo> {
        self.git.as_ref()
    }

    pub fn build(&self) -> Option<&BuildInfo> {
        self.build.as_ref()
    }

    pub fn uptime(&self) -> Uptime {
        Uptime::between(self.started_at, self.clock.now())
    }

    pub fn get_info(&self) -> InfoResponse {
        InfoResponse {
            git: self.git.as_ref().map(GitSection::from),
            build: self.build.as_ref().map(BuildSection::from),
            uptime: UptimeSection::from(self.uptime()),
        }
    }
}

/// Body of `GET /info`. Sections whose metadata is unavailable are omitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InfoResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub git: Option<GitSection>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub build: Option<BuildSection>,
    pub uptime: UptimeSection,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GitSection {
    pub commit_id: String,
    pub commit_id_full: String,
    pub branch: Option<String>,
    pub commit_time: Option<String>,
    pub commit_message: Option<String>,
}

impl From<&GitInfo> for GitSection {
    fn from(git: &GitInfo) -> Self {
        Self {
            commit_id: git.short_commit_id(),
            commit_id_full: git.commit_id().to_string(),
            branch: git.branch().map(str::to_string),
            commit_time: git.commit_time().map(iso8601),
            commit_message: git.get(COMMIT_MESSAGE_KEY).map(str::to_string),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildSection {
    pub version: Option<String>,
    pub name: Option<String>,
    pub time: Option<String>,
}

impl From<&BuildInfo> for BuildSection {
    fn from(build: &BuildInfo) -> Self {
        Self {
            version: build.version().map(str::to_string),
            name: build.name().map(str::to_string),
            time: build.time().map(iso8601),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UptimeSection {
    pub seconds: u64,
    pub formatted: String,
    pub start_time: String,
}

impl From<Uptime> for UptimeSection {
    fn from(uptime: Uptime) -> Self {
        Self {
            seconds: uptime.seconds(),
            formatted: uptime.formatted(),
            start_time: iso8601(uptime.started_at()),
        }
    }
}
