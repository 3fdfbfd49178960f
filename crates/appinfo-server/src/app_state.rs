//! Shared application state for the appinfo server.

use std::sync::Arc;

use appinfo_core::error::Result;
use appinfo_core::{InfoEndpoint, SystemClock};

use crate::config::AppInfoConfig;
use crate::metadata;
use crate::obs::metrics::AppMetrics;

#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    info: InfoEndpoint,
    metrics: AppMetrics,
}

impl AppState {
    pub fn new(info: InfoEndpoint) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                info,
                metrics: AppMetrics::default(),
            }),
        }
    }

    /// Resolve metadata per config and capture the process start instant.
    /// Returns Result so main can report a bad metadata artifact cleanly.
    pub fn from_config(cfg: &AppInfoConfig) -> Result<Self> {
        let resolved = metadata::resolve(&cfg.metadata)?;
        let info = InfoEndpoint::new(resolved.git, resolved.build, Arc::new(SystemClock::new()));
        Ok(Self::new(info))
    }

    pub fn info(&self) -> &InfoEndpoint {
        &self.inner.info
    }

    pub fn metrics(&self) -> &AppMetrics {
        &self.inner.metrics
    }

    pub fn set_draining(&self) {
        self.inner.metrics.set_draining();
    }

    pub fn is_draining(&self) -> bool {
        self.inner.metrics.is_draining()
    }

    /// Gauges computed at scrape time.
    pub fn metrics_extra(&self) -> [(&'static str, u64); 1] {
        [("appinfo_uptime_seconds", self.info().uptime().seconds())]
    }
}
