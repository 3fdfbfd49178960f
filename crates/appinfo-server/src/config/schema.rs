use std::net::SocketAddr;

use serde::Deserialize;
use appinfo_core::error::{AppInfoError, Result};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AppInfoConfig {
    pub version: u32,

    #[serde(default)]
    pub server: ServerSection,

    #[serde(default)]
    pub metadata: MetadataSection,
}

impl Default for AppInfoConfig {
    fn default() -> Self {
        Self {
            version: 1,
            server: ServerSection::default(),
            metadata: MetadataSection::default(),
        }
    }
}

impl AppInfoConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(AppInfoError::UnsupportedVersion(self.version));
        }
        self.server.validate()?;
        self.metadata.git.validate("metadata.git")?;
        self.metadata.build.validate("metadata.build")?;
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerSection {
    #[serde(default = "default_listen")]
    pub listen: String,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            listen: default_listen(),
        }
    }
}

impl ServerSection {
    pub fn validate(&self) -> Result<()> {
        self.listen_addr().map(|_| ())
    }

    pub fn listen_addr(&self) -> Result<SocketAddr> {
        self.listen.parse().map_err(|e| {
            AppInfoError::InvalidConfig(format!(
                "server.listen must be a socket address ({}): {e}",
                self.listen
            ))
        })
    }
}

fn default_listen() -> String {
    "0.0.0.0:8080".into()
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MetadataSection {
    #[serde(default)]
    pub git: ProviderConfig,

    #[serde(default)]
    pub build: ProviderConfig,
}

/// Where one metadata record comes from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetadataSource {
    /// Values captured by the build script and compiled into the binary.
    #[default]
    Embedded,
    /// A `.properties` artifact read at startup.
    File,
    /// Never report this section.
    Disabled,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProviderConfig {
    #[serde(default)]
    pub source: MetadataSource,

    #[serde(default)]
    pub path: Option<String>,
}

impl ProviderConfig {
    pub fn validate(&self, field: &str) -> Result<()> {
        match (self.source, self.path.as_deref()) {
            (MetadataSource::File, None) => Err(AppInfoError::InvalidConfig(format!(
                "{field}.path is required when source is file"
            ))),
            (MetadataSource::File, Some(p)) if p.trim().is_empty() => Err(
                AppInfoError::InvalidConfig(format!("{field}.path must not be empty")),
            ),
            (MetadataSource::Embedded | MetadataSource::Disabled, Some(_)) => Err(
                AppInfoError::InvalidConfig(format!("{field}.path is only valid with source: file")),
            ),
            _ => Ok(()),
        }
    }
}
