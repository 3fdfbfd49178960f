//! Server config loader (strict parsing).

pub mod schema;

use std::fs;
use std::path::Path;

use appinfo_core::error::{AppInfoError, Result};

pub use schema::{AppInfoConfig, MetadataSection, MetadataSource, ProviderConfig, ServerSection};

/// Environment variable naming the config file.
pub const CONFIG_ENV: &str = "APPINFO_CONFIG";
/// Config path used when `APPINFO_CONFIG` is unset.
pub const DEFAULT_CONFIG_PATH: &str = "appinfo.yaml";

/// Resolve and load the config from `APPINFO_CONFIG` or the default path.
pub fn load() -> Result<AppInfoConfig> {
    load_with(std::env::var(CONFIG_ENV).ok(), Path::new(DEFAULT_CONFIG_PATH))
}

/// An explicitly named file must exist. The default path is optional: when
/// it is missing the built-in defaults apply.
pub fn load_with(explicit: Option<String>, default_path: &Path) -> Result<AppInfoConfig> {
    if let Some(path) = explicit {
        return load_from_file(&path);
    }
    if default_path.exists() {
        return load_from_path(default_path);
    }
    tracing::info!(path = %default_path.display(), "no config file, using defaults");
    Ok(AppInfoConfig::default())
}

pub fn load_from_file(path: &str) -> Result<AppInfoConfig> {
    load_from_path(Path::new(path))
}

fn load_from_path(path: &Path) -> Result<AppInfoConfig> {
    let s = fs::read_to_string(path)
        .map_err(|e| AppInfoError::io(format!("read config {}", path.display()), e))?;
    load_from_str(&s)
}

pub fn load_from_str(s: &str) -> Result<AppInfoConfig> {
    let cfg: AppInfoConfig = serde_yaml::from_str(s)
        .map_err(|e| AppInfoError::InvalidConfig(format!("invalid yaml: {e}")))?;
    cfg.validate()?;
    Ok(cfg)
}
