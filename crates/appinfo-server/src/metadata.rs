//! Startup resolution of the git/build records from config.
//!
//! Runs once before the router is built; the resulting records are handed
//! to `InfoEndpoint` and never touched again.

use std::path::Path;

use appinfo_core::error::Result;
use appinfo_core::metadata::{load_properties_file, BUILD_PREFIX, GIT_PREFIX};
use appinfo_core::{BuildInfo, GitInfo, Properties};

use crate::config::{MetadataSection, MetadataSource, ProviderConfig};

/// Values the build script compiled in. Absent git values mean the crate was
/// built outside a checkout.
mod embedded {
    pub const GIT_COMMIT_ID: Option<&str> = option_env!("APPINFO_GIT_COMMIT_ID");
    pub const GIT_COMMIT_ID_ABBREV: Option<&str> = option_env!("APPINFO_GIT_COMMIT_ID_ABBREV");
    pub const GIT_BRANCH: Option<&str> = option_env!("APPINFO_GIT_BRANCH");
    pub const GIT_COMMIT_TIME: Option<&str> = option_env!("APPINFO_GIT_COMMIT_TIME");
    pub const GIT_COMMIT_MESSAGE_SHORT: Option<&str> =
        option_env!("APPINFO_GIT_COMMIT_MESSAGE_SHORT");

    pub const BUILD_NAME: &str = env!("CARGO_PKG_NAME");
    pub const BUILD_VERSION: &str = env!("CARGO_PKG_VERSION");
    pub const BUILD_TIME: Option<&str> = option_env!("APPINFO_BUILD_TIME");
}

/// The two optional records `/info` reports.
#[derive(Debug, Default)]
pub struct ResolvedMetadata {
    pub git: Option<GitInfo>,
    pub build: Option<BuildInfo>,
}

pub fn resolve(cfg: &MetadataSection) -> Result<ResolvedMetadata> {
    let git = match load(&cfg.git, GIT_PREFIX, embedded_git)? {
        Some(props) => GitInfo::from_properties(props)?,
        None => None,
    };
    let build = match load(&cfg.build, BUILD_PREFIX, embedded_build)? {
        Some(props) => BuildInfo::from_properties(props)?,
        None => None,
    };

    let git_id = git.as_ref().map(GitInfo::short_commit_id);
    tracing::info!(
        git_source = ?cfg.git.source,
        git = git_id.as_deref().unwrap_or("absent"),
        build_source = ?cfg.build.source,
        build = build.as_ref().and_then(BuildInfo::version).unwrap_or("absent"),
        "metadata resolved"
    );

    Ok(ResolvedMetadata { git, build })
}

/// Prefix-stripped entries for one record, or `None` when the source yields
/// nothing.
fn load(
    provider: &ProviderConfig,
    prefix: &str,
    embedded: fn() -> Properties,
) -> Result<Option<Properties>> {
    match provider.source {
        MetadataSource::Disabled => Ok(None),
        MetadataSource::Embedded => Ok(Some(embedded())),
        MetadataSource::File => {
            let Some(path) = provider.path.as_deref() else {
                return Ok(None);
            };
            Ok(load_properties_file(Path::new(path))?.map(|props| props.with_prefix(prefix)))
        }
    }
}

fn embedded_git() -> Properties {
    [
        ("commit.id", embedded::GIT_COMMIT_ID),
        ("commit.id.abbrev", embedded::GIT_COMMIT_ID_ABBREV),
        ("branch", embedded::GIT_BRANCH),
        ("commit.time", embedded::GIT_COMMIT_TIME),
        ("commit.message.short", embedded::GIT_COMMIT_MESSAGE_SHORT),
    ]
    .into_iter()
    .filter_map(|(key, value)| value.map(|v| (key, v)))
    .collect()
}

fn embedded_build() -> Properties {
    [
        ("name", Some(embedded::BUILD_NAME)),
        ("version", Some(embedded::BUILD_VERSION)),
        ("time", embedded::BUILD_TIME),
    ]
    .into_iter()
    .filter_map(|(key, value)| value.map(|v| (key, v)))
    .collect()
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn provider(source: MetadataSource, path: Option<&str>) -> ProviderConfig {
        ProviderConfig {
            source,
            path: path.map(str::to_string),
        }
    }

    #[test]
    fn embedded_build_is_always_present() {
        let resolved = resolve(&MetadataSection::default()).unwrap();
        let build = resolved.build.expect("cargo always provides name/version");
        assert_eq!(build.name(), Some("appinfo-server"));
        assert_eq!(build.version(), Some(env!("CARGO_PKG_VERSION")));
    }

    #[test]
    fn embedded_build_time_comes_from_build_script() {
        let resolved = resolve(&MetadataSection::default()).unwrap();
        let recorded = resolved.build.and_then(|b| b.time()).expect("build.rs sets APPINFO_BUILD_TIME");
        assert_eq!(
            Some(recorded.to_rfc3339_opts(chrono::SecondsFormat::Secs, true)).as_deref(),
            embedded::BUILD_TIME
        );
    }

    #[test]
    fn disabled_sources_yield_nothing() {
        let cfg = MetadataSection {
            git: provider(MetadataSource::Disabled, None),
            build: provider(MetadataSource::Disabled, None),
        };
        let resolved = resolve(&cfg).unwrap();
        assert!(resolved.git.is_none());
        assert!(resolved.build.is_none());
    }

    #[test]
    fn file_sources_are_prefix_stripped() {
        let mut git = tempfile::NamedTempFile::new().unwrap();
        writeln!(git, "git.commit.id=abc1234567890\ngit.branch=main").unwrap();

        let cfg = MetadataSection {
            git: provider(MetadataSource::File, git.path().to_str()),
            build: provider(MetadataSource::Disabled, None),
        };
        let resolved = resolve(&cfg).unwrap();
        let git = resolved.git.unwrap();
        assert_eq!(git.short_commit_id(), "abc1234");
        assert_eq!(git.branch(), Some("main"));
    }

    #[test]
    fn missing_file_omits_the_section() {
        let cfg = MetadataSection {
            git: provider(MetadataSource::Disabled, None),
            build: provider(MetadataSource::File, Some("no/such/build-info.properties")),
        };
        assert!(resolve(&cfg).unwrap().build.is_none());
    }

    #[test]
    fn malformed_file_fails_startup() {
        let mut build = tempfile::NamedTempFile::new().unwrap();
        writeln!(build, "build.version=1.0.0\nbuild.time=last tuesday").unwrap();

        let cfg = MetadataSection {
            git: provider(MetadataSource::Disabled, None),
            build: provider(MetadataSource::File, build.path().to_str()),
        };
        let err = resolve(&cfg).unwrap_err();
        assert_eq!(err.client_code().as_str(), "METADATA");
    }
}
