//! Build-time metadata records.
//!
//! Both records are produced once at startup, either from properties
//! artifacts written by the packaging step or from values the build script
//! embedded into the binary, and are read-only afterwards.

mod build_info;
mod git;
pub mod properties;

use std::io::ErrorKind;
use std::path::Path;

use chrono::{DateTime, SecondsFormat, TimeZone, Utc};

use crate::error::{AppInfoError, Result};

pub use build_info::BuildInfo;
pub use git::GitInfo;
pub use properties::Properties;

/// Key prefix used by `git.properties`.
pub const GIT_PREFIX: &str = "git.";
/// Key prefix used by `build-info.properties`.
pub const BUILD_PREFIX: &str = "build.";

/// Read a properties artifact. A missing file is not an error: the record it
/// would have produced is simply absent.
pub fn load_properties_file(path: &Path) -> Result<Option<Properties>> {
    let text = match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::warn!(path = %path.display(), "metadata file not found, section will be omitted");
            return Ok(None);
        }
        Err(e) => {
            return Err(AppInfoError::io(
                format!("read metadata file {}", path.display()),
                e,
            ))
        }
    };
    Properties::parse(&text).map(Some).map_err(|e| match e {
        AppInfoError::Metadata(msg) => AppInfoError::Metadata(format!("{}: {msg}", path.display())),
        other => other,
    })
}

/// Parse a metadata timestamp: epoch milliseconds, RFC 3339, or the
/// `yyyy-MM-dd'T'HH:mm:ssZ` form (`+0000` offset) git tooling writes.
pub fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>> {
    let raw = raw.trim();
    if !raw.is_empty() && raw.bytes().all(|b| b.is_ascii_digit()) {
        return raw
            .parse::<i64>()
            .ok()
            .and_then(|ms| Utc.timestamp_millis_opt(ms).single())
            .ok_or_else(|| AppInfoError::Metadata(format!("epoch millis out of range: {raw}")));
    }
    DateTime::parse_from_rfc3339(raw)
        .or_else(|_| DateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%z"))
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| AppInfoError::Metadata(format!("unparseable timestamp {raw:?}: {e}")))
}

/// ISO-8601 instant in UTC, fractional seconds only when non-zero.
pub fn iso8601(t: DateTime<Utc>) -> String {
    t.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn utc(s: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(s).unwrap().with_timezone(&Utc)
    }

    #[test]
    fn timestamp_forms() {
        let expected = utc("2024-01-01T00:00:00Z");
        assert_eq!(parse_timestamp("2024-01-01T00:00:00Z").unwrap(), expected);
        assert_eq!(parse_timestamp("2024-01-01T01:00:00+01:00").unwrap(), expected);
        assert_eq!(parse_timestamp("2024-01-01T00:00:00+0000").unwrap(), expected);
        assert_eq!(parse_timestamp("1704067200000").unwrap(), expected);
    }

    #[test]
    fn garbage_timestamp_is_metadata_error() {
        let err = parse_timestamp("yesterday").unwrap_err();
        assert_eq!(err.client_code().as_str(), "METADATA");
    }

    #[test]
    fn iso8601_drops_zero_fraction() {
        assert_eq!(iso8601(utc("2024-01-02T00:00:00Z")), "2024-01-02T00:00:00Z");
        assert_eq!(iso8601(utc("2024-01-02T00:00:00.250Z")), "2024-01-02T00:00:00.250Z");
    }

    #[test]
    fn missing_file_yields_none() {
        let loaded = load_properties_file(Path::new("definitely/not/here.properties")).unwrap();
        assert!(loaded.is_none());
    }
}
