//! Shared error type across appinfo crates.

use thiserror::Error;

/// Client-facing error codes (stable API).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientCode {
    /// Config failed to parse or validate.
    InvalidConfig,
    /// Unsupported config schema version.
    UnsupportedVersion,
    /// Metadata artifact is malformed.
    Metadata,
    /// Filesystem or socket failure.
    Io,
    /// No route for the request.
    NotFound,
}

impl ClientCode {
    /// String representation used in JSON responses and logs.
    pub fn as_str(self) -> &'static str {
        match self {
            ClientCode::InvalidConfig => "INVALID_CONFIG",
            ClientCode::UnsupportedVersion => "UNSUPPORTED_VERSION",
            ClientCode::Metadata => "METADATA",
            ClientCode::Io => "IO",
            ClientCode::NotFound => "NOT_FOUND",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, AppInfoError>;

/// Unified error type used by core and gateway.
#[derive(Debug, Error)]
pub enum AppInfoError {
    #[error("invalid config: {0}")]
    InvalidConfig(String),
    #[error("unsupported config version: {0}")]
    UnsupportedVersion(u32),
    #[error("malformed metadata: {0}")]
    Metadata(String),
    #[error("{context}: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },
    #[error("no route for {0}")]
    NotFound(String),
}

impl AppInfoError {
    /// Wrap an I/O failure with what was being attempted.
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        AppInfoError::Io {
            context: context.into(),
            source,
        }
    }

    /// Map internal error to a stable client-facing code.
    pub fn client_code(&self) -> ClientCode {
        match self {
            AppInfoError::InvalidConfig(_) => ClientCode::InvalidConfig,
            AppInfoError::UnsupportedVersion(_) => ClientCode::UnsupportedVersion,
            AppInfoError::Metadata(_) => ClientCode::Metadata,
            AppInfoError::Io { .. } => ClientCode::Io,
            AppInfoError::NotFound(_) => ClientCode::NotFound,
        }
    }
}
