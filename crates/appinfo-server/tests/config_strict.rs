#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::fs;
use std::path::PathBuf;

use appinfo_server::config::{self, MetadataSource};

#[test]
fn deny_unknown_fields_nested() {
    let bad = r#"
version: 1
server:
  listen: "0.0.0.0:8080"
metadata:
  git:
    sourse: file   # typo should fail
"#;

    let err = config::load_from_str(bad).expect_err("must fail");
    assert_eq!(err.client_code().as_str(), "INVALID_CONFIG");
}

#[test]
fn ok_minimal_config() {
    let cfg = config::load_from_str("version: 1\n").expect("must parse");
    assert_eq!(cfg.version, 1);
    assert_eq!(cfg.server.listen, "0.0.0.0:8080");
    assert_eq!(cfg.metadata.git.source, MetadataSource::Embedded);
    assert_eq!(cfg.metadata.build.source, MetadataSource::Embedded);
}

#[test]
fn ok_full_config() {
    let ok = r#"
version: 1
server:
  listen: "127.0.0.1:9000"
metadata:
  git:
    source: file
    path: "git.properties"
  build:
    source: disabled
"#;
    let cfg = config::load_from_str(ok).expect("must parse");
    assert_eq!(cfg.server.listen_addr().unwrap().port(), 9000);
    assert_eq!(cfg.metadata.git.source, MetadataSource::File);
    assert_eq!(cfg.metadata.git.path.as_deref(), Some("git.properties"));
    assert_eq!(cfg.metadata.build.source, MetadataSource::Disabled);
}

#[test]
fn unsupported_version() {
    let err = config::load_from_str("version: 2\n").expect_err("must fail");
    assert_eq!(err.client_code().as_str(), "UNSUPPORTED_VERSION");
}

#[test]
fn listen_must_be_socket_addr() {
    let bad = r#"
version: 1
server:
  listen: "localhost"
"#;
    let err = config::load_from_str(bad).expect_err("must fail");
    assert_eq!(err.client_code().as_str(), "INVALID_CONFIG");
}

#[test]
fn file_source_requires_path() {
    let bad = r#"
version: 1
metadata:
  build:
    source: file
"#;
    let err = config::load_from_str(bad).expect_err("must fail");
    assert!(err.to_string().contains("metadata.build.path"));
}

#[test]
fn path_rejected_without_file_source() {
    let bad = r#"
version: 1
metadata:
  git:
    source: embedded
    path: "git.properties"
"#;
    let err = config::load_from_str(bad).expect_err("must fail");
    assert_eq!(err.client_code().as_str(), "INVALID_CONFIG");
}

#[test]
fn unknown_source_is_rejected() {
    let bad = r#"
version: 1
metadata:
  git:
    source: environment
"#;
    assert!(config::load_from_str(bad).is_err());
}

#[test]
fn missing_explicit_file_is_io_error() {
    let err = config::load_from_file("does/not/exist.yaml").expect_err("must fail");
    assert_eq!(err.client_code().as_str(), "IO");
}

fn listen_on(port: u16) -> String {
    format!("version: 1\nserver:\n  listen: \"127.0.0.1:{port}\"\n")
}

fn write_config(dir: &tempfile::TempDir, name: &str, body: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, body).unwrap();
    path
}

#[test]
fn explicit_path_wins_over_default() {
    let dir = tempfile::tempdir().unwrap();
    let default = write_config(&dir, "appinfo.yaml", &listen_on(1111));
    let explicit = write_config(&dir, "custom.yaml", &listen_on(2222));

    let cfg = config::load_with(Some(explicit.display().to_string()), &default).expect("must load");
    assert_eq!(cfg.server.listen, "127.0.0.1:2222");
}

#[test]
fn default_path_used_when_nothing_explicit() {
    let dir = tempfile::tempdir().unwrap();
    let default = write_config(&dir, "appinfo.yaml", &listen_on(1111));

    let cfg = config::load_with(None, &default).expect("must load");
    assert_eq!(cfg.server.listen, "127.0.0.1:1111");
}

#[test]
fn missing_default_falls_back_to_builtin() {
    let dir = tempfile::tempdir().unwrap();
    let default = dir.path().join("appinfo.yaml");

    let cfg = config::load_with(None, &default).expect("defaults apply");
    assert_eq!(cfg.version, 1);
    assert_eq!(cfg.server.listen, "0.0.0.0:8080");
    assert_eq!(cfg.metadata.git.source, MetadataSource::Embedded);
}

#[test]
fn missing_explicit_path_is_io_error_even_with_default_present() {
    let dir = tempfile::tempdir().unwrap();
    let default = write_config(&dir, "appinfo.yaml", "version: 1\n");
    let missing = dir.path().join("gone.yaml").display().to_string();

    let err = config::load_with(Some(missing), &default).expect_err("must fail");
    assert_eq!(err.client_code().as_str(), "IO");
}

#[test]
fn load_reads_path_named_by_env() {
    let dir = tempfile::tempdir().unwrap();
    let explicit = write_config(&dir, "env.yaml", &listen_on(3333));

    // The only test in this binary that touches APPINFO_CONFIG.
    std::env::set_var(config::CONFIG_ENV, &explicit);
    let loaded = config::load();
    std::env::remove_var(config::CONFIG_ENV);

    assert_eq!(loaded.expect("must load").server.listen, "127.0.0.1:3333");
}
