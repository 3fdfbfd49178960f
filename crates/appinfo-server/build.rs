use std::path::Path;
use std::process::Command;

fn git(args: &[&str]) -> Option<String> {
    let output = Command::new("git").args(args).output().ok()?;
    if !output.status.success() {
        return None;
    }
    let value = String::from_utf8(output.stdout).ok()?.trim().to_string();
    (!value.is_empty()).then_some(value)
}

fn report_git_state() {
    // Outside a checkout nothing is emitted and the git section stays absent.
    let Some(commit_id) = git(&["rev-parse", "HEAD"]) else {
        println!("cargo:warning=git metadata unavailable, /info will omit the git section");
        return;
    };
    println!("cargo:rustc-env=APPINFO_GIT_COMMIT_ID={commit_id}");

    let optional = [
        ("APPINFO_GIT_COMMIT_ID_ABBREV", git(&["rev-parse", "--short", "HEAD"])),
        ("APPINFO_GIT_BRANCH", git(&["rev-parse", "--abbrev-ref", "HEAD"])),
        ("APPINFO_GIT_COMMIT_TIME", git(&["log", "-1", "--format=%cI"])),
        ("APPINFO_GIT_COMMIT_MESSAGE_SHORT", git(&["log", "-1", "--format=%s"])),
    ];
    for (key, value) in optional {
        if let Some(value) = value {
            println!("cargo:rustc-env={key}={value}");
        }
    }
}

fn report_build_timestamp() {
    let timestamp = chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Secs, true);
    println!("cargo:rustc-env=APPINFO_BUILD_TIME={timestamp}");
}

/// Re-run on source edits so the build timestamp tracks the binary, and on
/// ref moves so the git facts do.
fn report_rerun_paths() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-changed=src");
    println!("cargo:rerun-if-changed=Cargo.toml");

    // Missing paths count as always-changed, so only watch a real checkout.
    let Some(git_dir) = git(&["rev-parse", "--absolute-git-dir"]) else {
        return;
    };
    let git_dir = Path::new(&git_dir);
    for watched in ["HEAD", "refs/heads", "packed-refs"] {
        let path = git_dir.join(watched);
        if path.exists() {
            println!("cargo:rerun-if-changed={}", path.display());
        }
    }
}

fn main() {
    report_rerun_paths();
    report_git_state();
    report_build_timestamp();
}
