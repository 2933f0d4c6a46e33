//! Embeds the commit hash and build date for `flappy --version`.

use std::env;
use std::fs;
use std::path::PathBuf;
use std::process::Command;

/// Short hash of HEAD, or None outside a git checkout.
fn git_short_hash() -> Option<String> {
    let output = Command::new("git")
        .args(["rev-parse", "--short=7", "HEAD"])
        .output()
        .ok()?;
    if !output.status.success() {
        return None;
    }
    let hash = String::from_utf8(output.stdout).ok()?;
    let hash = hash.trim();
    (!hash.is_empty()).then(|| hash.to_string())
}

fn main() {
    let commit = env::var("BUILD_COMMIT")
        .ok()
        .or_else(git_short_hash)
        .unwrap_or_else(|| "unknown".to_string());
    let date = env::var("BUILD_DATE")
        .unwrap_or_else(|_| chrono::Utc::now().format("%Y-%m-%d").to_string());

    let generated = format!(
        "pub const BUILD_COMMIT: &str = {:?};\npub const BUILD_DATE: &str = {:?};\n",
        commit, date
    );
    let dest = PathBuf::from(env::var("OUT_DIR").expect("cargo sets OUT_DIR")).join("build_info.rs");
    fs::write(dest, generated).expect("write build_info.rs");

    for trigger in [
        "cargo:rerun-if-changed=.git/HEAD",
        "cargo:rerun-if-env-changed=BUILD_COMMIT",
        "cargo:rerun-if-env-changed=BUILD_DATE",
    ] {
        println!("{}", trigger);
    }
}
