//! Embeds the release version shown by `sessionkeep --version`.

use std::path::Path;
use std::process::Command;

/// Tag prefixes stripped from `git describe` output, longest first.
const TAG_PREFIXES: [&str; 2] = ["sessionkeep-v", "v"];

fn main() {
    // The crate sits two levels below the workspace root
    let git_dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../.git");
    for watched in ["HEAD", "refs/tags"] {
        println!("cargo:rerun-if-changed={}", git_dir.join(watched).display());
    }

    let version = describe().unwrap_or_else(|| env!("CARGO_PKG_VERSION").to_string());
    println!("cargo:rustc-env=SESSIONKEEP_VERSION={}", version);
}

fn describe() -> Option<String> {
    let output = Command::new("git")
        .args(["describe", "--tags", "--always", "--dirty"])
        .current_dir(env!("CARGO_MANIFEST_DIR"))
        .output()
        .ok()?;

    if !output.status.success() {
        return None;
    }

    let raw = String::from_utf8(output.stdout).ok()?;
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    let version = TAG_PREFIXES
        .iter()
        .find_map(|prefix| raw.strip_prefix(prefix))
        .unwrap_or(raw);

    Some(version.to_string())
}
