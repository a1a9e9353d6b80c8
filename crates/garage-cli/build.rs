use std::process::Command;

/// Short commit id shown by `garage --version`.
///
/// Packagers building from a tarball set `GARAGE_BUILD_COMMIT`; otherwise
/// the workspace checkout is asked, and `unknown` is used outside git.
fn main() {
    println!("cargo::rerun-if-env-changed=GARAGE_BUILD_COMMIT");
    println!("cargo::rerun-if-changed=../../.git/HEAD");
    println!("cargo::rerun-if-changed=../../.git/refs/heads/");

    let commit = std::env::var("GARAGE_BUILD_COMMIT")
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .or_else(git_short_head)
        .unwrap_or_else(|| "unknown".to_string());

    println!("cargo::rustc-env=GARAGE_BUILD_COMMIT={}", commit);
}

fn git_short_head() -> Option<String> {
    let output = Command::new("git")
        .args(["rev-parse", "--short=10", "HEAD"])
        .output()
        .ok()?;
    if !output.status.success() {
        return None;
    }
    let hash = String::from_utf8(output.stdout).ok()?;
    let hash = hash.trim();
    (!hash.is_empty()).then(|| hash.to_string())
}
