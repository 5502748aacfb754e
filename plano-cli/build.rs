use std::env;
use std::process::Command;

const VAR: &str = "PLANO_BUILD_SHA";

/// `git describe` of the checkout, e.g. `3f9c2a1d` or `3f9c2a1d-dirty`.
fn describe() -> Option<String> {
    let out = Command::new("git")
        .args(["describe", "--always", "--dirty", "--abbrev=8"])
        .output()
        .ok()?;
    if !out.status.success() {
        return None;
    }
    let rev = String::from_utf8(out.stdout).ok()?;
    let rev = rev.trim();
    (!rev.is_empty()).then(|| rev.to_string())
}

fn main() {
    // Source tarballs have no .git; packagers can pass the revision in
    let rev = env::var(VAR)
        .ok()
        .filter(|v| !v.is_empty())
        .or_else(describe)
        .unwrap_or_else(|| "unknown".to_string());

    println!("cargo:rustc-env={}={}", VAR, rev);
    println!("cargo:rerun-if-env-changed={}", VAR);
    println!("cargo:rerun-if-changed=../.git/HEAD");
    println!("cargo:rerun-if-changed=../.git/index");
}
