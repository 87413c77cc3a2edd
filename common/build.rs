// Resolve the commit hash at build time and expose `BUILD_VERSION` to the crate.

use std::process::Command;

fn main() {
    let commit_hash = if let Some(hash) = option_env!("REJECT_TOKEN_COMMIT_HASH") {
        hash.chars().take(7).collect::<String>()
    } else {
        // Outside a git checkout this falls back to "unknown"
        match Command::new("git").args(["rev-parse", "--short", "HEAD"]).output() {
            Ok(output) if output.status.success() => {
                String::from_utf8_lossy(&output.stdout).trim().to_string()
            }
            _ => "unknown".to_string(),
        }
    };

    let build_version = format!("{}-{}", env!("CARGO_PKG_VERSION"), commit_hash);
    println!("cargo:rerun-if-env-changed=REJECT_TOKEN_COMMIT_HASH");
    println!("cargo:rustc-env=BUILD_VERSION={build_version}");
}
