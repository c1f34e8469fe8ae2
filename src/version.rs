//! Build metadata reported by the `version` command.

/// Crate version from Cargo.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Short commit hash injected by `build.rs` (`unknown` outside a git checkout).
pub const COMMIT: &str = env!("NANOID_GIT_HASH");

/// Text printed by `version`: a `version:` line and a `commit:` line.
pub fn render() -> String {
    format!("version: {}\ncommit: {}", VERSION, COMMIT)
}
