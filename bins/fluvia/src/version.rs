//! The daemon's semver string, tracked independently of `CARGO_PKG_VERSION`
//! so a packaging mismatch between `Cargo.toml` and the published release
//! notes shows up as a failing test rather than a silent drift.

pub const VERSION: &str = "0.15.1";

pub fn version_string() -> String {
    format!("fluvia {VERSION}")
}
