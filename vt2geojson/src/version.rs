//! Build metadata.
//!
//! Release builds inject these values through environment variables at
//! compile time, e.g.:
//!
//! ```text
//! VT2GEOJSON_GIT_COMMIT=$(git rev-parse HEAD) \
//! VT2GEOJSON_GIT_REF=$(git describe --all) \
//! VT2GEOJSON_BUILD_TIME=$(date -u +%FT%TZ) cargo build --release
//! ```

use std::fmt;

/// Placeholder for metadata that was not provided at build time.
pub const NOT_SET: &str = "not set";

/// Version and provenance of the running binary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildInfo {
    pub version: &'static str,
    pub build_time: &'static str,
    pub git_commit: &'static str,
    pub git_ref: &'static str,
}

impl BuildInfo {
    /// Build information captured when this crate was compiled.
    pub const fn current() -> Self {
        Self {
            version: match option_env!("VT2GEOJSON_VERSION") {
                Some(v) => v,
                None => env!("CARGO_PKG_VERSION"),
            },
            build_time: or_not_set(option_env!("VT2GEOJSON_BUILD_TIME")),
            git_commit: or_not_set(option_env!("VT2GEOJSON_GIT_COMMIT")),
            git_ref: or_not_set(option_env!("VT2GEOJSON_GIT_REF")),
        }
    }
}

const fn or_not_set(value: Option<&'static str>) -> &'static str {
    match value {
        Some(v) => v,
        None => NOT_SET,
    }
}

impl fmt::Display for BuildInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Version:    {}", self.version)?;
        writeln!(f, "Build Time: {}", self.build_time)?;
        writeln!(f, "Git Commit: {}", self.git_commit)?;
        write!(f, "Git Ref:    {}", self.git_ref)
    }
}
