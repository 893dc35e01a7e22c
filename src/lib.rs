pub mod api;
pub mod app;
pub mod core;
pub mod render;

include!(concat!(env!("OUT_DIR"), "/version.rs"));

/// Version string shown by `--version`, with build metadata
pub fn long_version() -> String {
    format!(
        "{} (built {}, commit {})",
        env!("CARGO_PKG_VERSION"),
        BUILD_TIME,
        GIT_HASH
    )
}
