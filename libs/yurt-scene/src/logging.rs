//! Logging initialization.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Filter used when `RUST_LOG` is unset.
const DEFAULT_FILTER: &str = "info,yurt_scene=debug,yurt_csg=info";

/// Installs a `tracing` subscriber filtered by `RUST_LOG`.
///
/// Later calls are ignored once a global subscriber exists.
///
/// # Example
/// ```
/// yurt_scene::logging::init_logging();
/// tracing::info!("Viewer starting");
/// ```
pub fn init_logging() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(true))
        .try_init();
}
