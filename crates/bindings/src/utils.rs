//! Process-wide helpers: logging setup and the library version.

use std::sync::Once;

use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter, in `env-filter` syntax.
pub const LOG_ENV: &str = "SPIKELIB_LOG";

/// Filter used when `SPIKELIB_LOG` is unset or unparsable.
const DEFAULT_FILTER: &str = "warn";

static LOGGING: Once = Once::new();

/// Installs a stderr `fmt` subscriber the first time it is called.
///
/// A host that already installed its own global subscriber keeps it.
pub fn init_logging() {
    LOGGING.call_once(|| {
        let filter =
            EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
        let installed = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init()
            .is_ok();
        debug!(version = version(), installed, "spikelib logging ready");
    });
}

/// Crate version string, e.g. `"0.1.0"`.
pub const fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
