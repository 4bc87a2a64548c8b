//! Tracing subscriber setup.

use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Filter used by the HTTP service when `RUST_LOG` is unset.
pub const SERVER_FILTER: &str = "auditor_core=info,auditor_server=info,tower_http=info";

/// Filter used by one-shot commands when `RUST_LOG` is unset.
pub const QUIET_FILTER: &str = "warn";

/// Filter used by one-shot commands with `--verbose`.
pub const VERBOSE_FILTER: &str = "auditor_core=debug,auditor_server=debug";

/// Installs a compact stderr subscriber. `RUST_LOG` overrides `default_filter`.
///
/// Calling this more than once is harmless; later calls are ignored.
pub fn init(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let installed = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .compact()
                .with_writer(std::io::stderr),
        )
        .try_init();

    if installed.is_ok() {
        tracing::debug!(filter = default_filter, "tracing initialized");
    }
}
