//! Development-time tracing for debugging fixpoint rounds and projections.
//!
//! The engine, projector, and session emit `tracing` events. Hosts that want
//! them on stderr call [`init`] once at startup.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Install a compact stderr subscriber filtered by `RUST_LOG`.
///
/// Defaults to `warn` if `RUST_LOG` is unset. Returns `false` if a global
/// subscriber was already installed.
///
/// ```bash
/// RUST_LOG=ql_eval=trace cargo test
/// ```
pub fn init() -> bool {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).compact())
        .try_init()
        .is_ok()
}
