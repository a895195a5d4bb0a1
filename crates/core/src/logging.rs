//! Logging setup
//!
//! Installs a `tracing-subscriber` fmt subscriber driven by `RUST_LOG`
//! (default `info`). Safe to call more than once, and a no-op when the
//! host application already installed its own subscriber.

use tracing::Level;
use tracing_subscriber::{EnvFilter, FmtSubscriber};
use std::sync::Once;

static INIT: Once = Once::new();

pub fn init_logging() {
    INIT.call_once(|| {
        init_with_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        );
    });
}

/// Install a subscriber with an explicit directive string, e.g. `"opthouse_client=debug"`.
pub fn init_logging_with(directives: &str) {
    INIT.call_once(|| {
        init_with_filter(EnvFilter::new(directives));
    });
}

fn init_with_filter(filter: EnvFilter) {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::TRACE)
        .with_env_filter(filter)
        .with_target(false)
        .with_file(true)
        .with_line_number(true)
        .finish();

    if tracing::subscriber::set_global_default(subscriber).is_ok() {
        tracing::info!("📝 Initialized tracing logging");
    }
}

/// Log an order lifecycle event
#[macro_export]
macro_rules! log_order {
    ($action:expr, $order_id:expr, $key:expr) => {
        tracing::info!("📋 ORDER {}: {} ({})", $action, $order_id, $key);
    };
}

#[macro_export]
macro_rules! log_error {
    ($operation:expr, $error:expr) => {
        tracing::error!("❌ {} failed: {}", $operation, $error);
    };
}
