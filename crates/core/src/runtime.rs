//! monoio runtime wrapper
//!
//! For programs that do not use `#[monoio::main]`. Timers are on by
//! default because callers pace their requests with `monoio::time::sleep`.

use monoio::{FusionDriver, RuntimeBuilder};
use tracing::info;

#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// Build the driver with a timer; `monoio::time` panics without one
    pub enable_timer: bool,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self { enable_timer: true }
    }
}

/// Single-threaded client runtime
pub struct ClientRuntime {
    config: RuntimeConfig,
}

impl ClientRuntime {
    pub fn new() -> Self {
        Self::with_config(RuntimeConfig::default())
    }

    pub fn with_config(config: RuntimeConfig) -> Self {
        info!("🚀 Client runtime configured");
        info!("   Timer: {}", config.enable_timer);

        Self { config }
    }

    /// Run a future to completion. Fails only if the driver cannot be built.
    pub fn block_on<F>(&self, future: F) -> std::io::Result<F::Output>
    where
        F: std::future::Future,
    {
        if self.config.enable_timer {
            let mut runtime = RuntimeBuilder::<FusionDriver>::new().enable_timer().build()?;
            Ok(runtime.block_on(future))
        } else {
            let mut runtime = RuntimeBuilder::<FusionDriver>::new().build()?;
            Ok(runtime.block_on(future))
        }
    }

    pub fn start<F, Fut>(self, f: F) -> std::io::Result<Fut::Output>
    where
        F: FnOnce() -> Fut,
        Fut: std::future::Future,
    {
        info!("▶️  Starting client runtime");
        let result = self.block_on(f());
        info!("⏹️  Client runtime stopped");
        result
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }
}

impl Default for ClientRuntime {
    fn default() -> Self {
        Self::new()
    }
}

/// Build a default runtime and run `f` on it
pub fn run<F, Fut>(f: F) -> std::io::Result<Fut::Output>
where
    F: FnOnce() -> Fut,
    Fut: std::future::Future,
{
    ClientRuntime::new().start(f)
}
