//! # OptionsHouse Core
//!
//! Domain primitives shared by the OptionsHouse client.
//!
//! - **Security key codec** - canonical `SYMBOL:EXPIRATION:STRIKE:FLAG` keys
//! - **Response shape normalizer** - list-or-single-object fields
//! - **Fixed-point arithmetic** - exact decimal prices
//! - **Timing and logging** - `PerfTimer`, tracing setup
//! - **monoio runtime** - single-threaded async

pub mod runtime;
pub mod timing;
pub mod fixed;
pub mod logging;
pub mod security_key;
pub mod shape;

// Re-export commonly used items
pub use runtime::ClientRuntime;
pub use timing::{millis, nanos, PerfTimer, Timestamp};
pub use fixed::{Fixed, FixedError};
pub use logging::init_logging;
pub use security_key::{InstrumentKind, SecurityKey};
pub use shape::{NormalizedCollection, ParsePath, ShapeError};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::runtime::{ClientRuntime, RuntimeConfig};
    pub use crate::timing::{millis, nanos, PerfTimer, Timestamp};
    pub use crate::fixed::Fixed;
    pub use crate::logging::init_logging;
    pub use crate::security_key::{
        is_key, is_option, is_stock, keys_equal, normalize_key, normalize_symbol, to_key,
        underlying_of, InstrumentKind, SecurityKey,
    };
    pub use crate::shape::{normalize, NormalizedCollection, ParsePath, ShapeError};

    // Common external types
    pub use monoio;
    pub use serde::{Deserialize, Serialize};
    pub use chrono::{DateTime, Utc};
}
