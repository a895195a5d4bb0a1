//! # OptionsHouse client
//!
//! Typed binding for the OptionsHouse JSON-over-HTTPS trading API.
//!
//! ## Architecture
//!
//! - **monoio-based HTTPS client** - single-threaded async, rustls TLS
//! - **Typed messages** - one request/response pair per vendor action
//! - **Shape normalization** - list-or-object payloads always come back as lists
//! - **Fixed-point arithmetic** - exact decimals for prices and cash figures

pub mod errors;
pub mod http;
pub mod optionshouse;
pub mod trace;
pub mod traits;
pub mod types;

// Re-export main types
pub use errors::{ClientError, Result};
pub use http::MonoioHttpsClient;
pub use optionshouse::{HttpsTransport, OptionsHouseClient, OptionsHouseConfig};
pub use traits::{ApiRequest, ApiResponse, Transport};
pub use types::*;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::errors::{ClientError, Result};
    pub use crate::optionshouse::{HttpsTransport, OptionsHouseClient, OptionsHouseConfig, Reply, ResponseStatus};
    pub use crate::traits::{ApiRequest, ApiResponse, Transport};
    pub use crate::types::*;
    pub use opthouse_core::prelude::*;
}
