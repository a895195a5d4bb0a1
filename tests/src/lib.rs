//! Cross-crate tests for the OptionsHouse client
//!
//! Live-API programs live under `examples/`, `session/` and `tls/`;
//! everything here runs offline.


#[cfg(test)]
mod client_tests;
#[cfg(test)]
mod codec_tests;
#[cfg(test)]
mod shape_tests;
