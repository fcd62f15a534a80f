//! HTTP client for the barcode/print backend
//!
//! Thin typed wrapper over the backend REST API: record lookup, printer
//! directory, batch print submission and print-status updates. Every
//! request carries the bearer token from the client configuration; the
//! backend's `{code, msg, errorMsg, success, data}` envelope is decoded
//! and normalized into [`ClientError`] values here, so callers never see
//! raw wire errors.

mod api;
mod config;
mod error;
mod http;

// Re-exports
pub use api::PrintApi;
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use http::HttpClient;
