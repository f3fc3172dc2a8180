//! HTTP transport implementation
//!
//! Provides the reqwest client that implements the Transport trait.
//! Adds the control plane's fixed headers and maps network failures; it
//! never retries and never looks at status codes.

pub mod client;

pub use client::{API_VERSION, HttpTransport, HttpTransportConfig};
