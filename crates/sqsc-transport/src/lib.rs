//! HTTP transport layer for the sqsc control-plane client
//!
//! Provides a trait-based transport abstraction so the client can talk to the
//! control plane over reqwest in production and to an in-memory double in
//! tests.
//!
//! # Architecture
//!
//! - **Transport trait**: one request in, one fully buffered response out
//! - **HTTP transport**: reqwest client with the control plane's fixed headers
//! - **Error handling**: network-level failures only; status codes are left
//!   to the caller's classifier

#![deny(unsafe_code)]
#![warn(missing_docs)]

//! # Usage
//!
//! ```no_run
//! use sqsc_transport::{HttpRequest, HttpTransport, Transport};
//!
//! # async fn example() -> sqsc_transport::Result<()> {
//! let transport = HttpTransport::new("https://www.squarescale.io")?;
//! let request = HttpRequest::get("/projects").with_token("secret-token");
//! let response = transport.send(request).await?;
//! println!("status {}", response.status);
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod http;
pub mod traits;

// Re-export commonly used types
pub use error::{Result, TransportError};
pub use http::{HttpTransport, HttpTransportConfig};
pub use traits::{HttpRequest, HttpResponse, Method, Transport};
