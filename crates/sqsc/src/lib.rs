//! # sqsc
//!
//! Async Rust client for the SquareScale infrastructure control plane:
//! - Projects, stateful/extra/external nodes, volumes, batches, redis
//!   databases, scheduling groups, services and network rules
//! - One typed [`Error`] for every way the control plane says no
//! - Waits on remote provisioning with optional deadline and cancellation
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use sqsc::{Client, WaitOptions};
//! use sqsc::types::NewNode;
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = Client::from_env()?;
//!     let project = client.projects().by_name("my-project").await?;
//!
//!     let node = client
//!         .stateful_nodes(&project.uuid)
//!         .create_and_wait(
//!             &NewNode::new("node1a", "t2.micro", "eu-west-1a"),
//!             &WaitOptions::new().deadline(Duration::from_secs(900)),
//!         )
//!         .await?;
//!
//!     println!("{} is {}", node.name, node.status);
//!     Ok(())
//! }
//! ```
//!
//! ## Errors
//!
//! ```rust,no_run
//! # use sqsc::{Client, Error};
//! # async fn example(client: Client) {
//! match client.batches("ba90e5fe").delete("nightly").await {
//!     Ok(()) => {}
//!     Err(Error::OperationInProgress) => eprintln!("a deployment is running, retry later"),
//!     Err(Error::NotFound { kind, identifier }) => eprintln!("{kind} {identifier} is gone"),
//!     Err(other) => eprintln!("{other}"),
//! }
//! # }
//! ```

#![warn(missing_docs)]
#![deny(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

// Re-export commonly used types
pub use client::{Client, ClientBuilder};
pub use config::ClientConfig;
pub use error::{Error, ResourceKind, Result};
pub use sqsc_core::poll::CancelToken;
pub use wait::WaitOptions;

// Module declarations
pub mod classify;
pub mod client;
pub mod config;
pub mod error;
pub mod locate;
pub mod observability;
pub mod resources;
pub mod types;
pub mod wait;

#[cfg(feature = "trace")]
#[cfg_attr(docsrs, doc(cfg(feature = "trace")))]
pub use observability::init_tracing;

// Re-export the transport layer for custom transports
pub use sqsc_transport::{HttpRequest, HttpResponse, Method, Transport, TransportError};

/// Prelude module for common imports
///
/// # Examples
///
/// ```rust
/// use sqsc::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        CancelToken, Client, ClientConfig, Error, ResourceKind, Result, WaitOptions,
        resources::Resource,
        types::{NewNode, NewProject, NewVolume, Project, StatefulNode, Task, Volume},
    };
}

/// Client version, from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use config::DEFAULT_ENDPOINT;
