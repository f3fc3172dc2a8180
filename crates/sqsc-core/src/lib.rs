#![deny(unsafe_code)]
#![warn(missing_docs)]

//! Core primitives for the sqsc control-plane client.
//!
//! The control plane offers no server-side "wait" primitive and, for most
//! resource kinds, no per-item GET route. This crate holds the two generic
//! pieces every resource wrapper leans on:
//!
//! - **Polling** via [`poll::wait_for`]: re-fetch a state until a predicate
//!   holds, the fetch fails, a deadline passes or the wait is cancelled
//! - **Lookup by name** via [`locate::find_named`]: linear scan of a freshly
//!   listed collection
//!
//! Neither piece knows anything about HTTP; the `sqsc` crate plugs its
//! transport and error classifier into them.
//!
//! # Examples
//!
//! ```rust
//! use sqsc_core::prelude::*;
//! use std::time::Duration;
//!
//! # async fn example() -> Result<(), PollError<std::io::Error>> {
//! let mut calls = 0;
//! let status = wait_for(
//!     PollSpec::new(
//!         || {
//!             calls += 1;
//!             let status = if calls < 2 { "not_provisionned" } else { "provisionned" };
//!             async move { Ok::<_, std::io::Error>(status) }
//!         },
//!         |status: &&str| *status == "provisionned",
//!     )
//!     .interval(Duration::ZERO),
//! )
//! .await?;
//! assert_eq!(status, "provisionned");
//! # Ok(())
//! # }
//! ```

pub mod locate;
pub mod poll;

/// Convenient re-exports of commonly used items.
///
/// ```rust
/// use sqsc_core::prelude::*;
/// ```
pub mod prelude {
    pub use crate::locate::{Named, find_named, find_named_ref};
    pub use crate::poll::{CancelToken, PollError, PollSpec, wait_for};
}
