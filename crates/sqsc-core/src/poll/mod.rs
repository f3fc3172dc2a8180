//! Wait-for-condition polling.
//!
//! A [`PollSpec`] bundles a state fetcher, a "done" predicate and a fixed
//! interval. [`wait_for`] drives it:
//!
//! ```text
//!            fetch ok, !is_done          sleep(interval)
//!   Polling ─────────────────────────► Polling ──► ...
//!      │  fetch ok, is_done
//!      ├──────────────────────────────► Done(state)
//!      │  fetch err
//!      ├──────────────────────────────► Failed(PollError::Fetch)
//!      │  deadline passed / token cancelled
//!      └──────────────────────────────► Failed(PollError::Timeout | Cancelled)
//! ```
//!
//! Without a deadline or a cancel token the loop is unbounded. Only the
//! fetch is repeated, so it must be read-only.

mod cancel;
mod engine;
mod spec;

pub use cancel::CancelToken;
pub use engine::{PollError, wait_for};
pub use spec::{DEFAULT_INTERVAL, PollSpec};
