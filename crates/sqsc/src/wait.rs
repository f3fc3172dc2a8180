//! Options shared by every `wait_*` operation

use sqsc_core::poll::CancelToken;
use std::time::Duration;

/// How long and how often a wait polls.
///
/// The default waits forever at the client's poll interval, which is what the
/// control plane's own tooling does. Set a deadline to get
/// [`Error::Timeout`](crate::Error::Timeout) instead, or a token to be able to
/// stop the wait from elsewhere with
/// [`Error::Cancelled`](crate::Error::Cancelled).
///
/// ```rust
/// use sqsc::{CancelToken, WaitOptions};
/// use std::time::Duration;
///
/// let token = CancelToken::new();
/// let options = WaitOptions::new()
///     .deadline(Duration::from_secs(600))
///     .cancel_on(token.clone());
/// assert_eq!(options.deadline, Some(Duration::from_secs(600)));
/// ```
#[derive(Debug, Clone, Default)]
pub struct WaitOptions {
    /// Delay between two fetches; the client's interval when unset
    pub interval: Option<Duration>,
    /// Give up after this long
    pub deadline: Option<Duration>,
    /// Stop when this token is cancelled
    pub cancel: Option<CancelToken>,
}

impl WaitOptions {
    /// Unbounded wait at the client's interval.
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the poll interval.
    pub fn interval(mut self, interval: Duration) -> Self {
        self.interval = Some(interval);
        self
    }

    /// Give up after `deadline`.
    pub fn deadline(mut self, deadline: Duration) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Stop when `token` is cancelled.
    pub fn cancel_on(mut self, token: CancelToken) -> Self {
        self.cancel = Some(token);
        self
    }
}
