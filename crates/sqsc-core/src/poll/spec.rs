//! Poll configuration.

use super::cancel::CancelToken;
use std::time::Duration;

/// Interval used when the caller does not pick one.
pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(5);

/// Everything [`wait_for`](super::wait_for) needs for one wait.
///
/// A spec is built per wait call and consumed by it. It owns nothing beyond
/// what the `fetch` closure captures.
///
/// # Examples
///
/// ```rust
/// use sqsc_core::poll::{CancelToken, PollSpec};
/// use std::time::Duration;
///
/// let token = CancelToken::new();
/// let spec = PollSpec::new(
///     || async { Ok::<_, std::io::Error>(42) },
///     |v: &i32| *v == 42,
/// )
/// .interval(Duration::from_secs(1))
/// .deadline(Duration::from_secs(600))
/// .cancel_on(token);
///
/// assert_eq!(spec.interval_duration(), Duration::from_secs(1));
/// ```
pub struct PollSpec<F, P> {
    pub(crate) fetch: F,
    pub(crate) is_done: P,
    pub(crate) interval: Duration,
    pub(crate) deadline: Option<Duration>,
    pub(crate) cancel: Option<CancelToken>,
}

impl<F, P> PollSpec<F, P> {
    /// Create a spec from a fetcher and a completion predicate.
    ///
    /// Defaults: [`DEFAULT_INTERVAL`], no deadline, no cancel token.
    pub fn new(fetch: F, is_done: P) -> Self {
        Self {
            fetch,
            is_done,
            interval: DEFAULT_INTERVAL,
            deadline: None,
            cancel: None,
        }
    }

    /// Time slept between two fetches. Zero is allowed.
    pub fn interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Give up with [`PollError::Timeout`](super::PollError::Timeout) once
    /// this much time has elapsed since the wait started.
    pub fn deadline(mut self, deadline: Duration) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Like [`deadline`](Self::deadline), but accepts an optional value.
    pub fn maybe_deadline(mut self, deadline: Option<Duration>) -> Self {
        self.deadline = deadline;
        self
    }

    /// Stop with [`PollError::Cancelled`](super::PollError::Cancelled) when
    /// `token` is cancelled.
    pub fn cancel_on(mut self, token: CancelToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// Like [`cancel_on`](Self::cancel_on), but accepts an optional token.
    pub fn maybe_cancel_on(mut self, token: Option<CancelToken>) -> Self {
        self.cancel = token;
        self
    }

    /// Configured interval.
    pub fn interval_duration(&self) -> Duration {
        self.interval
    }

    /// Configured deadline, if any.
    pub fn deadline_duration(&self) -> Option<Duration> {
        self.deadline
    }
}

impl<F, P> std::fmt::Debug for PollSpec<F, P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PollSpec")
            .field("interval", &self.interval)
            .field("deadline", &self.deadline)
            .field("cancellable", &self.cancel.is_some())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec() -> PollSpec<impl FnMut() -> std::future::Ready<Result<u8, std::io::Error>>, fn(&u8) -> bool>
    {
        fn done(v: &u8) -> bool {
            *v > 0
        }
        PollSpec::new(|| std::future::ready(Ok(1)), done as fn(&u8) -> bool)
    }

    #[test]
    fn test_defaults() {
        let spec = spec();
        assert_eq!(spec.interval_duration(), DEFAULT_INTERVAL);
        assert_eq!(spec.deadline_duration(), None);
        assert!(spec.cancel.is_none());
    }

    #[test]
    fn test_builder_setters() {
        let spec = spec()
            .interval(Duration::ZERO)
            .maybe_deadline(Some(Duration::from_secs(3)))
            .maybe_cancel_on(Some(CancelToken::new()));

        assert_eq!(spec.interval_duration(), Duration::ZERO);
        assert_eq!(spec.deadline_duration(), Some(Duration::from_secs(3)));
        assert!(spec.cancel.is_some());
    }

    #[test]
    fn test_debug_hides_closures() {
        let rendered = format!("{:?}", spec());
        assert!(rendered.contains("interval"));
        assert!(rendered.contains("cancellable: false"));
    }
}
