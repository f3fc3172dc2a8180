//! The polling loop.

use super::spec::PollSpec;
use std::future::Future;
use std::time::Duration;
use thiserror::Error;
use tokio::time::Instant;

/// Why a wait ended without reaching the wanted state.
#[derive(Debug, Error)]
pub enum PollError<E> {
    /// The fetch itself failed. The error is passed through untouched.
    #[error("{0}")]
    Fetch(E),

    /// The deadline elapsed before the predicate held.
    #[error("gave up waiting after {0:?}")]
    Timeout(Duration),

    /// The wait's cancel token fired.
    #[error("wait cancelled")]
    Cancelled,
}

impl<E> PollError<E> {
    /// Map the fetch error type, keeping timeout and cancel as-is.
    pub fn map_fetch<T>(self, f: impl FnOnce(E) -> T) -> PollError<T> {
        match self {
            PollError::Fetch(e) => PollError::Fetch(f(e)),
            PollError::Timeout(d) => PollError::Timeout(d),
            PollError::Cancelled => PollError::Cancelled,
        }
    }
}

/// Repeatedly fetch a state until `is_done` holds.
///
/// Each iteration fetches once, returns the state if it is done, and
/// otherwise sleeps for the configured interval. The first fetch error ends the
/// wait immediately; there are no retries. A deadline or a cancel token, when
/// present, interrupt the sleep as soon as they fire, and are also checked
/// before every fetch.
///
/// # Examples
///
/// ```rust
/// use sqsc_core::poll::{PollError, PollSpec, wait_for};
/// use std::time::Duration;
///
/// # async fn example() {
/// let result: Result<u32, PollError<std::io::Error>> = wait_for(
///     PollSpec::new(|| async { Ok(0) }, |n: &u32| *n > 0)
///         .interval(Duration::from_millis(10))
///         .deadline(Duration::from_millis(50)),
/// )
/// .await;
/// assert!(matches!(result, Err(PollError::Timeout(_))));
/// # }
/// ```
pub async fn wait_for<S, E, F, Fut, P>(spec: PollSpec<F, P>) -> Result<S, PollError<E>>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<S, E>>,
    P: Fn(&S) -> bool,
{
    let PollSpec {
        mut fetch,
        is_done,
        interval,
        deadline,
        cancel,
    } = spec;

    let expires_at = deadline.map(|d| Instant::now() + d);
    let mut attempt: u32 = 0;

    loop {
        if cancel.as_ref().is_some_and(|token| token.is_cancelled()) {
            return Err(PollError::Cancelled);
        }
        if let (Some(at), Some(d)) = (expires_at, deadline)
            && Instant::now() >= at
        {
            return Err(PollError::Timeout(d));
        }

        attempt += 1;
        let state = fetch().await.map_err(PollError::Fetch)?;

        if is_done(&state) {
            #[cfg(feature = "tracing")]
            tracing::debug!(attempt, "poll condition reached");
            return Ok(state);
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(attempt, interval_ms = interval.as_millis() as u64, "poll condition not reached yet");

        let cancelled = async {
            match &cancel {
                Some(token) => token.cancelled().await,
                None => std::future::pending().await,
            }
        };
        let expired = async {
            match expires_at {
                Some(at) => tokio::time::sleep_until(at).await,
                None => std::future::pending().await,
            }
        };

        tokio::select! {
            biased;
            () = cancelled => return Err(PollError::Cancelled),
            () = expired => {
                return Err(PollError::Timeout(deadline.unwrap_or_default()));
            }
            () = tokio::time::sleep(interval) => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::poll::CancelToken;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[derive(Debug, PartialEq)]
    struct FetchFailed(&'static str);

    impl std::fmt::Display for FetchFailed {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.write_str(self.0)
        }
    }

    fn counting_fetch(
        calls: Arc<AtomicU32>,
        done_at: u32,
    ) -> impl FnMut() -> std::future::Ready<Result<u32, FetchFailed>> {
        move || {
            let n = calls.fetch_add(1, Ordering::SeqCst) + 1;
            std::future::ready(Ok(if n >= done_at { 1 } else { 0 }))
        }
    }

    fn is_one(v: &u32) -> bool {
        *v == 1
    }

    #[tokio::test]
    async fn test_returns_first_state_that_is_done() {
        let calls = Arc::new(AtomicU32::new(0));

        let state = wait_for(PollSpec::new(counting_fetch(calls.clone(), 1), is_one))
            .await
            .unwrap();

        assert_eq!(state, 1);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_sleeps_interval_between_fetches() {
        let calls = Arc::new(AtomicU32::new(0));
        let started = Instant::now();

        let state = wait_for(
            PollSpec::new(counting_fetch(calls.clone(), 3), is_one)
                .interval(Duration::from_secs(5)),
        )
        .await
        .unwrap();

        assert_eq!(state, 1);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
        assert_eq!(started.elapsed(), Duration::from_secs(10));
    }

    #[tokio::test]
    async fn test_zero_interval_polls_back_to_back() {
        let calls = Arc::new(AtomicU32::new(0));

        wait_for(PollSpec::new(counting_fetch(calls.clone(), 50), is_one).interval(Duration::ZERO))
            .await
            .unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 50);
    }

    #[tokio::test]
    async fn test_fetch_error_stops_immediately() {
        let calls = Arc::new(AtomicU32::new(0));
        let counter = calls.clone();

        let result: Result<u32, _> = wait_for(
            PollSpec::new(
                move || {
                    counter.fetch_add(1, Ordering::SeqCst);
                    std::future::ready(Err(FetchFailed("boom")))
                },
                is_one,
            )
            .interval(Duration::ZERO),
        )
        .await;

        assert!(matches!(result, Err(PollError::Fetch(FetchFailed("boom")))));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_error_after_pending_states_is_reported() {
        let mut states = vec![Ok(0), Ok(0), Err(FetchFailed("gone"))].into_iter();

        let result = wait_for(
            PollSpec::new(
                move || std::future::ready(states.next().unwrap_or(Ok(1))),
                is_one,
            )
            .interval(Duration::ZERO),
        )
        .await;

        assert_eq!(result.unwrap_err().to_string(), "gone");
    }

    #[tokio::test(start_paused = true)]
    async fn test_deadline_returns_timeout() {
        let calls = Arc::new(AtomicU32::new(0));
        let started = Instant::now();

        let result = wait_for(
            PollSpec::new(counting_fetch(calls.clone(), u32::MAX), is_one)
                .interval(Duration::from_secs(5))
                .deadline(Duration::from_secs(12)),
        )
        .await;

        assert!(matches!(result, Err(PollError::Timeout(d)) if d == Duration::from_secs(12)));
        // Fetches at t=0, 5 and 10; the deadline cuts the third sleep short.
        assert_eq!(calls.load(Ordering::SeqCst), 3);
        assert_eq!(started.elapsed(), Duration::from_secs(12));
    }

    #[tokio::test]
    async fn test_zero_deadline_never_fetches() {
        let calls = Arc::new(AtomicU32::new(0));

        let result = wait_for(
            PollSpec::new(counting_fetch(calls.clone(), 1), is_one).deadline(Duration::ZERO),
        )
        .await;

        assert!(matches!(result, Err(PollError::Timeout(_))));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_already_cancelled_token_never_fetches() {
        let calls = Arc::new(AtomicU32::new(0));
        let token = CancelToken::new();
        token.cancel();

        let result = wait_for(
            PollSpec::new(counting_fetch(calls.clone(), 1), is_one).cancel_on(token),
        )
        .await;

        assert!(matches!(result, Err(PollError::Cancelled)));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_interrupts_sleep() {
        let calls = Arc::new(AtomicU32::new(0));
        let token = CancelToken::new();
        let trigger = token.clone();

        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_secs(7)).await;
            trigger.cancel();
        });

        let started = Instant::now();
        let result = wait_for(
            PollSpec::new(counting_fetch(calls.clone(), u32::MAX), is_one)
                .interval(Duration::from_secs(5))
                .cancel_on(token),
        )
        .await;

        assert!(matches!(result, Err(PollError::Cancelled)));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(started.elapsed(), Duration::from_secs(7));
    }

    #[test]
    fn test_map_fetch() {
        let err: PollError<FetchFailed> = PollError::Fetch(FetchFailed("x"));
        assert!(matches!(err.map_fetch(|e| e.0.len()), PollError::Fetch(1)));

        let err: PollError<FetchFailed> = PollError::Timeout(Duration::from_secs(1));
        assert!(matches!(err.map_fetch(|e| e.0.len()), PollError::Timeout(_)));

        let err: PollError<FetchFailed> = PollError::Cancelled;
        assert!(matches!(err.map_fetch(|e| e.0.len()), PollError::Cancelled));
    }

    #[test]
    fn test_display() {
        assert_eq!(PollError::<FetchFailed>::Cancelled.to_string(), "wait cancelled");
        assert_eq!(
            PollError::<FetchFailed>::Timeout(Duration::from_secs(3)).to_string(),
            "gave up waiting after 3s"
        );
    }
}
