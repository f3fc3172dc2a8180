//! Structured logging helpers
//!
//! Every control-plane call goes through [`crate::Client`], which opens a
//! [`CallLog`] when the request leaves and closes it once the response has
//! been classified. Bearer tokens never reach these helpers.

use std::time::{Duration, Instant};

use sqsc_transport::{HttpRequest, HttpResponse, Method, TransportError};
use tracing::{debug, warn};

use crate::error::Error;

/// One control-plane call, from send to classification.
#[derive(Debug, Clone)]
pub struct CallLog {
    method: Method,
    path: String,
    body_size: Option<usize>,
    started: Instant,
}

impl CallLog {
    /// Record and log an outgoing request.
    pub fn start(request: &HttpRequest) -> Self {
        let call = Self {
            method: request.method,
            path: request.path.clone(),
            body_size: request.body.as_ref().map(Vec::len),
            started: Instant::now(),
        };
        debug!(
            method = %call.method,
            path = %call.path,
            body_size = call.body_size,
            "Sending control-plane request"
        );
        call
    }

    /// Time since the request left.
    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    /// The request never got a response.
    pub fn transport_failed(&self, error: &TransportError) {
        warn!(
            method = %self.method,
            path = %self.path,
            elapsed_ms = self.elapsed().as_millis(),
            connect = error.is_connect(),
            error = %error,
            "Control-plane request failed before a response"
        );
    }

    /// The response went through the classifier. `refused` is the error it
    /// produced, if any.
    pub fn classified(&self, response: &HttpResponse, refused: Option<&Error>) {
        let elapsed_ms = self.elapsed().as_millis();
        match refused {
            None => debug!(
                method = %self.method,
                path = %self.path,
                status = response.status,
                elapsed_ms,
                body_size = response.body.len(),
                "Control-plane request succeeded"
            ),
            Some(error) => warn!(
                method = %self.method,
                path = %self.path,
                status = response.status,
                elapsed_ms,
                outcome = outcome(error),
                kind = error.resource_kind().map(|k| k.display_name()),
                error = %error,
                "Control-plane request refused"
            ),
        }
    }
}

/// Short machine-friendly label of an error, used as the `outcome` log field.
pub fn outcome(error: &Error) -> &'static str {
    match error {
        Error::NotFound { .. } => "not_found",
        Error::Conflict { .. } => "conflict",
        Error::OperationInProgress => "in_progress",
        Error::InvalidInput { .. } => "invalid_input",
        Error::Unexpected { .. } => "unexpected",
        Error::Transport(_) => "transport",
        Error::Decode(_) => "decode",
        Error::Failed { .. } => "failed",
        Error::Timeout(_) => "timeout",
        Error::Cancelled => "cancelled",
        Error::Config(_) => "config",
    }
}

/// Log the start of a wait on a remote resource
pub fn log_wait_started(kind: &str, identifier: &str, target: &str) {
    debug!(kind = %kind, identifier = %identifier, target = %target, "Waiting for resource");
}

/// Install a `fmt` subscriber filtered by `RUST_LOG` (default `info`).
///
/// Meant for binaries and examples; libraries embedding `sqsc` should set up
/// their own subscriber. Calling it twice is a no-op.
#[cfg(feature = "trace")]
#[cfg_attr(docsrs, doc(cfg(feature = "trace")))]
pub fn init_tracing() {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let _ = tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(fmt::layer())
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ResourceKind;
    use rstest::rstest;

    #[test]
    fn test_call_log_records_request() {
        let request = HttpRequest::post("/projects/abc/volumes")
            .with_json(&serde_json::json!({"name": "vol01"}))
            .unwrap();
        let call = CallLog::start(&request);

        assert_eq!(call.method, Method::Post);
        assert_eq!(call.path, "/projects/abc/volumes");
        assert_eq!(call.body_size, Some(16));
    }

    #[test]
    fn test_call_log_without_body() {
        let call = CallLog::start(&HttpRequest::delete("/projects/abc"));
        assert_eq!(call.body_size, None);

        std::thread::sleep(Duration::from_millis(10));
        assert!(call.elapsed() >= Duration::from_millis(10));
    }

    #[rstest]
    #[case(Error::not_found(ResourceKind::Volume, "vol01"), "not_found")]
    #[case(Error::conflict(ResourceKind::Batch, "nightly"), "conflict")]
    #[case(Error::OperationInProgress, "in_progress")]
    #[case(Error::invalid_input("unprovision", "x"), "invalid_input")]
    #[case(Error::Timeout(Duration::from_secs(1)), "timeout")]
    #[case(Error::Cancelled, "cancelled")]
    fn test_outcome_labels(#[case] error: Error, #[case] expected: &str) {
        assert_eq!(outcome(&error), expected);
    }

    #[test]
    fn test_classified_accepts_both_outcomes() {
        let call = CallLog::start(&HttpRequest::get("/projects"));
        let response = HttpResponse::from_status(404, "{}");

        call.classified(&response, None);
        call.classified(&response, Some(&Error::not_found(ResourceKind::Project, "p")));
    }
}
