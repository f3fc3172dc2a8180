//! Common test utilities and helpers

use async_trait::async_trait;
use sqsc::{Client, HttpRequest, HttpResponse, Method, Transport, TransportError};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// Project UUID used throughout the tests
#[allow(dead_code)]
pub const PROJECT: &str = "ba90e5fe-f520-4275-897b-49a95c1157a3";

/// Token used throughout the tests
#[allow(dead_code)]
pub const TOKEN: &str = "some-token";

struct Step {
    method: Method,
    path: String,
    response: HttpResponse,
}

/// In-memory transport answering from a fixed script.
///
/// Each request must match the next step's method and path. A mismatch or
/// an exhausted script is reported as a transport error so the test fails
/// with a readable message.
#[derive(Default)]
pub struct ScriptedTransport {
    script: Mutex<VecDeque<Step>>,
    seen: Mutex<Vec<HttpRequest>>,
}

#[allow(dead_code)]
impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a step to the script
    pub fn then(self, method: Method, path: &str, status: u16, body: &str) -> Self {
        self.script
            .lock()
            .unwrap()
            .push_back(Step {
                method,
                path: path.to_string(),
                response: HttpResponse::from_status(status, body.as_bytes().to_vec()),
            });
        self
    }

    /// Append the same step `times` times
    pub fn repeat(mut self, times: usize, method: Method, path: &str, status: u16, body: &str) -> Self {
        for _ in 0..times {
            self = self.then(method, path, status, body);
        }
        self
    }

    /// Requests received so far, as `(method, path)`
    pub fn requests(&self) -> Vec<(Method, String)> {
        self.seen
            .lock()
            .unwrap()
            .iter()
            .map(|r| (r.method, r.path.clone()))
            .collect()
    }

    /// Full requests received so far
    pub fn raw_requests(&self) -> Vec<HttpRequest> {
        self.seen.lock().unwrap().clone()
    }

    /// Steps not consumed yet
    pub fn remaining(&self) -> usize {
        self.script.lock().unwrap().len()
    }

    /// Wrap into an `Arc` and build a client on top of it
    pub fn into_client(self) -> (Arc<Self>, Client) {
        let transport = Arc::new(self);
        let client = Client::with_transport(transport.clone(), TOKEN);
        (transport, client)
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        self.seen.lock().unwrap().push(request.clone());

        let step = self
            .script
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| {
                TransportError::Other(format!(
                    "script exhausted at {} {}",
                    request.method, request.path
                ))
            })?;

        if step.method != request.method || step.path != request.path {
            return Err(TransportError::Other(format!(
                "expected {} {}, got {} {}",
                step.method, step.path, request.method, request.path
            )));
        }
        Ok(step.response)
    }
}

/// `/projects/{PROJECT}/{suffix}`
#[allow(dead_code)]
pub fn project_path(suffix: &str) -> String {
    format!("/projects/{PROJECT}/{suffix}")
}

/// JSON body of a single-node list
#[allow(dead_code)]
pub fn node_list(name: &str, status: &str) -> String {
    format!(
        r#"[{{"id":23,"name":"{name}","node_type":"t2.micro","zone":"eu-west-1a","status":"{status}"}}]"#
    )
}
