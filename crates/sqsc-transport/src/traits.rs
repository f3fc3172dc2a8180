//! Transport trait and request/response types
//!
//! Defines the generic Transport trait implemented by the reqwest-backed
//! [`HttpTransport`](crate::HttpTransport) and by test doubles.

use crate::error::{Result, TransportError};
use async_trait::async_trait;
use secrecy::SecretString;
use std::collections::HashMap;
use std::fmt;

/// HTTP methods used by the control plane
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    /// Read-only fetch
    Get,
    /// Create or trigger
    Post,
    /// Replace / reconfigure
    Put,
    /// Partial update
    Patch,
    /// Remove
    Delete,
}

impl Method {
    /// Upper-case wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
        }
    }

    /// Whether requests with this method may carry a JSON body.
    pub fn is_mutating(&self) -> bool {
        !matches!(self, Method::Get)
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Method> for http::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => http::Method::GET,
            Method::Post => http::Method::POST,
            Method::Put => http::Method::PUT,
            Method::Patch => http::Method::PATCH,
            Method::Delete => http::Method::DELETE,
        }
    }
}

/// HTTP request specification
///
/// `path` is relative to the transport's base URL and starts with `/`.
/// The token is kept as a [`SecretString`] so it never shows up in `Debug`
/// output or logs.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    /// HTTP method
    pub method: Method,

    /// Path below the base URL, e.g. `/projects/{uuid}/volumes`
    pub path: String,

    /// Bearer token
    pub token: Option<SecretString>,

    /// Raw JSON body, sent unchanged for mutating methods
    pub body: Option<Vec<u8>>,
}

impl HttpRequest {
    /// Create a new request without token or body
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            token: None,
            body: None,
        }
    }

    /// `GET path`
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::Get, path)
    }

    /// `POST path`
    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::Post, path)
    }

    /// `PUT path`
    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::Put, path)
    }

    /// `PATCH path`
    pub fn patch(path: impl Into<String>) -> Self {
        Self::new(Method::Patch, path)
    }

    /// `DELETE path`
    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::Delete, path)
    }

    /// Attach a bearer token
    pub fn with_token(self, token: impl Into<String>) -> Self {
        self.with_secret_token(SecretString::new(token.into().into_boxed_str()))
    }

    /// Attach an already wrapped bearer token
    pub fn with_secret_token(mut self, token: SecretString) -> Self {
        self.token = Some(token);
        self
    }

    /// Set the raw request body
    pub fn with_body(mut self, body: Vec<u8>) -> Self {
        self.body = Some(body);
        self
    }

    /// Serialize `payload` as the JSON request body
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::Serialization`] if `payload` cannot be
    /// encoded.
    pub fn with_json<T: serde::Serialize + ?Sized>(self, payload: &T) -> Result<Self> {
        let body = serde_json::to_vec(payload).map_err(TransportError::from)?;
        Ok(self.with_body(body))
    }
}

/// HTTP response
///
/// Fully buffered. Header names are stored lower-case.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    /// HTTP status code
    pub status: u16,

    /// Response headers
    pub headers: HashMap<String, String>,

    /// Response body
    pub body: Vec<u8>,
}

impl HttpResponse {
    /// Create a new HTTP response
    pub fn new(status: u16, headers: HashMap<String, String>, body: Vec<u8>) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    /// Response with no headers, handy for test doubles
    pub fn from_status(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self::new(status, HashMap::new(), body.into())
    }

    /// Check if response is successful (2xx)
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Body as text, with invalid UTF-8 replaced
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Get a header value by name (case-insensitive)
    pub fn get_header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Generic transport trait
///
/// Implementations deliver the request and return whatever the server
/// answered, whatever the status code. Only failures to obtain a response
/// are errors.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send a request and receive the buffered response
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse>;
}
