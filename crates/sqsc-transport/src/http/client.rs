//! HTTP transport client implementation
//!
//! Implements the Transport trait on top of a shared reqwest client.

use crate::error::{Result, TransportError};
use crate::traits::{HttpRequest, HttpResponse, Transport};
use async_trait::async_trait;
use reqwest::Client as ReqwestClient;
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use secrecy::ExposeSecret;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

/// Value of the `API-Version` header sent with every request
pub const API_VERSION: &str = "1";

/// HTTP transport implementation
///
/// Handles HTTP requests with:
/// - Connection pooling (one pool shared by all clones)
/// - Timeout handling
/// - The control plane's fixed headers (`Authorization`, `Accept`,
///   `API-Version`, `Content-Type` on mutating methods)
///
/// There are no automatic retries: a repeated POST could create a resource
/// twice.
#[derive(Clone, Debug)]
pub struct HttpTransport {
    client: Arc<ReqwestClient>,
    base_url: Url,
    timeout: Duration,
}

impl HttpTransport {
    /// Create a new HTTP transport with default configuration
    pub fn new(base_url: impl AsRef<str>) -> Result<Self> {
        Self::with_config(HttpTransportConfig {
            base_url: base_url.as_ref().to_string(),
            ..Default::default()
        })
    }

    /// Create a new HTTP transport with custom configuration
    pub fn with_config(config: HttpTransportConfig) -> Result<Self> {
        let base_url = Url::parse(&config.base_url)?;
        if base_url.cannot_be_a_base() {
            return Err(TransportError::InvalidUrl(format!(
                "{} cannot be used as a base URL",
                config.base_url
            )));
        }

        let client = ReqwestClient::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .pool_max_idle_per_host(config.pool_max_idle_per_host)
            .user_agent(config.user_agent)
            .build()
            .map_err(|e| TransportError::Connection(e.to_string()))?;

        Ok(Self {
            client: Arc::new(client),
            base_url,
            timeout: config.timeout,
        })
    }

    /// Get a reference to the underlying reqwest client
    pub fn reqwest_client(&self) -> Arc<ReqwestClient> {
        self.client.clone()
    }

    /// Base URL every request path is joined to
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Per-request timeout
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Join the base URL and a request path.
    ///
    /// The base URL's own path is kept, so a base of
    /// `https://host/api` and a path of `/projects` give
    /// `https://host/api/projects`.
    pub fn url_for(&self, path: &str) -> Result<Url> {
        let base = self.base_url.as_str().trim_end_matches('/');
        let path = path.trim_start_matches('/');
        Ok(Url::parse(&format!("{base}/{path}"))?)
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse> {
        let url = self.url_for(&request.path)?;
        let mut req = self
            .client
            .request(request.method.into(), url)
            .header(ACCEPT, "application/json")
            .header("API-Version", API_VERSION);

        if let Some(token) = &request.token {
            req = req.header(AUTHORIZATION, format!("bearer {}", token.expose_secret()));
        }

        match request.body {
            Some(body) if request.method.is_mutating() => {
                req = req.header(CONTENT_TYPE, "application/json").body(body);
            }
            Some(_) => {
                tracing::warn!(
                    method = %request.method,
                    path = %request.path,
                    "dropping request body on read-only method"
                );
            }
            None if request.method.is_mutating() => {
                req = req.header(CONTENT_TYPE, "application/json");
            }
            None => {}
        }

        let response = req.send().await.map_err(TransportError::from)?;

        let status = response.status().as_u16();
        let mut headers = HashMap::new();
        for (key, value) in response.headers() {
            if let Ok(v) = value.to_str() {
                headers.insert(key.as_str().to_string(), v.to_string());
            }
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    TransportError::Timeout
                } else {
                    TransportError::Http(e.to_string())
                }
            })?
            .to_vec();

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}

/// HTTP transport configuration
#[derive(Clone, Debug)]
pub struct HttpTransportConfig {
    /// Control-plane base URL
    pub base_url: String,

    /// Request timeout
    pub timeout: Duration,

    /// Connection timeout
    pub connect_timeout: Duration,

    /// Maximum idle connections per host
    pub pool_max_idle_per_host: usize,

    /// `User-Agent` header value
    pub user_agent: String,
}

impl Default for HttpTransportConfig {
    fn default() -> Self {
        Self {
            base_url: "https://www.squarescale.io".to_string(),
            timeout: Duration::from_secs(60),
            connect_timeout: Duration::from_secs(10),
            pool_max_idle_per_host: 10,
            user_agent: concat!("sqsc-rs/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}
