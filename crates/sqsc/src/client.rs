//! Main client implementation for the control plane

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use sqsc_core::poll::{PollSpec, wait_for};
use sqsc_transport::{HttpRequest, HttpResponse, HttpTransport, HttpTransportConfig, Transport};

use crate::{
    classify::{Expect, classify},
    config::ClientConfig,
    error::{Error, Result},
    observability::CallLog,
    resources::{
        Batches, ExternalNodes, ExtraNodes, InfrastructureActions, NetworkRules, Projects, Redis,
        SchedulingGroups, Services, StatefulNodes, Tasks, Volumes,
    },
    types::User,
    wait::WaitOptions,
};

/// Client for the control plane.
///
/// Owns one [`Transport`] shared by every operation; cloning is cheap and
/// clones share the connection pool. Resource handles are created on demand
/// and scoped to a project where the routes are.
///
/// # Example
///
/// ```rust,no_run
/// use sqsc::Client;
///
/// # async fn example() -> sqsc::Result<()> {
/// let client = Client::new("my-token")?;
/// for project in client.projects().list().await? {
///     println!("{} {}", project.name, project.infra_status);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct Client {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    transport: Arc<dyn Transport>,
    token: SecretString,
    poll_interval: Duration,
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("poll_interval", &self.inner.poll_interval)
            .finish_non_exhaustive()
    }
}

impl Client {
    /// Create a client for the default endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the token is empty or the HTTP client
    /// cannot be built.
    pub fn new(token: impl Into<String>) -> Result<Self> {
        Self::builder().token(token).build()
    }

    /// Create a client from `SQSC_ENDPOINT`, `SQSC_TOKEN` and friends.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if `SQSC_TOKEN` is not set.
    #[cfg(feature = "env")]
    #[cfg_attr(docsrs, doc(cfg(feature = "env")))]
    pub fn from_env() -> Result<Self> {
        Self::from_config(ClientConfig::from_env())
    }

    /// Create a new client builder for advanced configuration.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::default()
    }

    /// Create a client on top of any transport, typically a test double.
    pub fn with_transport(transport: Arc<dyn Transport>, token: impl Into<String>) -> Self {
        Self::from_parts(
            transport,
            SecretString::new(token.into().into_boxed_str()),
            sqsc_core::poll::DEFAULT_INTERVAL,
        )
    }

    /// Create a client from a configuration object.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] when no token is configured or the endpoint
    /// is not a usable base URL.
    pub fn from_config(config: ClientConfig) -> Result<Self> {
        Self::builder_from(config).build()
    }

    fn builder_from(config: ClientConfig) -> ClientBuilder {
        ClientBuilder {
            config,
            transport: None,
        }
    }

    fn from_parts(transport: Arc<dyn Transport>, token: SecretString, poll_interval: Duration) -> Self {
        Self {
            inner: Arc::new(ClientInner {
                transport,
                token,
                poll_interval,
            }),
        }
    }

    /// Delay between two fetches of a wait, unless overridden per call.
    pub fn poll_interval(&self) -> Duration {
        self.inner.poll_interval
    }

    /// Projects of the account.
    pub fn projects(&self) -> Projects {
        Projects::new(self.clone())
    }

    /// Stateful nodes of a project.
    pub fn stateful_nodes(&self, project: impl Into<String>) -> StatefulNodes {
        StatefulNodes::new(self.clone(), project.into())
    }

    /// Extra nodes of a project.
    pub fn extra_nodes(&self, project: impl Into<String>) -> ExtraNodes {
        ExtraNodes::new(self.clone(), project.into())
    }

    /// External nodes of a project.
    pub fn external_nodes(&self, project: impl Into<String>) -> ExternalNodes {
        ExternalNodes::new(self.clone(), project.into())
    }

    /// Volumes of a project.
    pub fn volumes(&self, project: impl Into<String>) -> Volumes {
        Volumes::new(self.clone(), project.into())
    }

    /// Batches of a project.
    pub fn batches(&self, project: impl Into<String>) -> Batches {
        Batches::new(self.clone(), project.into())
    }

    /// Redis databases of a project.
    pub fn redis(&self, project: impl Into<String>) -> Redis {
        Redis::new(self.clone(), project.into())
    }

    /// Scheduling groups of a project.
    pub fn scheduling_groups(&self, project: impl Into<String>) -> SchedulingGroups {
        SchedulingGroups::new(self.clone(), project.into())
    }

    /// Services of a project.
    pub fn services(&self, project: impl Into<String>) -> Services {
        Services::new(self.clone(), project.into())
    }

    /// Network rules of one service.
    pub fn network_rules(
        &self,
        project: impl Into<String>,
        service: impl Into<String>,
    ) -> NetworkRules {
        NetworkRules::new(self.clone(), project.into(), service.into())
    }

    /// Background tasks.
    pub fn tasks(&self) -> Tasks {
        Tasks::new(self.clone())
    }

    /// Infrastructure actions of a project.
    pub fn infrastructure_actions(&self, project: impl Into<String>) -> InfrastructureActions {
        InfrastructureActions::new(self.clone(), project.into())
    }

    /// Check the token and return the account it belongs to.
    ///
    /// # Errors
    ///
    /// A rejected token comes back as [`Error::Unexpected`] with status 401
    /// and a hint to check `SQSC_TOKEN`. Any answer other than 200 is
    /// refused as well.
    pub async fn validate_token(&self) -> Result<User> {
        self.call(HttpRequest::get("/me"), &Expect::ok()).await
    }

    /// Send a request and return the raw response, whatever its status.
    ///
    /// The client's token is attached. Use [`Client::call`] to get a
    /// classified result instead.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Transport`] when no response could be obtained.
    pub async fn execute(&self, request: HttpRequest) -> Result<HttpResponse> {
        let (response, _) = self.send(request).await?;
        Ok(response)
    }

    /// Send a request and classify the response against `expect`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Transport`] when no response could be obtained, and
    /// any classifier outcome otherwise.
    pub async fn call<T: DeserializeOwned>(&self, request: HttpRequest, expect: &Expect) -> Result<T> {
        let (value, _) = self.call_keeping_response(request, expect).await?;
        Ok(value)
    }

    /// Like [`Client::call`], also handing back the accepted response for
    /// routes that report failures inside a success body.
    pub(crate) async fn call_keeping_response<T: DeserializeOwned>(
        &self,
        request: HttpRequest,
        expect: &Expect,
    ) -> Result<(T, HttpResponse)> {
        let (response, call) = self.send(request).await?;
        let result = classify(&response, expect);
        call.classified(&response, result.as_ref().err());
        result.map(|value| (value, response))
    }

    async fn send(&self, request: HttpRequest) -> Result<(HttpResponse, CallLog)> {
        let request = request.with_secret_token(self.inner.token.clone());
        let call = CallLog::start(&request);
        match self.inner.transport.send(request).await {
            Ok(response) => Ok((response, call)),
            Err(err) => {
                call.transport_failed(&err);
                Err(Error::Transport(err))
            }
        }
    }

    /// Re-run `fetch` until `is_done` holds, honouring the wait options.
    ///
    /// A failing fetch ends the wait with its error.
    pub(crate) async fn wait_until<S, F, Fut, P>(
        &self,
        options: &WaitOptions,
        fetch: F,
        is_done: P,
    ) -> Result<S>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<S>>,
        P: Fn(&S) -> bool,
    {
        let spec = PollSpec::new(fetch, is_done)
            .interval(options.interval.unwrap_or(self.inner.poll_interval))
            .maybe_deadline(options.deadline)
            .maybe_cancel_on(options.cancel.clone());

        Ok(wait_for(spec).await?)
    }
}

/// Builder for [`Client`].
#[derive(Default)]
pub struct ClientBuilder {
    config: ClientConfig,
    transport: Option<Arc<dyn Transport>>,
}

impl ClientBuilder {
    /// Control-plane base URL.
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.config.endpoint = endpoint.into();
        self
    }

    /// Bearer token.
    pub fn token(mut self, token: impl Into<String>) -> Self {
        self.config.token = Some(SecretString::new(token.into().into_boxed_str()));
        self
    }

    /// Per-request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// TCP connect timeout.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.config.connect_timeout = timeout;
        self
    }

    /// Default delay between two fetches of a wait.
    pub fn poll_interval(mut self, interval: Duration) -> Self {
        self.config.poll_interval = interval;
        self
    }

    /// Maximum idle connections kept per host.
    pub fn pool_max_idle_per_host(mut self, max: usize) -> Self {
        self.config.pool_max_idle_per_host = max;
        self
    }

    /// Use this transport instead of building an HTTP one. The endpoint and
    /// timeouts are then ignored.
    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Build the client.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] when no token is configured or the endpoint
    /// is not a usable base URL.
    pub fn build(self) -> Result<Client> {
        let token = match self.config.token {
            Some(token) if !token.expose_secret().is_empty() => token,
            _ => {
                return Err(Error::Config(
                    "no API token configured, set SQSC_TOKEN or call ClientBuilder::token".into(),
                ));
            }
        };

        let transport: Arc<dyn Transport> = match self.transport {
            Some(transport) => transport,
            None => {
                if self.config.endpoint.trim().is_empty() {
                    return Err(Error::Config("endpoint cannot be empty".into()));
                }
                let http = HttpTransport::with_config(HttpTransportConfig {
                    base_url: self.config.endpoint.trim().to_string(),
                    timeout: self.config.timeout,
                    connect_timeout: self.config.connect_timeout,
                    pool_max_idle_per_host: self.config.pool_max_idle_per_host,
                    ..Default::default()
                })
                .map_err(|e| Error::Config(format!("invalid endpoint: {e}")))?;
                Arc::new(http)
            }
        };

        Ok(Client::from_parts(
            transport,
            token,
            self.config.poll_interval,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_client_builder() {
        let client = Client::builder()
            .token("test-token")
            .endpoint("http://localhost:3000")
            .timeout(Duration::from_secs(30))
            .poll_interval(Duration::from_secs(1))
            .build()
            .unwrap();

        assert_eq!(client.poll_interval(), Duration::from_secs(1));
    }

    #[test]
    fn test_build_requires_token() {
        assert_matches!(Client::builder().build(), Err(Error::Config(_)));
        assert_matches!(Client::new(""), Err(Error::Config(_)));
    }

    #[test]
    fn test_build_rejects_bad_endpoint() {
        let err = Client::builder()
            .token("t")
            .endpoint("not a url")
            .build()
            .unwrap_err();
        assert_matches!(err, Error::Config(ref msg) if msg.starts_with("invalid endpoint"));

        assert_matches!(
            Client::builder().token("t").endpoint("   ").build(),
            Err(Error::Config(_))
        );
    }

    #[test]
    fn test_debug_hides_token() {
        let client = Client::new("super-secret-token").unwrap();
        assert!(!format!("{client:?}").contains("super-secret-token"));
    }

    #[test]
    fn test_client_clone_shares_inner() {
        let client1 = Client::new("test-token").unwrap();
        let client2 = client1.clone();
        assert!(Arc::ptr_eq(&client1.inner, &client2.inner));
    }
}
