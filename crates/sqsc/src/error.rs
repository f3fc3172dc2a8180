//! Error types for the sqsc client
//!
//! The control plane signals the same logical failure in several ways
//! (plain 404, 404 with a Rails "Couldn't find ..." message, sometimes 400).
//! [`crate::classify`] folds all of them into the small taxonomy below so
//! resource wrappers and callers can match on meaning instead of status codes.

use sqsc_core::poll::PollError;
use sqsc_transport::TransportError;
use std::fmt;
use std::time::Duration;
use thiserror::Error;

/// Result type alias for operations that can fail with an sqsc error.
pub type Result<T> = std::result::Result<T, Error>;

/// The categories of entity managed by the control plane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    /// A project (cluster + services)
    Project,
    /// A stateful node
    StatefulNode,
    /// An extra node
    ExtraNode,
    /// A node hosted outside the provider, joined over VPN
    ExternalNode,
    /// A block volume
    Volume,
    /// A one-shot or periodic batch
    Batch,
    /// A redis database
    Redis,
    /// A scheduling group
    SchedulingGroup,
    /// A service container
    Service,
    /// A service network rule
    NetworkRule,
    /// A background task
    Task,
    /// An infrastructure action
    InfrastructureAction,
}

impl ResourceKind {
    /// Every kind, in declaration order.
    pub const ALL: [ResourceKind; 12] = [
        ResourceKind::Project,
        ResourceKind::StatefulNode,
        ResourceKind::ExtraNode,
        ResourceKind::ExternalNode,
        ResourceKind::Volume,
        ResourceKind::Batch,
        ResourceKind::Redis,
        ResourceKind::SchedulingGroup,
        ResourceKind::Service,
        ResourceKind::NetworkRule,
        ResourceKind::Task,
        ResourceKind::InfrastructureAction,
    ];

    /// Human-readable name used in error messages.
    pub fn display_name(&self) -> &'static str {
        match self {
            ResourceKind::Project => "Project",
            ResourceKind::StatefulNode => "Stateful-node",
            ResourceKind::ExtraNode => "Extra-node",
            ResourceKind::ExternalNode => "External node",
            ResourceKind::Volume => "Volume",
            ResourceKind::Batch => "Batch",
            ResourceKind::Redis => "Redis",
            ResourceKind::SchedulingGroup => "Scheduling group",
            ResourceKind::Service => "Service",
            ResourceKind::NetworkRule => "Network rule",
            ResourceKind::Task => "Task",
            ResourceKind::InfrastructureAction => "Infrastructure action",
        }
    }

    /// Resolve the model name used in server messages.
    ///
    /// Accepts both the Rails class name found in `Couldn't find <Model> with`
    /// texts and the lower-case word found in `No <model> found for` texts.
    ///
    /// ```rust
    /// use sqsc::ResourceKind;
    ///
    /// assert_eq!(ResourceKind::from_model_name("StatefulNode"), Some(ResourceKind::StatefulNode));
    /// assert_eq!(ResourceKind::from_model_name("volume"), Some(ResourceKind::Volume));
    /// assert_eq!(ResourceKind::from_model_name("Widget"), None);
    /// ```
    pub fn from_model_name(model: &str) -> Option<Self> {
        let normalized: String = model
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .map(|c| c.to_ascii_lowercase())
            .collect();

        let kind = match normalized.as_str() {
            "project" | "cluster" => ResourceKind::Project,
            "statefulnode" | "statefullnode" => ResourceKind::StatefulNode,
            "extranode" => ResourceKind::ExtraNode,
            "externalnode" => ResourceKind::ExternalNode,
            "volume" => ResourceKind::Volume,
            "batch" => ResourceKind::Batch,
            "redis" | "redisdatabase" | "redisdatabaseconfig" => ResourceKind::Redis,
            "schedulinggroup" => ResourceKind::SchedulingGroup,
            "service" | "container" => ResourceKind::Service,
            "networkrule" | "servicenetworkrule" => ResourceKind::NetworkRule,
            "task" => ResourceKind::Task,
            "infrastructureaction" => ResourceKind::InfrastructureAction,
            _ => return None,
        };
        Some(kind)
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Main error type for the sqsc client.
///
/// The first seven variants are the only possible outcomes of response
/// classification. `Failed`, `Timeout` and `Cancelled` come from waits,
/// `Config` from client construction.
#[derive(Debug, Error)]
pub enum Error {
    /// The addressed resource (or its parent) does not exist.
    #[error("{kind} '{identifier}' does not exist")]
    NotFound {
        /// What kind of resource is missing
        kind: ResourceKind,
        /// Name, UUID or id used to address it
        identifier: String,
    },

    /// A resource with the same identity already exists.
    #[error("{kind} '{identifier}' already exists")]
    Conflict {
        /// Kind of the duplicated resource
        kind: ResourceKind,
        /// Identifier that collided
        identifier: String,
    },

    /// The control plane refused the call because a deployment is running.
    #[error("Deploy probably in progress")]
    OperationInProgress,

    /// The request was understood but rejected.
    #[error("Invalid {field}: {reason}")]
    InvalidInput {
        /// Offending field or operation
        field: String,
        /// Server-provided reason
        reason: String,
    },

    /// Any status the call site did not expect.
    #[error("{message}")]
    Unexpected {
        /// HTTP status code
        status: u16,
        /// Best available human-readable message
        message: String,
        /// Raw response body, for diagnostics
        body: String,
    },

    /// No response could be obtained.
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    /// The body could not be decoded. Displays the parser's text verbatim.
    #[error(transparent)]
    Decode(#[from] serde_json::Error),

    /// A waited-on resource reached a failure status.
    #[error("{kind} '{identifier}' ended in status '{status}'")]
    Failed {
        /// Kind of the waited-on resource
        kind: ResourceKind,
        /// Its identifier
        identifier: String,
        /// The failure status reported by the control plane
        status: String,
    },

    /// A wait did not reach its target state before its deadline.
    #[error("Timed out after {0:?} waiting for the expected state")]
    Timeout(Duration),

    /// A wait was cancelled through its token.
    #[error("Wait cancelled")]
    Cancelled,

    /// The client could not be built from the given configuration.
    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl Error {
    /// Shorthand for [`Error::NotFound`].
    pub fn not_found(kind: ResourceKind, identifier: impl Into<String>) -> Self {
        Error::NotFound {
            kind,
            identifier: identifier.into(),
        }
    }

    /// Shorthand for [`Error::Conflict`].
    pub fn conflict(kind: ResourceKind, identifier: impl Into<String>) -> Self {
        Error::Conflict {
            kind,
            identifier: identifier.into(),
        }
    }

    /// Shorthand for [`Error::InvalidInput`].
    pub fn invalid_input(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::InvalidInput {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Whether the failure ended the remote operation's story for this call.
    ///
    /// The client never retries: every classified outcome and every
    /// transport or decode failure is terminal. A wait that timed out or was
    /// cancelled is not, since the remote operation may still complete.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Error::Timeout(_) | Error::Cancelled)
    }

    /// The kind of resource this error is about, if any.
    pub fn resource_kind(&self) -> Option<ResourceKind> {
        match self {
            Error::NotFound { kind, .. }
            | Error::Conflict { kind, .. }
            | Error::Failed { kind, .. } => Some(*kind),
            _ => None,
        }
    }

    /// HTTP status of the response behind this error, when it is known.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Unexpected { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether this is a `NotFound` for the given kind.
    pub fn is_not_found(&self, kind: ResourceKind) -> bool {
        matches!(self, Error::NotFound { kind: k, .. } if *k == kind)
    }
}

impl From<PollError<Error>> for Error {
    fn from(err: PollError<Error>) -> Self {
        match err {
            PollError::Fetch(e) => e,
            PollError::Timeout(d) => Error::Timeout(d),
            PollError::Cancelled => Error::Cancelled,
        }
    }
}
