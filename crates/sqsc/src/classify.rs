//! Response classification
//!
//! The control plane is not uniformly RESTful: a missing resource may come
//! back as a plain 404, as a 404 carrying a Rails "Couldn't find ..." text,
//! and a running deployment shows up as a bare 400 on some routes only.
//! Every status-code and message match lives here so the resource wrappers
//! stay declarative: each call site describes what it expects with an
//! [`Expect`] and hands the response to [`classify`].
//!
//! Classification order:
//!
//! 1. status in the success set: decode the body (an empty body decodes as
//!    JSON `null`)
//! 2. otherwise extract whatever structured detail the body carries
//!    (`{"error": ...}`, `{"errors": {...}}`)
//! 3. known database texts win over the status code
//! 4. 404 / 409 / 400 / 422 map per call site
//! 5. anything else is [`Error::Unexpected`]
//!
//! A body that looks like JSON but does not parse is reported as
//! [`Error::Decode`] at any step.

use crate::error::{Error, ResourceKind, Result};
use regex::Regex;
use serde::de::{DeserializeOwned, IgnoredAny};
use serde_json::Value;
use sqsc_transport::HttpResponse;
use std::sync::LazyLock;

const DUPLICATE_KEY: &str = "duplicate key value violates unique constraint";

static COULDNT_FIND: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"Couldn't find (\w+) with").expect("Failed to compile couldn't-find regex")
});

static NO_MODEL_FOUND: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"No (\w+) found for").expect("Failed to compile no-model-found regex")
});

/// What a call site wants done with a 400 response.
///
/// Mapping 400 to "operation in progress" is only right for the delete and
/// bind routes that use it, so it is never a default.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum BadRequest {
    /// Report [`Error::Unexpected`].
    #[default]
    Unexpected,
    /// Report [`Error::OperationInProgress`].
    OperationInProgress,
    /// Report [`Error::InvalidInput`] for `field`. The server's message is
    /// used as the reason when there is one, `reason` otherwise.
    InvalidInput {
        /// Field or operation the input error is about
        field: String,
        /// Reason used when the body carries none
        reason: String,
    },
}

/// Per-call-site classification context.
///
/// # Examples
///
/// ```rust
/// use sqsc::ResourceKind;
/// use sqsc::classify::Expect;
///
/// // DELETE /projects/{uuid}/statefull_nodes/{name}
/// let expect = Expect::status(200)
///     .primary(ResourceKind::StatefulNode, "node1")
///     .not_found_as(ResourceKind::Project, "ba90e5fe")
///     .in_progress_on_400();
/// assert!(expect.is_success(200));
/// assert!(!expect.is_success(204));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Expect {
    success: Vec<u16>,
    primary: Option<(ResourceKind, String)>,
    not_found: Option<(ResourceKind, String)>,
    subjects: Vec<(ResourceKind, String)>,
    bad_request: BadRequest,
}

impl Expect {
    /// Expect exactly one success status.
    pub fn status(code: u16) -> Self {
        Self::statuses(&[code])
    }

    /// Expect any of the given success statuses.
    pub fn statuses(codes: &[u16]) -> Self {
        Self {
            success: codes.to_vec(),
            ..Default::default()
        }
    }

    /// `200 OK`
    pub fn ok() -> Self {
        Self::status(200)
    }

    /// `201 Created`
    pub fn created() -> Self {
        Self::status(201)
    }

    /// The resource the call is about. Used for 409 and duplicate-key
    /// conflicts, and as the fallback 404 target.
    pub fn primary(mut self, kind: ResourceKind, identifier: impl Into<String>) -> Self {
        self.primary = Some((kind, identifier.into()));
        self
    }

    /// What a plain 404 means, typically the parent project.
    pub fn not_found_as(mut self, kind: ResourceKind, identifier: impl Into<String>) -> Self {
        self.not_found = Some((kind, identifier.into()));
        self
    }

    /// Another resource named by the call, e.g. the volume of a bind.
    pub fn subject(mut self, kind: ResourceKind, identifier: impl Into<String>) -> Self {
        self.subjects.push((kind, identifier.into()));
        self
    }

    /// How to report a 400.
    pub fn bad_request(mut self, policy: BadRequest) -> Self {
        self.bad_request = policy;
        self
    }

    /// Report a 400 as [`Error::OperationInProgress`].
    pub fn in_progress_on_400(self) -> Self {
        self.bad_request(BadRequest::OperationInProgress)
    }

    /// Report a 400 as [`Error::InvalidInput`].
    pub fn invalid_on_400(self, field: impl Into<String>, reason: impl Into<String>) -> Self {
        self.bad_request(BadRequest::InvalidInput {
            field: field.into(),
            reason: reason.into(),
        })
    }

    /// Whether `status` is in the success set.
    pub fn is_success(&self, status: u16) -> bool {
        self.success.contains(&status)
    }

    /// Identifier registered for `kind`, looking at the primary resource,
    /// the extra subjects and the 404 target in that order.
    fn identifier_for(&self, kind: ResourceKind) -> Option<&str> {
        self.primary
            .iter()
            .chain(self.subjects.iter())
            .chain(self.not_found.iter())
            .find(|(k, _)| *k == kind)
            .map(|(_, id)| id.as_str())
    }
}

/// Structured detail extracted from an error body.
#[derive(Debug, Default, Clone, PartialEq)]
pub(crate) struct Detail {
    /// Human-readable message, flattened from whatever shape the body had
    pub(crate) message: Option<String>,
    /// `(field, message)` pairs from object-shaped errors
    pub(crate) fields: Vec<(String, String)>,
    /// Raw body when it was not JSON (HTML error pages, plain text)
    pub(crate) raw_text: Option<String>,
}

impl Detail {
    /// Text searched for known database messages.
    fn haystack(&self) -> Option<&str> {
        self.message.as_deref().or(self.raw_text.as_deref())
    }
}

/// Classify a response for a call site.
///
/// # Errors
///
/// Returns exactly one of the classifier outcomes of [`Error`]:
/// `NotFound`, `Conflict`, `OperationInProgress`, `InvalidInput`,
/// `Unexpected` or `Decode`.
pub fn classify<T: DeserializeOwned>(response: &HttpResponse, expect: &Expect) -> Result<T> {
    if expect.is_success(response.status) {
        return decode(&response.body);
    }
    Err(classify_failure(response, expect))
}

/// Decode a success body. An empty body is read as JSON `null`, so `()`,
/// `Option<_>` and [`serde::de::IgnoredAny`] accept 204 responses.
///
/// Syntax is checked before the typed pass so malformed JSON yields the
/// same parser message whatever `T` is.
pub fn decode<T: DeserializeOwned>(body: &[u8]) -> Result<T> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(serde_json::from_slice(b"null")?);
    }
    serde_json::from_slice::<IgnoredAny>(body)?;
    Ok(serde_json::from_slice(body)?)
}

fn classify_failure(response: &HttpResponse, expect: &Expect) -> Error {
    let status = response.status;
    let detail = match parse_detail(&response.body) {
        Ok(detail) => detail,
        Err(err) => return err,
    };

    if let Some(err) = match_known_texts(&detail, expect) {
        return err;
    }

    match status {
        404 => match expect.not_found.as_ref().or(expect.primary.as_ref()) {
            Some((kind, id)) => Error::not_found(*kind, id.clone()),
            None => unexpected(response, &detail),
        },
        409 => match expect.primary.as_ref() {
            Some((kind, id)) => Error::conflict(*kind, id.clone()),
            None => unexpected(response, &detail),
        },
        400 => match &expect.bad_request {
            BadRequest::Unexpected => unexpected(response, &detail),
            BadRequest::OperationInProgress => Error::OperationInProgress,
            BadRequest::InvalidInput { field, reason } => Error::InvalidInput {
                field: field.clone(),
                reason: detail.message.clone().unwrap_or_else(|| reason.clone()),
            },
        },
        422 => unprocessable(expect, &detail),
        _ => unexpected(response, &detail),
    }
}

/// Database and lookup texts the control plane leaks through its messages.
fn match_known_texts(detail: &Detail, expect: &Expect) -> Option<Error> {
    let text = detail.haystack()?;

    if text.contains(DUPLICATE_KEY) {
        let (kind, id) = expect.primary.as_ref().or(expect.not_found.as_ref())?;
        return Some(Error::conflict(*kind, id.clone()));
    }

    let model = COULDNT_FIND
        .captures(text)
        .or_else(|| NO_MODEL_FOUND.captures(text))
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())?;

    let kind = ResourceKind::from_model_name(model)?;
    let identifier = expect
        .identifier_for(kind)
        .or_else(|| expect.primary.as_ref().map(|(_, id)| id.as_str()))?;

    Some(Error::not_found(kind, identifier))
}

fn unprocessable(expect: &Expect, detail: &Detail) -> Error {
    if let Some((field, _)) = detail.fields.first() {
        let reasons: Vec<&str> = detail
            .fields
            .iter()
            .filter(|(f, _)| f == field)
            .map(|(_, msg)| msg.as_str())
            .collect();
        return Error::invalid_input(field.clone(), reasons.join(", "));
    }

    let field = match &expect.bad_request {
        BadRequest::InvalidInput { field, .. } => field.clone(),
        _ => "request".to_string(),
    };
    let reason = detail
        .message
        .clone()
        .unwrap_or_else(|| "unprocessable entity".to_string());
    Error::invalid_input(field, reason)
}

fn unexpected(response: &HttpResponse, detail: &Detail) -> Error {
    let status = response.status;
    let message = match status {
        401 => {
            let extra = detail
                .message
                .as_deref()
                .map(|m| format!("{m}, "))
                .unwrap_or_default();
            format!(
                "Unauthorized: {extra}please make sure your SQSC_TOKEN environment variable is properly set"
            )
        }
        503 => {
            let retry_after = response.get_header("retry-after").unwrap_or("Unknown");
            format!("Service unavailable: potential date of service availability: {retry_after}")
        }
        s if s >= 500 && detail.message.is_none() && is_html(response) => format!(
            "Something went wrong on server side (code: {s}). Please report error to support@squarescale.com."
        ),
        s => detail
            .message
            .clone()
            .unwrap_or_else(|| format!("An unexpected error occurred (code: {s})")),
    };

    Error::Unexpected {
        status,
        message,
        body: response.text(),
    }
}

fn is_html(response: &HttpResponse) -> bool {
    response
        .get_header("content-type")
        .is_some_and(|ct| ct.contains("text/html"))
}

/// Extract structured detail from an error body.
///
/// Empty, HTML and plain-text bodies carry no structured detail. A body that
/// starts like JSON must parse, otherwise the parser error is returned.
pub(crate) fn parse_detail(body: &[u8]) -> std::result::Result<Detail, Error> {
    let text = String::from_utf8_lossy(body);
    let trimmed = text.trim();

    if trimmed.is_empty() {
        return Ok(Detail::default());
    }
    if !(trimmed.starts_with('{') || trimmed.starts_with('[')) {
        return Ok(Detail {
            raw_text: Some(trimmed.to_string()),
            ..Default::default()
        });
    }

    let value: Value = serde_json::from_str(trimmed)?;
    let mut detail = Detail::default();

    let Value::Object(map) = &value else {
        return Ok(detail);
    };

    let mut lines = Vec::new();

    match map.get("error") {
        Some(Value::String(msg)) if !msg.is_empty() => lines.push(msg.clone()),
        Some(Value::Object(obj)) => flatten(obj, "", &mut detail.fields),
        _ => {}
    }
    match map.get("errors") {
        Some(Value::String(msg)) if !msg.is_empty() => lines.push(msg.clone()),
        Some(Value::Object(obj)) => flatten(obj, "", &mut detail.fields),
        Some(Value::Array(items)) => lines.extend(items.iter().filter_map(as_text)),
        _ => {}
    }
    if let Some(Value::Array(items)) = map.get("detailed_error") {
        lines.extend(items.iter().filter_map(as_text));
    }

    lines.extend(
        detail
            .fields
            .iter()
            .map(|(field, msg)| format!("{field}: {msg}")),
    );

    if !lines.is_empty() {
        detail.message = Some(lines.join("\n"));
    }
    Ok(detail)
}

fn as_text(value: &Value) -> Option<String> {
    value.as_str().filter(|s| !s.is_empty()).map(str::to_string)
}

/// Flatten `{field: msg | [msg] | {sub: ...}}` into `(path, msg)` pairs.
fn flatten(obj: &serde_json::Map<String, Value>, prefix: &str, out: &mut Vec<(String, String)>) {
    for (key, value) in obj {
        let path = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{prefix} {key}")
        };
        match value {
            Value::String(msg) => out.push((path, msg.clone())),
            Value::Array(items) => {
                out.extend(items.iter().filter_map(as_text).map(|msg| (path.clone(), msg)));
            }
            Value::Object(inner) => flatten(inner, &path, out),
            _ => {}
        }
    }
}
