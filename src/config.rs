//! Configuration types for submitting form data.
//!
//! Everything the handler needs to know about where and how to submit lives
//! in [`ClientConfig`], built via [`ClientConfigBuilder`]. The defaults
//! reproduce the browser form exactly: same relative path, same failure
//! text, no timeout, no protection against overlapping submissions.

use crate::error::FormError;
use crate::progress::{ProgressCallback, SubmitProgressCallback};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Default server the CLI talks to when `--server` is not given.
pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:8000";

/// Path of the processing endpoint, relative to the server URL.
pub const DEFAULT_ENDPOINT_PATH: &str = "/process-data";

/// Text shown in the result display when the server rejects a submission.
pub const DEFAULT_FAILURE_MESSAGE: &str = "No data provided";

/// Text shown when the request never produced a usable response.
pub const DEFAULT_TRANSPORT_FAILURE_MESSAGE: &str = "Could not reach the server";

/// Configuration for a [`crate::handler::FormHandler`].
///
/// # Example
/// ```rust
/// use procform::{ClientConfig, SubmitGuard};
///
/// let config = ClientConfig::builder()
///     .server_url("http://localhost:8000")
///     .request_timeout_secs(30)
///     .submit_guard(SubmitGuard::SingleFlight)
///     .build()
///     .unwrap();
/// assert_eq!(config.endpoint_url(), "http://localhost:8000/process-data");
/// ```
#[derive(Clone)]
pub struct ClientConfig {
    /// Scheme, host and port of the server. Default: `http://127.0.0.1:8000`.
    pub server_url: String,

    /// Path of the processing endpoint. Default: `/process-data`.
    pub endpoint_path: String,

    /// Whole-request timeout in seconds. Default: `None` (wait forever).
    pub request_timeout_secs: Option<u64>,

    /// Policy for a submit issued while another one is in flight.
    /// Default: [`SubmitGuard::Race`].
    pub submit_guard: SubmitGuard,

    /// Result-display text for a non-2xx response. Default: `"No data provided"`.
    pub failure_message: String,

    /// Result-display text for a transport or decode failure.
    /// Default: `"Could not reach the server"`.
    pub transport_failure_message: String,

    /// Observer for submission events.
    pub progress_callback: Option<ProgressCallback>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            server_url: DEFAULT_SERVER_URL.to_string(),
            endpoint_path: DEFAULT_ENDPOINT_PATH.to_string(),
            request_timeout_secs: None,
            submit_guard: SubmitGuard::default(),
            failure_message: DEFAULT_FAILURE_MESSAGE.to_string(),
            transport_failure_message: DEFAULT_TRANSPORT_FAILURE_MESSAGE.to_string(),
            progress_callback: None,
        }
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("server_url", &self.server_url)
            .field("endpoint_path", &self.endpoint_path)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("submit_guard", &self.submit_guard)
            .field("failure_message", &self.failure_message)
            .field("transport_failure_message", &self.transport_failure_message)
            .field(
                "progress_callback",
                &self
                    .progress_callback
                    .as_ref()
                    .map(|_| "<dyn SubmitProgressCallback>"),
            )
            .finish()
    }
}

impl ClientConfig {
    /// Create a new builder for `ClientConfig`.
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder {
            config: Self::default(),
        }
    }

    /// Full URL the form is posted to.
    pub fn endpoint_url(&self) -> String {
        format!(
            "{}/{}",
            self.server_url.trim_end_matches('/'),
            self.endpoint_path.trim_start_matches('/')
        )
    }
}

/// Builder for [`ClientConfig`].
#[derive(Debug)]
pub struct ClientConfigBuilder {
    config: ClientConfig,
}

impl ClientConfigBuilder {
    pub fn server_url(mut self, url: impl Into<String>) -> Self {
        self.config.server_url = url.into();
        self
    }

    pub fn endpoint_path(mut self, path: impl Into<String>) -> Self {
        self.config.endpoint_path = path.into();
        self
    }

    pub fn request_timeout_secs(mut self, secs: u64) -> Self {
        self.config.request_timeout_secs = Some(secs);
        self
    }

    pub fn submit_guard(mut self, guard: SubmitGuard) -> Self {
        self.config.submit_guard = guard;
        self
    }

    pub fn failure_message(mut self, msg: impl Into<String>) -> Self {
        self.config.failure_message = msg.into();
        self
    }

    pub fn transport_failure_message(mut self, msg: impl Into<String>) -> Self {
        self.config.transport_failure_message = msg.into();
        self
    }

    pub fn progress_callback(mut self, cb: Arc<dyn SubmitProgressCallback>) -> Self {
        self.config.progress_callback = Some(cb);
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<ClientConfig, FormError> {
        let c = &self.config;
        if !(c.server_url.starts_with("http://") || c.server_url.starts_with("https://")) {
            return Err(FormError::InvalidConfig(format!(
                "server URL must start with http:// or https://, got '{}'",
                c.server_url
            )));
        }
        if reqwest::Url::parse(&c.server_url).is_err() {
            return Err(FormError::InvalidConfig(format!(
                "server URL '{}' is not a valid URL",
                c.server_url
            )));
        }
        if c.endpoint_path.trim_matches('/').is_empty() {
            return Err(FormError::InvalidConfig(
                "endpoint path must not be empty".into(),
            ));
        }
        if c.request_timeout_secs == Some(0) {
            return Err(FormError::InvalidConfig(
                "request timeout must be ≥ 1 second".into(),
            ));
        }
        Ok(self.config)
    }
}

// ── Enums ────────────────────────────────────────────────────────────────

/// What to do when `submit` is called while an earlier submission is still
/// waiting for its response.
///
/// | Guard | Second submit | Final view |
/// |-------|---------------|------------|
/// | `Race` | sent | whichever response resolves last |
/// | `SingleFlight` | returns `Busy`, nothing sent | the first submission's |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmitGuard {
    /// No mutual exclusion. (default)
    #[default]
    Race,
    /// Reject submits while one is in flight.
    SingleFlight,
}
