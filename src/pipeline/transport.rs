//! Transport: deliver a [`Submission`] and classify the answer.
//!
//! [`Transport`] is the seam between the handler and the network. The
//! production implementation is [`HttpTransport`] (reqwest); tests swap in
//! scripted fakes.

use crate::config::ClientConfig;
use crate::error::FormError;
use crate::pipeline::submission::Submission;
use crate::response::{ProcessedPayload, ServerResponse};
use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Sends one submission and reports what the server said.
///
/// A non-2xx status is `Ok(ServerResponse::Rejected)`; `Err` is reserved
/// for requests that produced no usable answer.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, submission: Submission) -> Result<ServerResponse, FormError>;
}

/// `POST` multipart over HTTP with `reqwest`.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    url: String,
    timeout_secs: Option<u64>,
}

impl HttpTransport {
    pub fn new(config: &ClientConfig) -> Result<Self, FormError> {
        let mut builder = reqwest::Client::builder();
        if let Some(secs) = config.request_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder
            .build()
            .map_err(|e| FormError::InvalidConfig(format!("HTTP client: {e}")))?;
        Ok(Self {
            client,
            url: config.endpoint_url(),
            timeout_secs: config.request_timeout_secs,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    fn map_err(&self, e: reqwest::Error) -> FormError {
        match self.timeout_secs {
            Some(secs) if e.is_timeout() => FormError::Timeout {
                url: self.url.clone(),
                secs,
            },
            _ => FormError::Transport {
                url: self.url.clone(),
                reason: e.to_string(),
            },
        }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, submission: Submission) -> Result<ServerResponse, FormError> {
        info!("POST {} with parts {:?}", self.url, submission.part_names());
        let form = submission.into_form()?;

        let response = self
            .client
            .post(&self.url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| self.map_err(e))?;

        let status = response.status();
        if !status.is_success() {
            warn!("{} answered HTTP {}", self.url, status);
            return Ok(ServerResponse::Rejected {
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await.map_err(|e| self.map_err(e))?;
        debug!("{} answered HTTP {} with {} bytes", self.url, status, body.len());

        let payload = ProcessedPayload::from_json(&self.url, &body)?;
        Ok(ServerResponse::Success {
            status: status.as_u16(),
            processed_data: payload.processed_data,
        })
    }
}
