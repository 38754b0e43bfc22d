//! Response and outcome types.

use crate::error::FormError;
use crate::pipeline::render::DisplayState;
use serde::{Deserialize, Serialize};

/// JSON body of a successful `/process-data` response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessedPayload {
    /// Records separated by `\n`; tokens in a record separated by `", "`.
    pub processed_data: String,
}

impl ProcessedPayload {
    /// Decode a response body. Extra fields are ignored.
    pub fn from_json(url: &str, body: &[u8]) -> Result<Self, FormError> {
        serde_json::from_slice(body).map_err(|e| FormError::Decode {
            url: url.to_string(),
            detail: e.to_string(),
        })
    }
}

/// What the server said about a submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServerResponse {
    /// 2xx with a decodable body.
    Success { status: u16, processed_data: String },
    /// Any other status. The body is not read.
    Rejected { status: u16 },
}

impl ServerResponse {
    pub fn status(&self) -> u16 {
        match self {
            ServerResponse::Success { status, .. } | ServerResponse::Rejected { status } => *status,
        }
    }
}

/// How a call to [`crate::handler::FormHandler::submit`] ended.
#[derive(Debug)]
pub enum SubmitOutcome {
    /// The server's data was rendered and the download link enabled.
    Rendered(DisplayState),
    /// The server returned a non-success status.
    Rejected { status: u16 },
    /// The request or its decoding failed.
    Failed(FormError),
    /// Another submission was in flight and the guard is `SingleFlight`.
    Busy,
}

impl SubmitOutcome {
    pub fn is_rendered(&self) -> bool {
        matches!(self, SubmitOutcome::Rendered(_))
    }

    /// Short machine-readable label, used in JSON reports.
    pub fn kind(&self) -> &'static str {
        match self {
            SubmitOutcome::Rendered(_) => "rendered",
            SubmitOutcome::Rejected { .. } => "rejected",
            SubmitOutcome::Failed(_) => "failed",
            SubmitOutcome::Busy => "busy",
        }
    }
}

/// Serialisable summary of a submission, printed by `procform --json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitReport {
    pub outcome: String,
    pub parts: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    #[serde(default)]
    pub lines: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub download_uri: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub duration_ms: u64,
}

impl SubmitReport {
    pub fn new(outcome: &SubmitOutcome, parts: &[&'static str], duration_ms: u64) -> Self {
        let mut report = Self {
            outcome: outcome.kind().to_string(),
            parts: parts.iter().map(|p| p.to_string()).collect(),
            status: None,
            lines: Vec::new(),
            download_uri: None,
            error: None,
            duration_ms,
        };
        match outcome {
            SubmitOutcome::Rendered(state) => {
                report.lines = state.lines.clone();
                report.download_uri = Some(state.download_uri());
            }
            SubmitOutcome::Rejected { status } => report.status = Some(*status),
            SubmitOutcome::Failed(e) => report.error = Some(e.to_string()),
            SubmitOutcome::Busy => {}
        }
        report
    }
}
