//! Error types for the procform library.
//!
//! A submission has three possible endings and only one of them is an error
//! in the Rust sense:
//!
//! * The server answered 2xx with a usable body: rendered success.
//! * The server answered with any other status: an ordinary
//!   [`crate::response::ServerResponse::Rejected`] value, shown to the user
//!   as the configured failure message. Not a [`FormError`].
//! * The request never produced a usable answer (connection refused,
//!   timeout, body that is not the expected JSON): a [`FormError`].
//!
//! Local failures around the submission (reading the file to upload,
//! encoding the upload, writing the download to disk, bad configuration) are
//! also [`FormError`]s.

use std::path::PathBuf;
use thiserror::Error;

/// All errors returned by the procform library.
#[derive(Debug, Error)]
pub enum FormError {
    // ── Transport errors ──────────────────────────────────────────────────
    /// The request could not be sent or the response could not be received.
    #[error("Request to '{url}' failed: {reason}\nCheck that the server is running.")]
    Transport { url: String, reason: String },

    /// The request exceeded the configured timeout.
    #[error("Request to '{url}' timed out after {secs}s\nIncrease --timeout.")]
    Timeout { url: String, secs: u64 },

    // ── Response errors ───────────────────────────────────────────────────
    /// A 2xx response whose body is not the expected JSON object.
    #[error("Malformed response from '{url}': {detail}")]
    Decode { url: String, detail: String },

    // ── Local I/O errors ──────────────────────────────────────────────────
    /// The file selected for upload could not be read.
    #[error("Failed to read input file '{path}': {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file selected for upload cannot be encoded as a multipart part.
    #[error("Cannot upload '{file_name}': {reason}")]
    InvalidUpload { file_name: String, reason: String },

    /// Could not create or write the downloaded result file.
    #[error("Failed to write output file '{path}': {source}")]
    OutputWriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A string passed as a download target is not a `data:text/plain` URI.
    #[error("Invalid data URI: {0}")]
    InvalidDataUri(String),

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl FormError {
    /// Whether this error happened on the wire rather than on the local side.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            FormError::Transport { .. } | FormError::Timeout { .. } | FormError::Decode { .. }
        )
    }
}
