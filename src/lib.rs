//! # procform
//!
//! Submit a CSV file and/or free text to a `/process-data` endpoint and
//! render the answer: one paragraph per returned record, plus the raw result
//! as a downloadable `text/plain` payload.
//!
//! ## Flow
//!
//! ```text
//! FormView (injected)
//!  │
//!  ├─ 1. Read     optional file + optional text from the view
//!  ├─ 2. Build    multipart body: csv_file, text_input (only parts present)
//!  ├─ 3. POST     {server}/process-data, exactly once
//!  ├─ 4. Render   2xx → paragraphs + data: URI download link
//!  │              non-2xx → "No data provided"
//!  │              transport/decode failure → its own message
//!  └─ 5. Reset    clears inputs, display, hides the link
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use procform::ui::memory::MemoryView;
//! use procform::{ClientConfig, FormHandler, SubmitOutcome};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let ui = MemoryView::new();
//!     ui.text_input.set("Ivan Ivanov, 'ul. Test 10, Sofia'\nGeorgi Petrov, 'Test 10, Sofia'");
//!
//!     let config = ClientConfig::builder()
//!         .server_url("http://127.0.0.1:8000")
//!         .build()?;
//!     let handler = FormHandler::new(ui.view(), config)?;
//!
//!     if let SubmitOutcome::Rendered(state) = handler.submit().await {
//!         for line in &state.lines {
//!             println!("{line}");
//!         }
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `procform` binary (clap + anyhow + tracing-subscriber + indicatif) |

// ── Modules ──────────────────────────────────────────────────────────────

pub mod config;
pub mod error;
pub mod handler;
pub mod pipeline;
pub mod progress;
pub mod response;
pub mod ui;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::{ClientConfig, ClientConfigBuilder, SubmitGuard};
pub use error::FormError;
pub use handler::FormHandler;
pub use pipeline::download::{from_data_uri, save as save_download, to_data_uri};
pub use pipeline::render::DisplayState;
pub use pipeline::submission::{FileUpload, Submission};
pub use pipeline::transport::{HttpTransport, Transport};
pub use progress::{NoopProgressCallback, ProgressCallback, SubmitProgressCallback};
pub use response::{ProcessedPayload, ServerResponse, SubmitOutcome, SubmitReport};
pub use ui::{DownloadLink, FileInput, FormView, ResultDisplay, TextInput};
