//! The form handler: submit and reset.
//!
//! ```text
//! view inputs ──▶ Submission ──▶ Transport ──▶ ServerResponse ──▶ view outputs
//!  (file, text)   (multipart)    (POST)        (2xx / other)      (display, link)
//! ```
//!
//! `submit` updates the view for all three endings:
//!
//! | Ending | Result display | Download link |
//! |--------|----------------|---------------|
//! | 2xx | one paragraph per record | new target, shown |
//! | non-2xx | `failure_message` | untouched |
//! | transport/decode error | `transport_failure_message` | untouched |
//! | local error (unencodable upload) | the error text | untouched |
//!
//! `reset` clears both inputs and the display and hides the link.

use crate::config::{ClientConfig, SubmitGuard};
use crate::error::FormError;
use crate::pipeline::render::DisplayState;
use crate::pipeline::submission::Submission;
use crate::pipeline::transport::{HttpTransport, Transport};
use crate::response::{ServerResponse, SubmitOutcome};
use crate::ui::FormView;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, info, warn};

/// Drives a [`FormView`] against a [`Transport`].
///
/// `submit` takes `&self`, so one handler can serve overlapping submissions;
/// [`SubmitGuard`] in the config decides what happens when it does.
pub struct FormHandler<T: Transport = HttpTransport> {
    view: FormView,
    transport: T,
    config: ClientConfig,
    in_flight: AtomicBool,
}

impl FormHandler<HttpTransport> {
    /// Handler posting over HTTP to `config.endpoint_url()`.
    pub fn new(view: FormView, config: ClientConfig) -> Result<Self, FormError> {
        let transport = HttpTransport::new(&config)?;
        Ok(Self::with_transport(view, transport, config))
    }
}

impl<T: Transport> FormHandler<T> {
    /// Handler over any [`Transport`], e.g. a scripted one in tests.
    pub fn with_transport(view: FormView, transport: T, config: ClientConfig) -> Self {
        Self {
            view,
            transport,
            config,
            in_flight: AtomicBool::new(false),
        }
    }

    /// The configuration this handler was built with.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Whether a submission is waiting for its response.
    ///
    /// Only tracked under [`SubmitGuard::SingleFlight`].
    pub fn is_busy(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst)
    }

    /// Part names the next `submit` would send, given the current inputs.
    pub fn pending_parts(&self) -> Vec<&'static str> {
        self.read_submission().part_names()
    }

    /// Submit the current inputs and render the answer.
    pub async fn submit(&self) -> SubmitOutcome {
        let _flight = match self.config.submit_guard {
            SubmitGuard::Race => None,
            SubmitGuard::SingleFlight => match InFlight::acquire(&self.in_flight) {
                Some(flight) => Some(flight),
                None => {
                    debug!("Submit ignored: a request is already in flight");
                    return SubmitOutcome::Busy;
                }
            },
        };

        let submission = self.read_submission();
        let parts = submission.part_names();
        if submission.is_empty() {
            debug!("Submitting with no file and no text");
        }
        if let Some(ref cb) = self.config.progress_callback {
            cb.on_submit_start(&parts);
        }

        match self.transport.send(submission).await {
            Ok(response) => {
                if let Some(ref cb) = self.config.progress_callback {
                    cb.on_response(response.status());
                }
                self.apply_response(response)
            }
            Err(e) => {
                warn!("Submission failed: {}", e);
                if e.is_transport() {
                    self.view
                        .result_display
                        .show_text(&self.config.transport_failure_message);
                } else {
                    self.view.result_display.show_text(&e.to_string());
                }
                if let Some(ref cb) = self.config.progress_callback {
                    cb.on_failed(e.to_string());
                }
                SubmitOutcome::Failed(e)
            }
        }
    }

    /// Clear every region and hide the download link. Idempotent.
    pub fn reset(&self) {
        self.view.file_input.clear();
        self.view.text_input.clear();
        self.view.result_display.clear();
        self.view.download_link.set_visible(false);
        debug!("Form reset");
        if let Some(ref cb) = self.config.progress_callback {
            cb.on_reset();
        }
    }

    fn read_submission(&self) -> Submission {
        Submission::from_inputs(
            self.view.file_input.selected(),
            Some(self.view.text_input.value()),
        )
    }

    fn apply_response(&self, response: ServerResponse) -> SubmitOutcome {
        match response {
            ServerResponse::Success { processed_data, .. } => {
                let state = DisplayState::from_processed(processed_data);
                self.view.result_display.show_paragraphs(&state.lines);
                self.view.download_link.set_target(&state.download_uri());
                self.view.download_link.set_visible(true);
                info!("Rendered {} lines", state.lines.len());
                if let Some(ref cb) = self.config.progress_callback {
                    cb.on_rendered(state.lines.len());
                }
                SubmitOutcome::Rendered(state)
            }
            ServerResponse::Rejected { status } => {
                // The download link keeps whatever it showed before.
                self.view
                    .result_display
                    .show_text(&self.config.failure_message);
                if let Some(ref cb) = self.config.progress_callback {
                    cb.on_failed(format!("HTTP {status}"));
                }
                SubmitOutcome::Rejected { status }
            }
        }
    }
}

/// Holds the single-flight flag; released on drop, including when the
/// submit future is cancelled.
struct InFlight<'a>(&'a AtomicBool);

impl<'a> InFlight<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .ok()
            .map(|_| InFlight(flag))
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}
