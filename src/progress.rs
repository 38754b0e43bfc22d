//! Progress-callback trait for submission events.
//!
//! Inject an [`Arc<dyn SubmitProgressCallback>`] via
//! [`crate::config::ClientConfigBuilder::progress_callback`] to observe a
//! submission while it is in flight. The CLI uses this to drive a spinner;
//! library users can forward the events to their own UI or logs.
//!
//! # Example
//!
//! ```rust
//! use procform::{ClientConfig, SubmitProgressCallback};
//! use std::sync::{Arc, atomic::{AtomicUsize, Ordering}};
//!
//! struct CountingCallback {
//!     rendered: AtomicUsize,
//! }
//!
//! impl SubmitProgressCallback for CountingCallback {
//!     fn on_rendered(&self, lines: usize) {
//!         self.rendered.fetch_add(lines, Ordering::SeqCst);
//!     }
//! }
//!
//! let cb = Arc::new(CountingCallback { rendered: AtomicUsize::new(0) });
//!
//! let config = ClientConfig::builder()
//!     .progress_callback(cb as Arc<dyn SubmitProgressCallback>)
//!     .build()
//!     .unwrap();
//! ```

use std::sync::Arc;

/// Called by [`crate::handler::FormHandler`] as a submission progresses.
///
/// Implementations must be `Send + Sync`: with
/// [`crate::config::SubmitGuard::Race`] two submissions may report at the
/// same time. All methods default to no-ops.
pub trait SubmitProgressCallback: Send + Sync {
    /// Called right before the request is sent.
    ///
    /// # Arguments
    /// * `parts` — names of the multipart parts being sent
    fn on_submit_start(&self, parts: &[&'static str]) {
        let _ = parts;
    }

    /// Called once the response status line has arrived.
    fn on_response(&self, status: u16) {
        let _ = status;
    }

    /// Called after a successful response has been rendered.
    ///
    /// # Arguments
    /// * `lines` — number of paragraphs written to the result display
    fn on_rendered(&self, lines: usize) {
        let _ = lines;
    }

    /// Called when the submission ends without a rendered result
    /// (rejected status or transport failure).
    fn on_failed(&self, message: String) {
        let _ = message;
    }

    /// Called after the reset handler has cleared the view.
    fn on_reset(&self) {}
}

/// Type alias for a shared, heap-allocated progress callback.
pub type ProgressCallback = Arc<dyn SubmitProgressCallback>;

/// A no-op implementation, for callers that need a concrete value.
pub struct NoopProgressCallback;

impl SubmitProgressCallback for NoopProgressCallback {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    struct Recorder {
        starts: AtomicUsize,
        failures: Mutex<Vec<String>>,
    }

    impl SubmitProgressCallback for Recorder {
        fn on_submit_start(&self, _parts: &[&'static str]) {
            self.starts.fetch_add(1, Ordering::SeqCst);
        }

        fn on_failed(&self, message: String) {
            self.failures.lock().unwrap().push(message);
        }
    }

    #[test]
    fn default_methods_are_noops() {
        let cb = NoopProgressCallback;
        cb.on_submit_start(&["text_input"]);
        cb.on_response(200);
        cb.on_rendered(3);
        cb.on_failed("x".into());
        cb.on_reset();
    }

    #[test]
    fn overridden_methods_are_called_through_arc() {
        let rec = Arc::new(Recorder {
            starts: AtomicUsize::new(0),
            failures: Mutex::new(Vec::new()),
        });
        let cb: ProgressCallback = rec.clone();
        cb.on_submit_start(&[]);
        cb.on_failed("No data provided".into());
        assert_eq!(rec.starts.load(Ordering::SeqCst), 1);
        assert_eq!(rec.failures.lock().unwrap().as_slice(), ["No data provided"]);
    }
}
