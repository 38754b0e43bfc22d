//! The view the handler drives: two inputs and two output regions.
//!
//! Each region is a small `Send + Sync` trait. The handler receives all four
//! in a [`FormView`] at construction time, so any front end (terminal,
//! web-sys DOM, GUI toolkit, test double) can be plugged in without the
//! handler looking anything up globally.
//!
//! [`memory`] holds in-memory implementations used by the tests and
//! handy for headless embedding.

pub mod memory;

use crate::pipeline::submission::FileUpload;
use std::sync::Arc;

/// The file picker.
pub trait FileInput: Send + Sync {
    /// The currently selected file, if any.
    fn selected(&self) -> Option<FileUpload>;
    /// Drop the selection.
    fn clear(&self);
}

/// The free-text field.
pub trait TextInput: Send + Sync {
    fn value(&self) -> String;
    fn clear(&self);
}

/// The region where results or messages are shown.
pub trait ResultDisplay: Send + Sync {
    /// Replace the content with one paragraph per line.
    fn show_paragraphs(&self, lines: &[String]);
    /// Replace the content with a plain text message.
    fn show_text(&self, text: &str);
    /// Remove all content.
    fn clear(&self);
}

/// The download affordance.
pub trait DownloadLink: Send + Sync {
    /// Point the link at a new target URI.
    fn set_target(&self, uri: &str);
    fn set_visible(&self, visible: bool);
}

/// References to every region the handler reads or writes.
#[derive(Clone)]
pub struct FormView {
    pub file_input: Arc<dyn FileInput>,
    pub text_input: Arc<dyn TextInput>,
    pub result_display: Arc<dyn ResultDisplay>,
    pub download_link: Arc<dyn DownloadLink>,
}

impl FormView {
    pub fn new(
        file_input: Arc<dyn FileInput>,
        text_input: Arc<dyn TextInput>,
        result_display: Arc<dyn ResultDisplay>,
        download_link: Arc<dyn DownloadLink>,
    ) -> Self {
        Self {
            file_input,
            text_input,
            result_display,
            download_link,
        }
    }
}

impl std::fmt::Debug for FormView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FormView").finish_non_exhaustive()
    }
}
