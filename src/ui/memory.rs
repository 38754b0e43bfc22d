//! In-memory view regions.

use super::{DownloadLink, FileInput, FormView, ResultDisplay, TextInput};
use crate::pipeline::submission::FileUpload;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[derive(Debug, Default)]
pub struct MemoryFileInput {
    selected: Mutex<Option<FileUpload>>,
}

impl MemoryFileInput {
    pub fn select(&self, file: FileUpload) {
        *lock(&self.selected) = Some(file);
    }
}

impl FileInput for MemoryFileInput {
    fn selected(&self) -> Option<FileUpload> {
        lock(&self.selected).clone()
    }

    fn clear(&self) {
        *lock(&self.selected) = None;
    }
}

#[derive(Debug, Default)]
pub struct MemoryTextInput {
    value: Mutex<String>,
}

impl MemoryTextInput {
    pub fn set(&self, value: impl Into<String>) {
        *lock(&self.value) = value.into();
    }
}

impl TextInput for MemoryTextInput {
    fn value(&self) -> String {
        lock(&self.value).clone()
    }

    fn clear(&self) {
        lock(&self.value).clear();
    }
}

/// What a [`MemoryResultDisplay`] currently shows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DisplayContent {
    #[default]
    Empty,
    Paragraphs(Vec<String>),
    Text(String),
}

#[derive(Debug, Default)]
pub struct MemoryResultDisplay {
    content: Mutex<DisplayContent>,
}

impl MemoryResultDisplay {
    pub fn content(&self) -> DisplayContent {
        lock(&self.content).clone()
    }
}

impl ResultDisplay for MemoryResultDisplay {
    fn show_paragraphs(&self, lines: &[String]) {
        *lock(&self.content) = DisplayContent::Paragraphs(lines.to_vec());
    }

    fn show_text(&self, text: &str) {
        *lock(&self.content) = DisplayContent::Text(text.to_string());
    }

    fn clear(&self) {
        *lock(&self.content) = DisplayContent::Empty;
    }
}

#[derive(Debug, Default)]
pub struct MemoryDownloadLink {
    target: Mutex<Option<String>>,
    visible: AtomicBool,
}

impl MemoryDownloadLink {
    pub fn target(&self) -> Option<String> {
        lock(&self.target).clone()
    }

    pub fn is_visible(&self) -> bool {
        self.visible.load(Ordering::SeqCst)
    }
}

impl DownloadLink for MemoryDownloadLink {
    fn set_target(&self, uri: &str) {
        *lock(&self.target) = Some(uri.to_string());
    }

    fn set_visible(&self, visible: bool) {
        self.visible.store(visible, Ordering::SeqCst);
    }
}

/// All four regions, kept as concrete types so their state can be inspected.
#[derive(Debug, Default, Clone)]
pub struct MemoryView {
    pub file_input: Arc<MemoryFileInput>,
    pub text_input: Arc<MemoryTextInput>,
    pub result_display: Arc<MemoryResultDisplay>,
    pub download_link: Arc<MemoryDownloadLink>,
}

impl MemoryView {
    pub fn new() -> Self {
        Self::default()
    }

    /// A [`FormView`] backed by these regions.
    pub fn view(&self) -> FormView {
        FormView::new(
            self.file_input.clone(),
            self.text_input.clone(),
            self.result_display.clone(),
            self.download_link.clone(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn regions_start_empty() {
        let v = MemoryView::new();
        assert!(v.file_input.selected().is_none());
        assert_eq!(v.text_input.value(), "");
        assert_eq!(v.result_display.content(), DisplayContent::Empty);
        assert!(v.download_link.target().is_none());
        assert!(!v.download_link.is_visible());
    }

    #[test]
    fn view_shares_state_with_concrete_regions() {
        let v = MemoryView::new();
        let view = v.view();
        view.result_display.show_text("hello");
        view.download_link.set_visible(true);
        assert_eq!(v.result_display.content(), DisplayContent::Text("hello".into()));
        assert!(v.download_link.is_visible());
    }

    #[test]
    fn text_and_file_clear() {
        let v = MemoryView::new();
        v.text_input.set("abc");
        v.file_input.select(FileUpload::new("a.csv", b"x".to_vec()));
        v.text_input.clear();
        v.file_input.clear();
        assert_eq!(v.text_input.value(), "");
        assert!(v.file_input.selected().is_none());
    }
}
