//! Rendering: turn `processed_data` into display paragraphs.
//!
//! Each `\n`-separated record becomes one paragraph. Inside a record the
//! tokens are split on `", "` and joined back with `", "`. For well-formed
//! server output that is an identity step; it is kept so the display goes
//! through the same tokenisation the download consumer sees.
//!
//! The empty string renders as a single empty paragraph, the same as
//! `"".split('\n')` yielding one empty record.

use crate::pipeline::download;
use serde::{Deserialize, Serialize};

/// Separator between names inside one record.
pub const TOKEN_SEPARATOR: &str = ", ";

/// Separator between records.
pub const RECORD_SEPARATOR: char = '\n';

/// Everything the view shows after a successful submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayState {
    /// One entry per paragraph, in server order.
    pub lines: Vec<String>,
    /// The unmodified server text backing the download link.
    pub processed_data: String,
}

impl DisplayState {
    pub fn from_processed(processed_data: impl Into<String>) -> Self {
        let processed_data = processed_data.into();
        Self {
            lines: render_lines(&processed_data),
            processed_data,
        }
    }

    /// `data:text/plain` URI carrying `processed_data` byte-for-byte.
    pub fn download_uri(&self) -> String {
        download::to_data_uri(&self.processed_data)
    }

    /// Paragraph markup, one `<p>` per line, text HTML-escaped.
    pub fn to_html(&self) -> String {
        self.lines
            .iter()
            .map(|l| format!("<p>{}</p>", escape_html(l)))
            .collect()
    }
}

/// Split `processed_data` into display lines.
pub fn render_lines(processed_data: &str) -> Vec<String> {
    processed_data
        .split(RECORD_SEPARATOR)
        .map(format_record)
        .collect()
}

/// Split one record on `", "` and rejoin it.
pub fn format_record(record: &str) -> String {
    record
        .split(TOKEN_SEPARATOR)
        .collect::<Vec<_>>()
        .join(TOKEN_SEPARATOR)
}

fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn two_records_two_paragraphs_in_order() {
        assert_eq!(render_lines("a, b\nc, d"), vec!["a, b", "c, d"]);
    }

    #[test]
    fn empty_input_is_one_empty_paragraph() {
        assert_eq!(render_lines(""), vec![String::new()]);
        assert_eq!(DisplayState::from_processed("").to_html(), "<p></p>");
    }

    #[test]
    fn trailing_newline_yields_trailing_empty_paragraph() {
        assert_eq!(render_lines("a\n"), vec!["a", ""]);
    }

    #[test]
    fn other_separators_pass_through() {
        assert_eq!(format_record("a,b;c"), "a,b;c");
        assert_eq!(format_record("a,  b"), "a,  b");
        assert_eq!(format_record("Georgi Petrov, Ivan Ivanov"), "Georgi Petrov, Ivan Ivanov");
    }

    #[test]
    fn carriage_returns_are_kept() {
        assert_eq!(render_lines("a\r\nb"), vec!["a\r", "b"]);
    }

    #[test]
    fn html_is_escaped() {
        let state = DisplayState::from_processed("<b>Ivan</b>, O'Neil & Co");
        assert_eq!(
            state.to_html(),
            "<p>&lt;b&gt;Ivan&lt;/b&gt;, O&#39;Neil &amp; Co</p>"
        );
    }

    #[test]
    fn state_keeps_raw_text() {
        let raw = "Georgi Petrov, Ivan Ivanov\nMaria Ivanova";
        let state = DisplayState::from_processed(raw);
        assert_eq!(state.processed_data, raw);
        assert_eq!(state.lines.len(), 2);
    }
}
