//! Submission assembly: collect the optional inputs into a multipart body.
//!
//! The form has exactly two optional parts, `csv_file` and `text_input`.
//! A part is included only when its input is present; a submission with
//! neither part is still sent and the server decides what to do with it.

use crate::error::FormError;
use reqwest::multipart::{Form, Part};
use std::path::Path;
use tracing::debug;

/// Multipart field name for the uploaded file.
pub const FILE_FIELD: &str = "csv_file";

/// Multipart field name for the free-text input.
pub const TEXT_FIELD: &str = "text_input";

/// A file picked by the user, held in memory for the duration of one submit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileUpload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl FileUpload {
    pub fn new(file_name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        let file_name = file_name.into();
        let content_type = content_type_for(&file_name).to_string();
        Self {
            file_name,
            content_type,
            bytes: bytes.into(),
        }
    }

    /// Read a file from disk. Only the final path component is sent as the name.
    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self, FormError> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| FormError::FileRead {
                path: path.to_path_buf(),
                source: e,
            })?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload.csv".to_string());
        debug!("Loaded {} ({} bytes)", path.display(), bytes.len());
        Ok(Self::new(name, bytes))
    }
}

/// One submit event's worth of input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Submission {
    pub file: Option<FileUpload>,
    pub text: Option<String>,
}

impl Submission {
    /// Build a submission from raw input values.
    ///
    /// An empty text value counts as absent. A selected file counts as
    /// present even when it is empty.
    pub fn from_inputs(file: Option<FileUpload>, text: Option<String>) -> Self {
        Self {
            file,
            text: text.filter(|t| !t.is_empty()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.file.is_none() && self.text.is_none()
    }

    /// Names of the parts this submission will send, in body order.
    pub fn part_names(&self) -> Vec<&'static str> {
        let mut names = Vec::with_capacity(2);
        if self.file.is_some() {
            names.push(FILE_FIELD);
        }
        if self.text.is_some() {
            names.push(TEXT_FIELD);
        }
        names
    }

    /// Convert into a `reqwest` multipart form.
    pub fn into_form(self) -> Result<Form, FormError> {
        let mut form = Form::new();
        if let Some(file) = self.file {
            let part = Part::bytes(file.bytes)
                .file_name(file.file_name.clone())
                .mime_str(&file.content_type)
                .map_err(|e| FormError::InvalidUpload {
                    file_name: file.file_name,
                    reason: format!("content type '{}': {e}", file.content_type),
                })?;
            form = form.part(FILE_FIELD, part);
        }
        if let Some(text) = self.text {
            form = form.text(TEXT_FIELD, text);
        }
        Ok(form)
    }
}

/// Best-effort content type from the file extension.
fn content_type_for(file_name: &str) -> &'static str {
    let ext = Path::new(file_name)
        .extension()
        .map(|e| e.to_string_lossy().to_ascii_lowercase());
    match ext.as_deref() {
        Some("csv") => "text/csv",
        Some("txt") => "text/plain",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn empty_text_counts_as_absent() {
        let s = Submission::from_inputs(None, Some(String::new()));
        assert!(s.is_empty());
        assert!(s.part_names().is_empty());
    }

    #[test]
    fn empty_file_still_counts() {
        let s = Submission::from_inputs(Some(FileUpload::new("a.csv", Vec::new())), None);
        assert!(!s.is_empty());
        assert_eq!(s.part_names(), vec![FILE_FIELD]);
    }

    #[test]
    fn both_parts_in_order() {
        let s = Submission::from_inputs(
            Some(FileUpload::new("people.csv", b"Name,Address\n".to_vec())),
            Some("Ivan, 'Sofia'".into()),
        );
        assert_eq!(s.part_names(), vec!["csv_file", "text_input"]);
        assert!(s.into_form().is_ok());
    }

    #[test]
    fn content_type_by_extension() {
        assert_eq!(content_type_for("x.CSV"), "text/csv");
        assert_eq!(content_type_for("notes.txt"), "text/plain");
        assert_eq!(content_type_for("blob"), "application/octet-stream");
    }

    #[test]
    fn unparsable_content_type_is_upload_error() {
        let mut upload = FileUpload::new("people.csv", b"a".to_vec());
        upload.content_type = "csv".into();
        let err = Submission::from_inputs(Some(upload), None)
            .into_form()
            .unwrap_err();
        match err {
            FormError::InvalidUpload { file_name, reason } => {
                assert_eq!(file_name, "people.csv");
                assert!(reason.contains("'csv'"), "got: {reason}");
            }
            other => panic!("expected upload error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn from_path_reads_bytes_and_name() {
        let mut tmp = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        tmp.write_all(b"Name,Address\nA,'B'\n").unwrap();
        let upload = FileUpload::from_path(tmp.path()).await.unwrap();
        assert_eq!(upload.bytes, b"Name,Address\nA,'B'\n");
        assert!(upload.file_name.ends_with(".csv"));
        assert_eq!(upload.content_type, "text/csv");
    }

    #[tokio::test]
    async fn from_path_missing_file() {
        let err = FileUpload::from_path("/definitely/not/here.csv")
            .await
            .unwrap_err();
        assert!(matches!(err, FormError::FileRead { .. }));
    }
}
