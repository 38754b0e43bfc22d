//! Download payload: `processed_data` as a `data:` URI or a file on disk.
//!
//! The escape set matches JavaScript's `encodeURIComponent`: everything
//! except ASCII alphanumerics and `- _ . ! ~ * ' ( )` is percent-encoded
//! as UTF-8. Decoding the payload yields the original text exactly.

use crate::error::FormError;
use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use std::path::Path;
use tracing::debug;

/// Prefix of every download link produced by this crate.
pub const DATA_URI_PREFIX: &str = "data:text/plain;charset=utf-8,";

/// Default file name offered for the download.
pub const DEFAULT_DOWNLOAD_NAME: &str = "processed_data.txt";

const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Encode `text` as a `data:text/plain;charset=utf-8,` URI.
pub fn to_data_uri(text: &str) -> String {
    let mut uri = String::with_capacity(DATA_URI_PREFIX.len() + text.len());
    uri.push_str(DATA_URI_PREFIX);
    uri.extend(utf8_percent_encode(text, URI_COMPONENT));
    uri
}

/// Recover the text from a URI produced by [`to_data_uri`].
pub fn from_data_uri(uri: &str) -> Result<String, FormError> {
    let payload = uri.strip_prefix(DATA_URI_PREFIX).ok_or_else(|| {
        FormError::InvalidDataUri(format!("expected prefix '{DATA_URI_PREFIX}'"))
    })?;
    percent_decode_str(payload)
        .decode_utf8()
        .map(|s| s.into_owned())
        .map_err(|e| FormError::InvalidDataUri(format!("payload is not UTF-8: {e}")))
}

/// Write the download payload to `path`.
///
/// Uses atomic write (temp file + rename) to prevent partial files.
pub async fn save(text: &str, path: impl AsRef<Path>) -> Result<(), FormError> {
    let path = path.as_ref();
    let write_err = |e: std::io::Error| FormError::OutputWriteFailed {
        path: path.to_path_buf(),
        source: e,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await.map_err(write_err)?;
    }

    let tmp_path = path.with_extension("tmp");
    tokio::fs::write(&tmp_path, text.as_bytes())
        .await
        .map_err(write_err)?;
    tokio::fs::rename(&tmp_path, path).await.map_err(write_err)?;

    debug!("Saved {} bytes to {}", text.len(), path.display());
    Ok(())
}
