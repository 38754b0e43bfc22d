//! Pipeline stages for one form submission.
//!
//! Each submodule implements exactly one step, so each can be tested on its
//! own and the network step can be replaced without touching the others.
//!
//! ## Data Flow
//!
//! ```text
//! submission ──▶ transport ──▶ render ──▶ download
//! (multipart)    (POST)        (<p>…)     (data: URI / file)
//! ```
//!
//! 1. [`submission`] — gather the optional file and text into a multipart form
//! 2. [`transport`]  — send it and classify the answer; the only stage with
//!    network I/O
//! 3. [`render`]     — split `processed_data` into display paragraphs
//! 4. [`download`]   — encode `processed_data` as a `data:text/plain` URI or
//!    save it to disk

pub mod download;
pub mod render;
pub mod submission;
pub mod transport;
