//! File metadata and the upload validator.
//!
//! Validation only looks at what the browser declares for a file (its size
//! and MIME type). The bytes are never sniffed.

use std::rc::Rc;

use crate::constants::upload::{ALLOWED_MIME_TYPES, MAX_FILE_SIZE};
use crate::error::ValidationError;

/// What the browser tells us about a file before it is read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileMeta {
    /// File name without any path
    pub name: String,
    /// Declared MIME type (may be empty)
    pub mime: String,
    /// Declared size in bytes
    pub size: u64,
}

impl FileMeta {
    pub fn new(name: impl Into<String>, mime: impl Into<String>, size: u64) -> Self {
        Self {
            name: name.into(),
            mime: mime.into(),
            size,
        }
    }
}

/// A selected file whose bytes have been read into memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    pub meta: FileMeta,
    /// Shared so retries and pending requests don't copy the payload
    pub bytes: Rc<[u8]>,
}

impl SourceFile {
    pub fn new(meta: FileMeta, bytes: impl Into<Rc<[u8]>>) -> Self {
        Self {
            meta,
            bytes: bytes.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.meta.name
    }

    pub fn mime(&self) -> &str {
        &self.meta.mime
    }
}

/// Check a file against the upload limits. Size is checked first.
pub fn validate(meta: &FileMeta) -> Result<(), ValidationError> {
    if meta.size > MAX_FILE_SIZE {
        return Err(ValidationError::TooLarge { size: meta.size });
    }

    if !is_allowed_mime(&meta.mime) {
        return Err(ValidationError::UnsupportedType {
            mime: meta.mime.clone(),
        });
    }

    Ok(())
}

fn is_allowed_mime(mime: &str) -> bool {
    ALLOWED_MIME_TYPES
        .iter()
        .any(|allowed| allowed.eq_ignore_ascii_case(mime))
}
