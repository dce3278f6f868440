//! Document module - an uploaded file and its extracted text

use crate::user::UserId;
use std::fmt;

/// Identifier of a stored document
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DocumentId(i64);

impl DocumentId {
    /// Wrap a raw row identifier
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    /// Get the raw value
    pub fn value(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A document record
///
/// `extracted_text` is `None` until the single extraction pass that follows
/// the upload has run. After that it holds whatever that pass produced, which
/// may be an empty string. It is overwritten, never appended to.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    /// Unique identifier
    pub id: DocumentId,

    /// Owner of the document
    pub user_id: UserId,

    /// Storage path of the uploaded bytes, relative to the media root
    pub file_path: String,

    /// Filename as provided by the uploader (display label)
    pub original_filename: String,

    /// Declared media type of the upload
    pub content_type: String,

    /// Size of the stored file in bytes
    pub file_size: u64,

    /// Text extracted from the file
    pub extracted_text: Option<String>,

    /// Creation timestamp (Unix epoch seconds)
    pub created_at: u64,

    /// Last modification timestamp (Unix epoch seconds)
    pub updated_at: u64,
}

impl Document {
    /// Whether the document has any non-whitespace extracted text
    pub fn has_text(&self) -> bool {
        self.extracted_text
            .as_deref()
            .is_some_and(|text| !text.trim().is_empty())
    }
}

/// Data needed to create a document record
#[derive(Debug, Clone)]
pub struct NewDocument {
    /// Owner of the document
    pub user_id: UserId,

    /// Storage path relative to the media root
    pub file_path: String,

    /// Filename as provided by the uploader
    pub original_filename: String,

    /// Declared media type
    pub content_type: String,

    /// Size in bytes
    pub file_size: u64,
}
