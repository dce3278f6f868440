//! Question and answer value objects

use crate::document::DocumentId;

/// Maximum question length accepted by the inbound layer (characters)
pub const MAX_QUESTION_CHARS: usize = 1000;

/// A question about one document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    /// Document the question is asked against
    pub document_id: DocumentId,
    /// Free-text question
    pub text: String,
}

impl Question {
    /// Create a question, checking the inbound length limit
    pub fn new(document_id: DocumentId, text: impl Into<String>) -> Result<Self, String> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err("question must not be empty".to_string());
        }
        let chars = text.chars().count();
        if chars > MAX_QUESTION_CHARS {
            return Err(format!(
                "Ensure this field has no more than {} characters (it has {}).",
                MAX_QUESTION_CHARS, chars
            ));
        }
        Ok(Self { document_id, text })
    }
}

/// The result of asking a question
///
/// `answer` is either the model output or an explanatory degraded-service
/// message. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Answer {
    /// The question as asked
    pub question: String,
    /// Generated answer text or degraded-service message
    pub answer: String,
    /// Display label of the source document
    pub document: String,
}
