//! Error types for the Answerer

use thiserror::Error;

/// Errors that stop a question before the model is consulted
///
/// Model faults are not errors: they become the answer text.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnswerError {
    /// The document has no extracted text to ground an answer on
    #[error("No text content found in this document")]
    NoContent,
}
