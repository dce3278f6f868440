//! Trait definitions for external interactions
//!
//! These traits define the boundaries between domain logic and infrastructure.
//! Infrastructure implementations live in other crates.

use crate::{Document, DocumentId, NewDocument, NewUser, User, UserId};
use std::path::Path;

/// Trait for storing and retrieving documents
///
/// Every read and mutation except `set_extracted_text` is scoped to an owner:
/// a document belonging to another user behaves as if it did not exist.
///
/// Implemented by the infrastructure layer (docent-store)
pub trait DocumentStore {
    /// Error type for store operations
    type Error;

    /// Create a document record (extracted text absent)
    fn insert_document(&mut self, document: NewDocument) -> Result<Document, Self::Error>;

    /// Get a document owned by `owner`
    fn get_document(&self, owner: UserId, id: DocumentId) -> Result<Option<Document>, Self::Error>;

    /// List all documents owned by `owner`, newest first
    fn list_documents(&self, owner: UserId) -> Result<Vec<Document>, Self::Error>;

    /// Record the result of the extraction pass, replacing any previous value
    fn set_extracted_text(&mut self, id: DocumentId, text: &str) -> Result<(), Self::Error>;

    /// Change the display filename of a document owned by `owner`
    fn rename_document(
        &mut self,
        owner: UserId,
        id: DocumentId,
        original_filename: &str,
    ) -> Result<Option<Document>, Self::Error>;

    /// Delete a document owned by `owner`, returning the removed record
    fn delete_document(&mut self, owner: UserId, id: DocumentId) -> Result<Option<Document>, Self::Error>;
}

/// Trait for storing user accounts
///
/// Implemented by the infrastructure layer (docent-store)
pub trait UserStore {
    /// Error type for store operations
    type Error;

    /// Create a user; fails if the username is taken
    fn create_user(&mut self, user: NewUser) -> Result<User, Self::Error>;

    /// Get a user by ID
    fn get_user(&self, id: UserId) -> Result<Option<User>, Self::Error>;

    /// Get a user by login name
    fn find_user_by_username(&self, username: &str) -> Result<Option<User>, Self::Error>;
}

/// Trait for LLM provider operations
///
/// Implemented by the infrastructure layer (docent-llm)
pub trait LlmProvider {
    /// Error type for LLM operations
    type Error;

    /// Generate text completion for a single prompt
    fn generate(&self, prompt: &str) -> Result<String, Self::Error>;
}

/// Trait for pulling plain text out of an uploaded file
///
/// Implementations never fail outward: any internal fault degrades to an
/// empty string.
///
/// Implemented by the application layer (docent-extractor)
pub trait TextExtractor {
    /// Extract text from the file at `path`, dispatching on `media_type`
    fn extract(&self, path: &Path, media_type: &str) -> String;
}
