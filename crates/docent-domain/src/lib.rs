//! Docent Domain Layer
//!
//! This crate contains the domain model for Docent, a document portal that
//! extracts text from uploaded files and answers questions grounded on it.
//! It has no external dependencies and defines the value objects and trait
//! interfaces that all other layers depend upon.
//!
//! ## Key Concepts
//!
//! - **Document**: An uploaded file owned by exactly one user, plus the text
//!   extracted from it right after upload
//! - **MediaKind**: The extraction strategy a declared media type selects
//! - **Question / Answer**: One grounded question against one document
//!
//! ## Architecture
//!
//! - No external crate dependencies
//! - Infrastructure implementations live in other crates
//! - Trait definitions for all external interactions

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod document;
pub mod media;
pub mod qa;
pub mod traits;
pub mod user;

// Re-exports for convenience
pub use document::{Document, DocumentId, NewDocument};
pub use media::MediaKind;
pub use qa::{Answer, Question, MAX_QUESTION_CHARS};
pub use user::{NewUser, User, UserId};
