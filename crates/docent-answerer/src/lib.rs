//! Docent Answerer
//!
//! Answers a natural-language question about one document, grounded on the
//! text extracted from it at upload time.
//!
//! # Guards
//!
//! 1. Blank extracted text fails with [`AnswerError::NoContent`]; the model is
//!    never called.
//! 2. With no model configured the answer is [`NOT_CONFIGURED_MESSAGE`].
//! 3. A failing model call produces an answer starting with
//!    [`UNAVAILABLE_PREFIX`] followed by the fault.
//!
//! Only the first [`MAX_CONTEXT_CHARS`] characters of the text reach the
//! model.
//!
//! # Example Usage
//!
//! ```
//! use docent_answerer::Answerer;
//! use docent_llm::MockProvider;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let answerer = Answerer::with_provider(MockProvider::new("Blue."));
//! let answer = answerer
//!     .answer("The sky is blue.", "What color is the sky?", "sky.pdf")
//!     .await?;
//! assert_eq!(answer.answer, "Blue.");
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod answerer;
mod error;
mod prompt;

pub use answerer::{Answerer, NOT_CONFIGURED_MESSAGE, UNAVAILABLE_PREFIX};
pub use error::AnswerError;
pub use prompt::{truncate_chars, PromptBuilder, MAX_CONTEXT_CHARS};
