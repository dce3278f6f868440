//! Core Answerer implementation

use crate::error::AnswerError;
use crate::prompt::PromptBuilder;
use docent_domain::traits::LlmProvider;
use docent_domain::Answer;
use std::fmt::Display;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Answer text when no model is configured
pub const NOT_CONFIGURED_MESSAGE: &str =
    "AI service is not configured. Please contact the administrator.";

/// Prefix of the answer text when the model call fails
pub const UNAVAILABLE_PREFIX: &str = "AI service temporarily unavailable. Error: ";

/// Answers questions grounded on a document's extracted text
///
/// Holds an optional model: `None` means the service is not configured and
/// every question gets [`NOT_CONFIGURED_MESSAGE`] without a model call.
pub struct Answerer<P: ?Sized> {
    provider: Option<Arc<P>>,
}

impl<P> Answerer<P>
where
    P: LlmProvider + Send + Sync + 'static,
    P::Error: Display,
{
    /// Create an Answerer owning a configured provider
    pub fn with_provider(provider: P) -> Self {
        Self {
            provider: Some(Arc::new(provider)),
        }
    }
}

impl<P> Answerer<P>
where
    P: ?Sized + LlmProvider + Send + Sync + 'static,
    P::Error: Display,
{
    /// Create an Answerer from an optional shared provider
    pub fn new(provider: Option<Arc<P>>) -> Self {
        Self { provider }
    }

    /// Create an Answerer with no model
    pub fn unconfigured() -> Self {
        Self { provider: None }
    }

    /// Whether a model is available
    pub fn is_configured(&self) -> bool {
        self.provider.is_some()
    }

    /// Answer `question` using `extracted_text` as the only context
    ///
    /// Fails only when there is no text to ground on. A missing or failing
    /// model still produces an [`Answer`] whose text explains the problem.
    pub async fn answer(
        &self,
        extracted_text: &str,
        question: &str,
        document_label: &str,
    ) -> Result<Answer, AnswerError> {
        if extracted_text.trim().is_empty() {
            return Err(AnswerError::NoContent);
        }

        let answer = match &self.provider {
            None => {
                warn!("Question for '{}' received but no model is configured", document_label);
                NOT_CONFIGURED_MESSAGE.to_string()
            }
            Some(provider) => {
                let prompt = PromptBuilder::new(extracted_text, question).build();
                debug!("Prompt length: {} chars", prompt.chars().count());

                match Self::call_llm(Arc::clone(provider), prompt).await {
                    Ok(text) => {
                        info!("Answered question about '{}' ({} chars)", document_label, text.chars().count());
                        text
                    }
                    Err(fault) => {
                        warn!("Model call failed for '{}': {}", document_label, fault);
                        format!("{}{}", UNAVAILABLE_PREFIX, fault)
                    }
                }
            }
        };

        Ok(Answer {
            question: question.to_string(),
            answer,
            document: document_label.to_string(),
        })
    }

    async fn call_llm(provider: Arc<P>, prompt: String) -> Result<String, String> {
        // LlmProvider is synchronous
        tokio::task::spawn_blocking(move || provider.generate(&prompt).map_err(|e| e.to_string()))
            .await
            .map_err(|e| format!("Task join error: {}", e))?
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompt::MAX_CONTEXT_CHARS;
    use docent_llm::{LlmError, MockProvider};

    type DynProvider = dyn LlmProvider<Error = LlmError> + Send + Sync;

    #[tokio::test]
    async fn test_answer_from_model() {
        let mock = MockProvider::new("The sky is blue.");
        let answerer = Answerer::with_provider(mock.clone());

        let answer = answerer
            .answer("Sky color: blue.", "What color is the sky?", "sky.pdf")
            .await
            .unwrap();

        assert_eq!(answer.question, "What color is the sky?");
        assert_eq!(answer.answer, "The sky is blue.");
        assert_eq!(answer.document, "sky.pdf");
        assert_eq!(mock.call_count(), 1);

        let prompt = mock.last_prompt().unwrap();
        assert!(prompt.contains("Sky color: blue."));
        assert!(prompt.contains("What color is the sky?"));
    }

    #[tokio::test]
    async fn test_multibyte_answer_passes_through() {
        let mock = MockProvider::new("Небо синее.");
        let answerer = Answerer::with_provider(mock.clone());

        let answer = answerer
            .answer("Цвет неба: синий.", "Какого цвета небо?", "небо.pdf")
            .await
            .unwrap();

        assert_eq!(answer.answer, "Небо синее.");
        assert_eq!(answer.document, "небо.pdf");
        assert!(mock.last_prompt().unwrap().contains("Цвет неба: синий."));
    }

    #[tokio::test]
    async fn test_empty_text_is_no_content() {
        let mock = MockProvider::new("unused");
        let answerer = Answerer::with_provider(mock.clone());

        for text in ["", "   ", "\n\t\n"] {
            let result = answerer.answer(text, "Anything?", "blank.pdf").await;
            assert_eq!(result, Err(AnswerError::NoContent));
        }
        assert_eq!(mock.call_count(), 0);
    }

    #[tokio::test]
    async fn test_no_content_checked_before_configuration() {
        let answerer: Answerer<MockProvider> = Answerer::unconfigured();
        let result = answerer.answer("  ", "Anything?", "blank.pdf").await;
        assert_eq!(result, Err(AnswerError::NoContent));
    }

    #[tokio::test]
    async fn test_unconfigured_returns_fixed_message() {
        let answerer: Answerer<MockProvider> = Answerer::unconfigured();
        assert!(!answerer.is_configured());

        let answer = answerer.answer("Some text", "Question?", "doc.pdf").await.unwrap();
        assert_eq!(answer.answer, NOT_CONFIGURED_MESSAGE);
        assert_eq!(answer.document, "doc.pdf");
    }

    #[tokio::test]
    async fn test_context_truncated_to_first_4000_chars() {
        let mock = MockProvider::new("ok");
        let answerer = Answerer::with_provider(mock.clone());

        let head = "a".repeat(MAX_CONTEXT_CHARS);
        let tail = "ж".repeat(1000);
        let text = format!("{}{}", head, tail);
        assert_eq!(text.chars().count(), 5000);

        answerer.answer(&text, "Question?", "long.pdf").await.unwrap();

        let prompt = mock.last_prompt().unwrap();
        assert!(prompt.contains(&head));
        assert!(!prompt.contains('ж'));
    }

    #[tokio::test]
    async fn test_model_fault_becomes_answer_text() {
        let mock = MockProvider::failing("quota exhausted");
        let answerer = Answerer::with_provider(mock.clone());

        let answer = answerer.answer("Some text", "Question?", "doc.pdf").await.unwrap();

        assert!(answer.answer.starts_with(UNAVAILABLE_PREFIX));
        assert!(answer.answer.contains("quota exhausted"));
        assert_eq!(mock.call_count(), 1);
    }

    #[tokio::test]
    async fn test_trait_object_provider() {
        let mock = MockProvider::new("dyn works");
        let provider: Arc<DynProvider> = Arc::new(mock.clone());
        let answerer: Answerer<DynProvider> = Answerer::new(Some(provider));

        let answer = answerer.answer("text", "q", "doc.png").await.unwrap();
        assert_eq!(answer.answer, "dyn works");
        assert_eq!(mock.call_count(), 1);
    }

    #[tokio::test]
    async fn test_concurrent_questions_are_independent() {
        let mock = MockProvider::new("answer");
        let answerer = Arc::new(Answerer::with_provider(mock.clone()));

        let handles: Vec<_> = (0..4)
            .map(|i| {
                let answerer = Arc::clone(&answerer);
                tokio::spawn(async move {
                    answerer
                        .answer("shared text", &format!("question {}", i), "doc.pdf")
                        .await
                })
            })
            .collect();

        for handle in handles {
            assert_eq!(handle.await.unwrap().unwrap().answer, "answer");
        }
        assert_eq!(mock.call_count(), 4);
    }
}
