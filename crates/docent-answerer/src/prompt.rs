//! Grounded question prompt

/// Number of characters of extracted text sent to the model
///
/// Text beyond this point is never seen by the model.
pub const MAX_CONTEXT_CHARS: usize = 4000;

const GROUNDING_INSTRUCTIONS: &str = "You are a document assistant. Answer the question using ONLY \
the document content below. Do not use outside knowledge or make anything up. If the answer is \
not in the document, say that the document does not contain it. Keep the answer clear and to \
the point.";

/// Builds the prompt for one question against one document
pub struct PromptBuilder<'a> {
    context: &'a str,
    question: &'a str,
}

impl<'a> PromptBuilder<'a> {
    /// Create a prompt builder; `extracted_text` is cut to [`MAX_CONTEXT_CHARS`]
    pub fn new(extracted_text: &'a str, question: &'a str) -> Self {
        Self {
            context: truncate_chars(extracted_text, MAX_CONTEXT_CHARS),
            question,
        }
    }

    /// The document content the model will see
    pub fn context(&self) -> &str {
        self.context
    }

    /// Build the complete prompt
    pub fn build(&self) -> String {
        let mut prompt = String::with_capacity(self.context.len() + self.question.len() + 512);

        prompt.push_str(GROUNDING_INSTRUCTIONS);
        prompt.push_str("\n\n");

        prompt.push_str("Document content:\n");
        prompt.push_str("---\n");
        prompt.push_str(self.context);
        prompt.push_str("\n---\n\n");

        prompt.push_str("Question: \"");
        prompt.push_str(self.question);
        prompt.push_str("\"\n\nAnswer:");

        prompt
    }
}

/// First `max_chars` characters of `text`, never splitting a character
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => &text[..byte_idx],
        None => text,
    }
}
