//! Question answering endpoint

use super::{AppError, AppState};
use crate::auth::AuthUser;
use axum::{extract::State, Json};
use docent_answerer::AnswerError;
use docent_domain::traits::DocumentStore;
use docent_domain::{Answer, DocumentId, Question};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Ask request
///
/// `document_id` is accepted as a number or a numeric string.
#[derive(Debug, Deserialize)]
pub struct AskRequest {
    #[serde(default)]
    document_id: Option<Value>,
    #[serde(default)]
    question: Option<String>,
}

/// Ask response
#[derive(Debug, Serialize, Deserialize)]
pub struct AskResponse {
    /// The question as asked
    pub question: String,
    /// Model answer or degraded-service message
    pub answer: String,
    /// Display filename of the document
    pub document: String,
}

impl From<Answer> for AskResponse {
    fn from(answer: Answer) -> Self {
        Self {
            question: answer.question,
            answer: answer.answer,
            document: answer.document,
        }
    }
}

fn required() -> AppError {
    AppError::BadRequest("Document ID and question are required".to_string())
}

fn parse_document_id(value: Option<Value>) -> Result<DocumentId, AppError> {
    let id = match value {
        None | Some(Value::Null) => return Err(required()),
        Some(Value::Number(n)) => n.as_i64(),
        Some(Value::String(s)) if s.trim().is_empty() => return Err(required()),
        Some(Value::String(s)) => s.trim().parse::<i64>().ok(),
        Some(_) => None,
    };

    match id {
        Some(0) => Err(required()),
        Some(id) => Ok(DocumentId::new(id)),
        None => Err(AppError::BadRequest("A valid integer is required.".to_string())),
    }
}

/// POST /api/ask/ - Answer a question grounded on one of the caller's documents
pub async fn ask_question(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(request): Json<AskRequest>,
) -> Result<Json<AskResponse>, AppError> {
    let question_text = request.question.unwrap_or_default();
    if question_text.trim().is_empty() {
        return Err(required());
    }
    let document_id = parse_document_id(request.document_id)?;
    let question = Question::new(document_id, question_text).map_err(AppError::BadRequest)?;

    let doc = state
        .store()?
        .get_document(user_id, question.document_id)?
        .ok_or_else(|| AppError::NotFound("Document not found".to_string()))?;

    let text = doc.extracted_text.unwrap_or_default();
    let answer = state
        .answerer
        .answer(&text, &question.text, &doc.original_filename)
        .await
        .map_err(|e| match e {
            AnswerError::NoContent => AppError::BadRequest(e.to_string()),
        })?;

    Ok(Json(AskResponse::from(answer)))
}
