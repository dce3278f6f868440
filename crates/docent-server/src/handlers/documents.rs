//! Document upload and management endpoints

use super::{AppError, AppState};
use crate::auth::AuthUser;
use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    Json,
};
use docent_domain::media::is_accepted_media_type;
use docent_domain::traits::DocumentStore;
use docent_domain::{Document, DocumentId, NewDocument};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, info, warn};

/// Name of the multipart field carrying the upload
const FILE_FIELD: &str = "file";

/// Public view of a document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentResponse {
    /// Document ID
    pub id: i64,
    /// Display filename
    pub original_filename: String,
    /// Stored path relative to the media root
    pub file: String,
    /// Size in bytes
    pub file_size: u64,
    /// Creation time (Unix epoch seconds)
    pub created_at: u64,
    /// Last modification time (Unix epoch seconds)
    pub updated_at: u64,
}

impl From<&Document> for DocumentResponse {
    fn from(doc: &Document) -> Self {
        Self {
            id: doc.id.value(),
            original_filename: doc.original_filename.clone(),
            file: doc.file_path.clone(),
            file_size: doc.file_size,
            created_at: doc.created_at,
            updated_at: doc.updated_at,
        }
    }
}

/// Partial update of a document
#[derive(Debug, Deserialize)]
pub struct RenameRequest {
    original_filename: Option<String>,
}

struct Upload {
    filename: String,
    content_type: String,
    bytes: axum::body::Bytes,
}

async fn read_upload(multipart: &mut Multipart) -> Result<Option<Upload>, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Failed to read multipart field: {}", e)))?
    {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let filename = field.file_name().unwrap_or("upload").to_string();
        let content_type = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(format!("Failed to read file: {}", e)))?;

        return Ok(Some(Upload {
            filename,
            content_type,
            bytes,
        }));
    }

    Ok(None)
}

/// GET /api/documents/ - The caller's documents, newest first
pub async fn list_documents(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<Vec<DocumentResponse>>, AppError> {
    let docs = state.store()?.list_documents(user_id)?;
    Ok(Json(docs.iter().map(DocumentResponse::from).collect()))
}

/// POST /api/documents/ - Store an upload and extract its text
pub async fn upload_document(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<DocumentResponse>), AppError> {
    let upload = read_upload(&mut multipart)
        .await?
        .ok_or_else(|| AppError::BadRequest("No file provided".to_string()))?;

    let max_bytes = state.config.max_upload_bytes;
    if upload.bytes.len() > max_bytes {
        return Err(AppError::BadRequest(format!(
            "File size cannot exceed {}MB",
            max_bytes / (1024 * 1024)
        )));
    }
    if !is_accepted_media_type(&upload.content_type) {
        return Err(AppError::BadRequest(
            "Only PDF, JPEG, PNG, and TIFF files are allowed".to_string(),
        ));
    }

    info!(
        "Received upload '{}' ({} bytes, {}) from user {}",
        upload.filename,
        upload.bytes.len(),
        upload.content_type,
        user_id
    );

    let files = Arc::clone(&state.files);
    let filename = upload.filename.clone();
    let bytes = upload.bytes;
    let stored = tokio::task::spawn_blocking(move || files.save(user_id, &filename, &bytes))
        .await
        .map_err(|e| AppError::Internal(format!("Task join error: {}", e)))??;

    let inserted = state.store()?.insert_document(NewDocument {
        user_id,
        file_path: stored.relative.clone(),
        original_filename: upload.filename,
        content_type: upload.content_type.clone(),
        file_size: stored.size,
    });
    let doc = match inserted {
        Ok(doc) => doc,
        Err(e) => {
            if let Err(cleanup) = state.files.remove(&stored.relative) {
                warn!("Failed to remove orphaned upload {}: {}", stored.relative, cleanup);
            }
            return Err(e.into());
        }
    };

    // Extraction never fails the upload
    let extractor = Arc::clone(&state.extractor);
    let path = stored.absolute;
    let content_type = upload.content_type;
    let text = match tokio::task::spawn_blocking(move || extractor.extract(&path, &content_type)).await {
        Ok(text) => text,
        Err(e) => {
            error!("Extraction task for document {} failed: {}", doc.id, e);
            String::new()
        }
    };

    info!("Extracted {} characters from document {}", text.chars().count(), doc.id);

    let doc = {
        let mut store = state.store()?;
        store.set_extracted_text(doc.id, &text)?;
        store.get_document(user_id, doc.id)?.unwrap_or(doc)
    };

    Ok((StatusCode::CREATED, Json(DocumentResponse::from(&doc))))
}

/// GET /api/documents/{id}/ - One of the caller's documents
pub async fn get_document(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<i64>,
) -> Result<Json<DocumentResponse>, AppError> {
    let doc = state
        .store()?
        .get_document(user_id, DocumentId::new(id))?
        .ok_or_else(not_found)?;

    Ok(Json(DocumentResponse::from(&doc)))
}

/// PATCH /api/documents/{id}/ - Change the display filename
pub async fn rename_document(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<i64>,
    Json(request): Json<RenameRequest>,
) -> Result<Json<DocumentResponse>, AppError> {
    let id = DocumentId::new(id);
    let mut store = state.store()?;

    let doc = match request.original_filename {
        None => store.get_document(user_id, id)?,
        Some(name) => {
            let name = name.trim();
            if name.is_empty() {
                return Err(AppError::BadRequest("This field may not be blank.".to_string()));
            }
            store.rename_document(user_id, id, name)?
        }
    };

    let doc = doc.ok_or_else(not_found)?;
    Ok(Json(DocumentResponse::from(&doc)))
}

/// DELETE /api/documents/{id}/ - Remove the record and its stored file
pub async fn delete_document(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    let doc = state
        .store()?
        .delete_document(user_id, DocumentId::new(id))?
        .ok_or_else(not_found)?;

    let files = Arc::clone(&state.files);
    let relative = doc.file_path.clone();
    match tokio::task::spawn_blocking(move || files.remove(&relative)).await {
        Ok(Ok(())) => {}
        Ok(Err(e)) => warn!("Failed to remove file of document {}: {}", doc.id, e),
        Err(e) => warn!("File removal task for document {} failed: {}", doc.id, e),
    }

    info!("Deleted document {} of user {}", doc.id, user_id);
    Ok(StatusCode::NO_CONTENT)
}

fn not_found() -> AppError {
    AppError::NotFound("Document not found".to_string())
}
