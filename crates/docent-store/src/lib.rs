//! Docent Storage Layer
//!
//! Implements the `DocumentStore` and `UserStore` traits using SQLite, plus
//! [`FileStore`] for the uploaded bytes themselves.
//!
//! # Architecture
//!
//! - SQLite for users, document records and revoked refresh tokens
//! - Plain files under the media root for uploads
//!
//! # Examples
//!
//! ```no_run
//! use docent_store::SqliteStore;
//!
//! let store = SqliteStore::new(":memory:").unwrap();
//! // Store is now ready for user and document operations
//! ```

#![warn(missing_docs)]

pub mod files;

use docent_domain::traits::{DocumentStore, UserStore};
use docent_domain::{Document, DocumentId, NewDocument, NewUser, User, UserId};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};
use thiserror::Error;
use tracing::debug;

pub use files::{FileStore, StoredFile};

/// Errors that can occur during storage operations
#[derive(Error, Debug)]
pub enum StoreError {
    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Filesystem error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Record not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid data format
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// Unique value already taken
    #[error("Duplicate: {0}")]
    Duplicate(String),
}

const DOCUMENT_COLUMNS: &str = "id, user_id, file_path, original_filename, content_type, file_size, \
     extracted_text, created_at, updated_at";

const USER_COLUMNS: &str = "id, username, email, first_name, last_name, password_hash, created_at";

/// SQLite-based implementation of DocumentStore and UserStore
///
/// # Thread Safety
///
/// SQLite connections are not thread-safe. Share one store behind a mutex or
/// give each thread its own SqliteStore instance.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Create a new SqliteStore with the given database path
    ///
    /// Use `:memory:` for an in-memory database (useful for testing).
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let conn = Connection::open(path)?;
        let mut store = Self { conn };
        store.initialize_schema()?;
        Ok(store)
    }

    fn initialize_schema(&mut self) -> Result<(), StoreError> {
        let schema = include_str!("schema.sql");
        self.conn.execute_batch(schema)?;
        Ok(())
    }

    /// Record a refresh token as revoked until `expires_at`
    ///
    /// Revoking the same token twice is a no-op.
    pub fn revoke_token(&mut self, jti: &str, expires_at: u64) -> Result<(), StoreError> {
        self.conn.execute(
            "INSERT OR IGNORE INTO revoked_tokens (jti, expires_at) VALUES (?1, ?2)",
            params![jti, expires_at as i64],
        )?;
        Ok(())
    }

    /// Whether a refresh token has been revoked
    pub fn is_token_revoked(&self, jti: &str) -> Result<bool, StoreError> {
        let revoked = self
            .conn
            .query_row(
                "SELECT 1 FROM revoked_tokens WHERE jti = ?1",
                params![jti],
                |_| Ok(true),
            )
            .optional()?
            .unwrap_or(false);
        Ok(revoked)
    }

    /// Forget revocations whose token would have expired by `now`
    pub fn purge_expired_revocations(&mut self, now: u64) -> Result<usize, StoreError> {
        let removed = self.conn.execute(
            "DELETE FROM revoked_tokens WHERE expires_at <= ?1",
            params![now as i64],
        )?;
        if removed > 0 {
            debug!("Purged {} expired token revocations", removed);
        }
        Ok(removed)
    }

    fn row_to_document(row: &Row<'_>) -> rusqlite::Result<Document> {
        Ok(Document {
            id: DocumentId::new(row.get(0)?),
            user_id: UserId::new(row.get(1)?),
            file_path: row.get(2)?,
            original_filename: row.get(3)?,
            content_type: row.get(4)?,
            file_size: row.get::<_, i64>(5)? as u64,
            extracted_text: row.get(6)?,
            created_at: row.get::<_, i64>(7)? as u64,
            updated_at: row.get::<_, i64>(8)? as u64,
        })
    }

    fn row_to_user(row: &Row<'_>) -> rusqlite::Result<User> {
        Ok(User {
            id: UserId::new(row.get(0)?),
            username: row.get(1)?,
            email: row.get(2)?,
            first_name: row.get(3)?,
            last_name: row.get(4)?,
            password_hash: row.get(5)?,
            created_at: row.get::<_, i64>(6)? as u64,
        })
    }

    fn document_by_id(&self, id: DocumentId) -> Result<Option<Document>, StoreError> {
        let sql = format!("SELECT {} FROM documents WHERE id = ?1", DOCUMENT_COLUMNS);
        let doc = self
            .conn
            .query_row(&sql, params![id.value()], Self::row_to_document)
            .optional()?;
        Ok(doc)
    }
}

/// Current Unix time in seconds
pub fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

impl DocumentStore for SqliteStore {
    type Error = StoreError;

    fn insert_document(&mut self, document: NewDocument) -> Result<Document, Self::Error> {
        let now = now_secs();

        self.conn.execute(
            "INSERT INTO documents (user_id, file_path, original_filename, content_type, file_size, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?6)",
            params![
                document.user_id.value(),
                &document.file_path,
                &document.original_filename,
                &document.content_type,
                document.file_size as i64,
                now as i64,
            ],
        )?;

        let id = DocumentId::new(self.conn.last_insert_rowid());
        debug!("Inserted document {} for user {}", id, document.user_id);

        Ok(Document {
            id,
            user_id: document.user_id,
            file_path: document.file_path,
            original_filename: document.original_filename,
            content_type: document.content_type,
            file_size: document.file_size,
            extracted_text: None,
            created_at: now,
            updated_at: now,
        })
    }

    fn get_document(&self, owner: UserId, id: DocumentId) -> Result<Option<Document>, Self::Error> {
        let sql = format!(
            "SELECT {} FROM documents WHERE id = ?1 AND user_id = ?2",
            DOCUMENT_COLUMNS
        );
        let doc = self
            .conn
            .query_row(&sql, params![id.value(), owner.value()], Self::row_to_document)
            .optional()?;
        Ok(doc)
    }

    fn list_documents(&self, owner: UserId) -> Result<Vec<Document>, Self::Error> {
        let sql = format!(
            "SELECT {} FROM documents WHERE user_id = ?1 ORDER BY created_at DESC, id DESC",
            DOCUMENT_COLUMNS
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let docs = stmt
            .query_map(params![owner.value()], Self::row_to_document)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(docs)
    }

    fn set_extracted_text(&mut self, id: DocumentId, text: &str) -> Result<(), Self::Error> {
        let updated = self.conn.execute(
            "UPDATE documents SET extracted_text = ?1, updated_at = ?2 WHERE id = ?3",
            params![text, now_secs() as i64, id.value()],
        )?;

        if updated == 0 {
            return Err(StoreError::NotFound(format!("document {}", id)));
        }
        Ok(())
    }

    fn rename_document(
        &mut self,
        owner: UserId,
        id: DocumentId,
        original_filename: &str,
    ) -> Result<Option<Document>, Self::Error> {
        let updated = self.conn.execute(
            "UPDATE documents SET original_filename = ?1, updated_at = ?2 WHERE id = ?3 AND user_id = ?4",
            params![original_filename, now_secs() as i64, id.value(), owner.value()],
        )?;

        if updated == 0 {
            return Ok(None);
        }
        self.document_by_id(id)
    }

    fn delete_document(&mut self, owner: UserId, id: DocumentId) -> Result<Option<Document>, Self::Error> {
        let Some(doc) = self.get_document(owner, id)? else {
            return Ok(None);
        };

        self.conn.execute(
            "DELETE FROM documents WHERE id = ?1 AND user_id = ?2",
            params![id.value(), owner.value()],
        )?;

        debug!("Deleted document {} of user {}", id, owner);
        Ok(Some(doc))
    }
}

impl UserStore for SqliteStore {
    type Error = StoreError;

    fn create_user(&mut self, user: NewUser) -> Result<User, Self::Error> {
        if self.find_user_by_username(&user.username)?.is_some() {
            return Err(StoreError::Duplicate(format!(
                "username '{}' is taken",
                user.username
            )));
        }

        let now = now_secs();
        self.conn.execute(
            "INSERT INTO users (username, email, first_name, last_name, password_hash, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                &user.username,
                &user.email,
                &user.first_name,
                &user.last_name,
                &user.password_hash,
                now as i64,
            ],
        )?;

        Ok(User {
            id: UserId::new(self.conn.last_insert_rowid()),
            username: user.username,
            email: user.email,
            first_name: user.first_name,
            last_name: user.last_name,
            password_hash: user.password_hash,
            created_at: now,
        })
    }

    fn get_user(&self, id: UserId) -> Result<Option<User>, Self::Error> {
        let sql = format!("SELECT {} FROM users WHERE id = ?1", USER_COLUMNS);
        let user = self
            .conn
            .query_row(&sql, params![id.value()], Self::row_to_user)
            .optional()?;
        Ok(user)
    }

    fn find_user_by_username(&self, username: &str) -> Result<Option<User>, Self::Error> {
        let sql = format!("SELECT {} FROM users WHERE username = ?1", USER_COLUMNS);
        let user = self
            .conn
            .query_row(&sql, params![username], Self::row_to_user)
            .optional()?;
        Ok(user)
    }
}
