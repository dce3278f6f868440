//! Integration tests for docent-store
//!
//! These tests verify the full CRUD cycle for users, documents and revoked
//! tokens.

use docent_domain::traits::{DocumentStore, UserStore};
use docent_domain::{DocumentId, NewDocument, NewUser, UserId};
use docent_store::{SqliteStore, StoreError};
use tempfile::TempDir;

fn new_user(username: &str) -> NewUser {
    NewUser {
        username: username.to_string(),
        email: format!("{}@example.com", username),
        first_name: String::new(),
        last_name: String::new(),
        password_hash: "$argon2id$v=19$m=19456,t=2,p=1$c2FsdHNhbHQ$aGFzaGhhc2g".to_string(),
    }
}

fn new_document(owner: UserId, name: &str) -> NewDocument {
    NewDocument {
        user_id: owner,
        file_path: format!("documents/{}/{}", owner, name),
        original_filename: name.to_string(),
        content_type: "application/pdf".to_string(),
        file_size: 1024,
    }
}

fn store_with_users() -> (SqliteStore, UserId, UserId) {
    let mut store = SqliteStore::new(":memory:").unwrap();
    let alice = store.create_user(new_user("alice")).unwrap().id;
    let bob = store.create_user(new_user("bob")).unwrap().id;
    (store, alice, bob)
}

#[test]
fn test_store_initialization() {
    let store = SqliteStore::new(":memory:");
    assert!(store.is_ok(), "Store should initialize successfully");
}

#[test]
fn test_create_and_find_user() {
    let mut store = SqliteStore::new(":memory:").unwrap();

    let user = store.create_user(new_user("alice")).unwrap();
    assert_eq!(user.username, "alice");
    assert_eq!(user.email, "alice@example.com");

    let by_id = store.get_user(user.id).unwrap().unwrap();
    assert_eq!(by_id, user);

    let by_name = store.find_user_by_username("alice").unwrap().unwrap();
    assert_eq!(by_name.id, user.id);

    assert!(store.find_user_by_username("nobody").unwrap().is_none());
    assert!(store.get_user(UserId::new(999)).unwrap().is_none());
}

#[test]
fn test_duplicate_username_rejected() {
    let mut store = SqliteStore::new(":memory:").unwrap();
    store.create_user(new_user("alice")).unwrap();

    let result = store.create_user(new_user("alice"));
    assert!(matches!(result, Err(StoreError::Duplicate(_))));
}

#[test]
fn test_insert_and_get_document() {
    let (mut store, alice, _) = store_with_users();

    let doc = store.insert_document(new_document(alice, "report.pdf")).unwrap();
    assert_eq!(doc.original_filename, "report.pdf");
    assert_eq!(doc.extracted_text, None);
    assert_eq!(doc.created_at, doc.updated_at);

    let fetched = store.get_document(alice, doc.id).unwrap().unwrap();
    assert_eq!(fetched, doc);
}

#[test]
fn test_documents_scoped_to_owner() {
    let (mut store, alice, bob) = store_with_users();

    let doc = store.insert_document(new_document(alice, "private.pdf")).unwrap();

    assert!(store.get_document(bob, doc.id).unwrap().is_none());
    assert!(store.list_documents(bob).unwrap().is_empty());
    assert!(store.rename_document(bob, doc.id, "stolen.pdf").unwrap().is_none());
    assert!(store.delete_document(bob, doc.id).unwrap().is_none());

    // Still intact for the owner
    let fetched = store.get_document(alice, doc.id).unwrap().unwrap();
    assert_eq!(fetched.original_filename, "private.pdf");
}

#[test]
fn test_list_newest_first() {
    let (mut store, alice, _) = store_with_users();

    let first = store.insert_document(new_document(alice, "first.pdf")).unwrap();
    let second = store.insert_document(new_document(alice, "second.pdf")).unwrap();
    let third = store.insert_document(new_document(alice, "third.pdf")).unwrap();

    let ids: Vec<DocumentId> = store
        .list_documents(alice)
        .unwrap()
        .into_iter()
        .map(|d| d.id)
        .collect();
    assert_eq!(ids, vec![third.id, second.id, first.id]);
}

#[test]
fn test_set_extracted_text_overwrites() {
    let (mut store, alice, _) = store_with_users();
    let doc = store.insert_document(new_document(alice, "scan.pdf")).unwrap();

    store.set_extracted_text(doc.id, "").unwrap();
    let fetched = store.get_document(alice, doc.id).unwrap().unwrap();
    assert_eq!(fetched.extracted_text.as_deref(), Some(""));
    assert!(!fetched.has_text());

    store.set_extracted_text(doc.id, "Recognized text").unwrap();
    let fetched = store.get_document(alice, doc.id).unwrap().unwrap();
    assert_eq!(fetched.extracted_text.as_deref(), Some("Recognized text"));
    assert!(fetched.has_text());
}

#[test]
fn test_set_extracted_text_missing_document() {
    let mut store = SqliteStore::new(":memory:").unwrap();
    let result = store.set_extracted_text(DocumentId::new(42), "text");
    assert!(matches!(result, Err(StoreError::NotFound(_))));
}

#[test]
fn test_rename_document() {
    let (mut store, alice, _) = store_with_users();
    let doc = store.insert_document(new_document(alice, "draft.pdf")).unwrap();

    let renamed = store.rename_document(alice, doc.id, "final.pdf").unwrap().unwrap();
    assert_eq!(renamed.original_filename, "final.pdf");
    assert_eq!(renamed.file_path, doc.file_path);
    assert!(renamed.updated_at >= doc.updated_at);
}

#[test]
fn test_delete_document() {
    let (mut store, alice, _) = store_with_users();
    let doc = store.insert_document(new_document(alice, "old.pdf")).unwrap();

    let removed = store.delete_document(alice, doc.id).unwrap().unwrap();
    assert_eq!(removed.id, doc.id);
    assert!(store.get_document(alice, doc.id).unwrap().is_none());

    // Second delete finds nothing
    assert!(store.delete_document(alice, doc.id).unwrap().is_none());
}

#[test]
fn test_token_revocation() {
    let mut store = SqliteStore::new(":memory:").unwrap();

    assert!(!store.is_token_revoked("jti-1").unwrap());
    store.revoke_token("jti-1", 2_000).unwrap();
    store.revoke_token("jti-1", 2_000).unwrap();
    assert!(store.is_token_revoked("jti-1").unwrap());

    store.revoke_token("jti-2", 5_000).unwrap();
    assert_eq!(store.purge_expired_revocations(3_000).unwrap(), 1);
    assert!(!store.is_token_revoked("jti-1").unwrap());
    assert!(store.is_token_revoked("jti-2").unwrap());
}

#[test]
fn test_persistence_across_connections() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("docent.db");

    let doc_id = {
        let mut store = SqliteStore::new(&path).unwrap();
        let alice = store.create_user(new_user("alice")).unwrap().id;
        let doc = store.insert_document(new_document(alice, "kept.pdf")).unwrap();
        store.set_extracted_text(doc.id, "persisted").unwrap();
        doc.id
    };

    let store = SqliteStore::new(&path).unwrap();
    let alice = store.find_user_by_username("alice").unwrap().unwrap().id;
    let doc = store.get_document(alice, doc_id).unwrap().unwrap();
    assert_eq!(doc.extracted_text.as_deref(), Some("persisted"));
}
