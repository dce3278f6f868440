//! User module - account records that own documents

use std::fmt;

/// Identifier of a user account
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct UserId(i64);

impl UserId {
    /// Wrap a raw row identifier
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    /// Get the raw value
    pub fn value(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A registered user
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    /// Unique identifier
    pub id: UserId,
    /// Login name (unique)
    pub username: String,
    /// Email address (may be empty)
    pub email: String,
    /// Given name (may be empty)
    pub first_name: String,
    /// Family name (may be empty)
    pub last_name: String,
    /// Encoded password hash
    pub password_hash: String,
    /// Creation timestamp (Unix epoch seconds)
    pub created_at: u64,
}

/// Data needed to create a user
#[derive(Debug, Clone)]
pub struct NewUser {
    /// Login name
    pub username: String,
    /// Email address
    pub email: String,
    /// Given name
    pub first_name: String,
    /// Family name
    pub last_name: String,
    /// Encoded password hash (never the plain password)
    pub password_hash: String,
}
