use serde::{Deserialize, Serialize};

/// User entity - a registered account keyed by username.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub username: String,
    pub password_hash: String,
}

impl User {
    /// Create a new user from an already-hashed credential.
    pub fn new(username: String, password_hash: String) -> Self {
        Self {
            username,
            password_hash,
        }
    }
}
