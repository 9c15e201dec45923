//! In-memory identity store.
//!
//! Holds registered users for the process lifetime; users are never
//! deleted. Constructed explicitly and injected through application state,
//! never a process-wide global.

use std::collections::HashMap;

use tokio::sync::RwLock;

use quill_core::domain::User;
use quill_core::error::DomainError;

/// Identity store keyed by username.
pub struct UserStore {
    users: RwLock<HashMap<String, User>>,
}

impl UserStore {
    pub fn new() -> Self {
        Self {
            users: RwLock::new(HashMap::new()),
        }
    }

    /// Register a user. Uniqueness is enforced here, at registration time
    /// only.
    pub async fn insert(&self, user: User) -> Result<(), DomainError> {
        let mut users = self.users.write().await;
        if users.contains_key(&user.username) {
            return Err(DomainError::DuplicateUser);
        }
        users.insert(user.username.clone(), user);
        Ok(())
    }

    /// Look up a user by username.
    pub async fn find(&self, username: &str) -> Option<User> {
        self.users.read().await.get(username).cloned()
    }
}

impl Default for UserStore {
    fn default() -> Self {
        Self::new()
    }
}
