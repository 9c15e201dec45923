//! Application state - shared across all handlers.

use std::sync::Arc;

use quill_infra::{PostCollection, UserStore};

use crate::config::AppConfig;

/// Shared application state. The stores are constructed once at startup and
/// injected into every handler; neither is a process-wide global.
#[derive(Clone)]
pub struct AppState {
    pub posts: Arc<PostCollection>,
    pub users: Arc<UserStore>,
}

impl AppState {
    /// Build the application state from configuration.
    pub fn new(config: &AppConfig) -> Self {
        Self {
            posts: Arc::new(PostCollection::open(&config.posts_file)),
            users: Arc::new(UserStore::new()),
        }
    }
}
