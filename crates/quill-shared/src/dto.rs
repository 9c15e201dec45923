//! Data Transfer Objects - request/response types for the API.

use serde::{Deserialize, Serialize};

/// Request to register a new user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

/// Request to login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

/// Response containing the bearer token issued at login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
}

/// Body for creating or updating a post. Fields are optional so the
/// domain validation can name the first missing one instead of serde
/// rejecting the whole body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostPayload {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Body for attaching a comment to a post.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentPayload {
    #[serde(default)]
    pub content: Option<String>,
}

/// One page of results plus the link to the next page, if any.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageResponse<T> {
    pub results: Vec<T>,
    pub next_url: Option<String>,
}
