use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;

fn new_id() -> String {
    Uuid::new_v4().simple().to_string()
}

/// Comment attached to a post. Create-only; removed with its parent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub id: String,
    pub post_id: String,
    pub content: String,
}

/// Category attached to a post.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
}

/// Tag attached to a post.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tag {
    pub id: String,
    pub name: String,
}

/// Post entity - a blog entry with its nested comments, categories and tags.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: String,
    pub title: String,
    pub content: String,
    pub author: String,
    pub date: DateTime<Utc>,
    #[serde(default)]
    pub comments: Vec<Comment>,
    #[serde(default)]
    pub categories: Vec<Category>,
    #[serde(default)]
    pub tags: Vec<Tag>,
}

impl Post {
    /// Create a new post with a generated opaque id and the current timestamp.
    pub fn new(fields: PostFields, categories: Vec<String>, tags: Vec<String>) -> Self {
        Self {
            id: new_id(),
            title: fields.title,
            content: fields.content,
            author: fields.author,
            date: Utc::now(),
            comments: Vec::new(),
            categories: categories
                .into_iter()
                .map(|name| Category { id: new_id(), name })
                .collect(),
            tags: tags
                .into_iter()
                .map(|name| Tag { id: new_id(), name })
                .collect(),
        }
    }

    /// Attach a comment and return it.
    pub fn add_comment(&mut self, content: String) -> Comment {
        let comment = Comment {
            id: new_id(),
            post_id: self.id.clone(),
            content,
        };
        self.comments.push(comment.clone());
        comment
    }

    /// Attach a category and return it.
    pub fn add_category(&mut self, name: String) -> Category {
        let category = Category {
            id: new_id(),
            name,
        };
        self.categories.push(category.clone());
        category
    }

    /// Attach a tag and return it.
    pub fn add_tag(&mut self, name: String) -> Tag {
        let tag = Tag {
            id: new_id(),
            name,
        };
        self.tags.push(tag.clone());
        tag
    }
}

/// Raw post input before validation. Fields are optional so that a missing
/// field and an empty one produce the same validation error.
#[derive(Debug, Clone, Default)]
pub struct PostDraft {
    pub title: Option<String>,
    pub content: Option<String>,
    pub author: Option<String>,
}

/// Validated post fields.
#[derive(Debug, Clone)]
pub struct PostFields {
    pub title: String,
    pub content: String,
    pub author: String,
}

impl PostDraft {
    /// Check the required fields in order, naming the first missing or
    /// empty one.
    pub fn validate(self) -> Result<PostFields, DomainError> {
        let title = require("title", self.title)?;
        let content = require("content", self.content)?;
        let author = require("author", self.author)?;
        Ok(PostFields {
            title,
            content,
            author,
        })
    }
}

fn require(name: &str, value: Option<String>) -> Result<String, DomainError> {
    match value {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(DomainError::InvalidData(format!(
            "Missing or empty field: {name}"
        ))),
    }
}
