//! The post collection: an in-memory list of posts persisted to a flat
//! JSON file after every mutation.
//!
//! Every mutating sequence (lookup, mutate, persist) runs under a single
//! async mutex so the read-modify-write cycle is atomic with respect to
//! other writers. Reads clone out of the lock.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Utc;
use tokio::sync::Mutex;

use quill_core::domain::{Comment, Post, PostFields};
use quill_core::error::{DomainError, StoreError};

const SORT_FIELDS: [&str; 4] = ["title", "content", "author", "date"];

/// Collection of blog posts backed by a single JSON file.
pub struct PostCollection {
    file_path: PathBuf,
    posts: Mutex<Vec<Post>>,
}

impl PostCollection {
    /// Open the collection at `file_path`, loading any previously persisted
    /// posts. A missing file yields an empty collection; an unreadable or
    /// malformed file also yields an empty collection, but is reported with
    /// a warning rather than swallowed silently.
    pub fn open(file_path: impl Into<PathBuf>) -> Self {
        let file_path = file_path.into();
        let posts = match load_posts(&file_path) {
            Ok(posts) => posts,
            Err(err) => {
                tracing::warn!(
                    "Failed to load posts from {}: {}. Starting with an empty collection.",
                    file_path.display(),
                    err
                );
                Vec::new()
            }
        };

        Self {
            file_path,
            posts: Mutex::new(posts),
        }
    }

    /// All posts in insertion order.
    pub async fn list_all(&self) -> Vec<Post> {
        self.posts.lock().await.clone()
    }

    /// Create a post from validated fields and persist the collection.
    pub async fn add(
        &self,
        fields: PostFields,
        categories: Vec<String>,
        tags: Vec<String>,
    ) -> Result<Post, DomainError> {
        let mut posts = self.posts.lock().await;
        let post = Post::new(fields, categories, tags);
        posts.push(post.clone());
        save_posts(&self.file_path, &posts)?;
        Ok(post)
    }

    /// Linear lookup by id.
    pub async fn find(&self, post_id: &str) -> Option<Post> {
        self.posts
            .lock()
            .await
            .iter()
            .find(|post| post.id == post_id)
            .cloned()
    }

    /// Remove a post by id, persist, and return the removed post.
    pub async fn delete(&self, post_id: &str) -> Result<Post, DomainError> {
        let mut posts = self.posts.lock().await;
        let index = posts
            .iter()
            .position(|post| post.id == post_id)
            .ok_or_else(|| DomainError::PostNotFound {
                id: post_id.to_string(),
            })?;

        let removed = posts.remove(index);
        save_posts(&self.file_path, &posts)?;
        Ok(removed)
    }

    /// Replace a post's title/content/author, refresh its date, and persist.
    pub async fn update(&self, post_id: &str, fields: PostFields) -> Result<Post, DomainError> {
        let mut posts = self.posts.lock().await;
        let post = posts
            .iter_mut()
            .find(|post| post.id == post_id)
            .ok_or_else(|| DomainError::PostNotFound {
                id: post_id.to_string(),
            })?;

        post.title = fields.title;
        post.content = fields.content;
        post.author = fields.author;
        post.date = Utc::now();

        let updated = post.clone();
        save_posts(&self.file_path, &posts)?;
        Ok(updated)
    }

    /// Attach a comment to a post and persist.
    pub async fn add_comment(
        &self,
        post_id: &str,
        content: String,
    ) -> Result<Comment, DomainError> {
        let mut posts = self.posts.lock().await;
        let post = posts
            .iter_mut()
            .find(|post| post.id == post_id)
            .ok_or_else(|| DomainError::PostNotFound {
                id: post_id.to_string(),
            })?;

        let comment = post.add_comment(content);
        save_posts(&self.file_path, &posts)?;
        Ok(comment)
    }

    /// Posts sorted by one of title/content/author/date. An omitted field
    /// returns collection order; anything else is invalid data. The sort is
    /// stable, so ties keep collection order in both directions.
    pub async fn sort(
        &self,
        sort_by: Option<&str>,
        direction: &str,
    ) -> Result<Vec<Post>, DomainError> {
        let mut sorted = self.posts.lock().await.clone();

        let Some(field) = sort_by else {
            return Ok(sorted);
        };

        if !SORT_FIELDS.contains(&field) {
            return Err(DomainError::InvalidData(
                "Invalid sort_by parameter".to_string(),
            ));
        }
        if direction != "asc" && direction != "desc" {
            return Err(DomainError::InvalidData(
                "Invalid direction parameter".to_string(),
            ));
        }

        sorted.sort_by(|a, b| {
            let ordering = match field {
                "title" => a.title.cmp(&b.title),
                "content" => a.content.cmp(&b.content),
                "author" => a.author.cmp(&b.author),
                _ => a.date.cmp(&b.date),
            };
            if direction == "desc" {
                ordering.reverse()
            } else {
                ordering
            }
        });

        Ok(sorted)
    }

    /// Case-insensitive substring search over title, content and author,
    /// in collection order.
    pub async fn search(&self, query: &str) -> Vec<Post> {
        let needle = query.to_lowercase();
        self.posts
            .lock()
            .await
            .iter()
            .filter(|post| {
                post.title.to_lowercase().contains(&needle)
                    || post.content.to_lowercase().contains(&needle)
                    || post.author.to_lowercase().contains(&needle)
            })
            .cloned()
            .collect()
    }
}

fn load_posts(path: &Path) -> Result<Vec<Post>, StoreError> {
    if !path.exists() {
        return Ok(Vec::new());
    }
    let contents = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&contents)?)
}

fn save_posts(path: &Path, posts: &[Post]) -> Result<(), StoreError> {
    let contents = serde_json::to_string_pretty(posts)?;
    fs::write(path, contents)?;
    Ok(())
}
