//! Domain entities - the core business objects.

mod post;

mod user;

pub use post::{Category, Comment, Post, PostDraft, PostFields, Tag};
pub use user::User;
