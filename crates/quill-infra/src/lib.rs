//! # Quill Infrastructure
//!
//! Concrete implementations of the ports defined in `quill-core`, plus the
//! flat-file post collection and the in-memory identity store.

pub mod auth;
pub mod posts;
pub mod users;

pub use auth::{Argon2PasswordService, JwtTokenService};
pub use posts::PostCollection;
pub use users::UserStore;
