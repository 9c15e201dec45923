//! Ports - trait definitions for external dependencies.
//! These are the "interfaces" that infrastructure must implement.

mod auth;

pub use auth::{AuthError, PasswordService, TokenClaims, TokenService};
