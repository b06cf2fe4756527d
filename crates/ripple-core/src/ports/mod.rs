//! Ports - trait definitions for external dependencies.
//! These are the "interfaces" that infrastructure must implement.

mod auth;
mod images;
mod store;

pub use auth::{AuthError, PasswordService, TokenClaims, TokenService};
pub use images::{ImageError, ImageStore};
pub use store::{ContentStore, WriteOp};
