//! # Ripple Infrastructure
//!
//! Concrete implementations of the ports defined in `ripple-core`:
//! the in-memory content store, the in-memory image store, and the
//! JWT/Argon2 identity services.
//!
//! ## Feature Flags
//!
//! - `auth` (default) - JWT + Argon2 authentication

pub mod images;
pub mod store;

#[cfg(feature = "auth")]
pub mod auth;

pub use images::InMemoryImageStore;
pub use store::InMemoryContentStore;

#[cfg(feature = "auth")]
pub use auth::{Argon2PasswordService, JwtTokenService};
