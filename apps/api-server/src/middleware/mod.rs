//! HTTP middleware: identity extraction and error mapping.

pub mod auth;
pub mod error;
