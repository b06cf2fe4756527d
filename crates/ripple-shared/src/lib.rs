//! # Ripple Shared
//!
//! Request/response types shared between clients and the API server.

pub mod dto;
pub mod response;

pub use response::{ApiResponse, ErrorResponse};
