//! # Ripple Core
//!
//! The domain layer of the Ripple backend: the content-graph entities
//! (users, posts, comments, notifications), the consistency engine that
//! mutates them, and the ports infrastructure must implement.
//! This crate contains pure business logic with zero infrastructure
//! dependencies.

pub mod domain;
pub mod engine;
pub mod error;
pub mod ports;

pub use error::DomainError;
