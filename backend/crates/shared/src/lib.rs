//! Shared Kernel - Domain-crossing minimal core
//!
//! This crate contains the "smallest core" of the blog's vocabulary:
//! - Error classes, wire error codes and the unified `AppError`
//! - The `{error, body}` response envelope
//! - Typed integer IDs for persisted entities
//!
//! **Design Principle**: Only include things that are "hard to change"
//! and have consistent meaning across all resources.

pub mod envelope;
pub mod error {
    pub mod app_error;
    pub mod code;
    pub mod conversions;
    pub mod kind;
}
pub mod id;
