//! Domain Layer
//!
//! Contains entities, validators, roles, and repository traits.

pub mod entity;
pub mod repository;
pub mod role;
pub mod validation;

// Re-exports
pub use entity::{comment::Comment, post::Post, tag::Tag};
pub use repository::{
    BlogRepository, CommentRepository, PostRepository, StoreHealth, TagRepository,
    UserRepository,
};
pub use role::Role;
pub use validation::{PageRange, ValidationError};
