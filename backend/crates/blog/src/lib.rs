//! Blog Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, validators, comment forest, repository traits
//! - `application/` - Use cases, session tokens, configuration
//! - `infra/` - PostgreSQL gateway
//! - `presentation/` - HTTP handlers, DTOs, middleware, host-aware router
//!
//! ## Features
//! - Posts with metadata and tags, newest-first paging
//! - Threaded comments; deleting a comment with replies keeps a tombstone
//! - Tags with unique names
//! - Registration and login for readers and admins
//!
//! ## Security Model
//! - Passwords and session fingerprints hashed with Argon2id
//! - Stateless HS256 bearer tokens bound to an HttpOnly fingerprint cookie
//! - Admin role granted at login from a configured allow-list
//! - Every mutation route requires the admin role on the admin host

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;


// Re-exports for convenience
pub use application::config::BlogConfig;
pub use error::{BlogError, BlogResult};
pub use infra::postgres::PgBlogRepository;
pub use presentation::router::{blog_router, blog_router_generic};

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

// Convenience re-exports
pub mod config {
    pub use crate::application::config::*;
}

pub mod models {
    pub use crate::domain::entity::{comment::*, post::*, tag::*, user::*};
    pub use crate::presentation::dto::*;
}

pub mod store {
    pub use crate::infra::postgres::PgBlogRepository as BlogStore;
}
