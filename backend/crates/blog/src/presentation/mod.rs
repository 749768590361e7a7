//! Presentation Layer
//!
//! HTTP handlers, DTOs, router, and middleware.

pub mod dto;
pub mod extract;
pub mod handlers;
pub mod middleware;
pub mod router;

pub use handlers::BlogAppState;
pub use middleware::{CallerRole, require_admin, require_session};
pub use router::{admin_router, blog_router, blog_router_generic, public_router};
