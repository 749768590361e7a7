//! Application Layer
//!
//! Use cases and application services.

pub mod authenticate;
pub mod comments;
pub mod config;
pub mod login;
pub mod posts;
pub mod register;
pub mod tags;
pub mod token;

// Re-exports
pub use authenticate::AuthenticateUseCase;
pub use comments::{CommentInput, CommentService};
pub use config::BlogConfig;
pub use login::{LoginInput, LoginOutput, LoginUseCase};
pub use posts::{PostService, PostWithComments};
pub use register::{RegisterInput, RegisterUseCase};
pub use tags::TagService;
pub use token::{Claims, TokenError, TokenService};
