//! Register Use Case
//!
//! Creates a new user account.

use std::sync::Arc;

use platform::password::ClearTextPassword;

use crate::application::config::BlogConfig;
use crate::domain::entity::user::NewUser;
use crate::domain::repository::UserRepository;
use crate::domain::validation::validate_registration;
use crate::error::{BlogError, BlogResult};

/// Register input
pub struct RegisterInput {
    pub username: String,
    pub email: String,
    pub password: ClearTextPassword,
}

/// Register use case
pub struct RegisterUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
    config: Arc<BlogConfig>,
}

impl<U> RegisterUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>, config: Arc<BlogConfig>) -> Self {
        Self { user_repo, config }
    }

    pub async fn execute(&self, input: RegisterInput) -> BlogResult<()> {
        validate_registration(&input.username, &input.email, input.password.as_str())?;

        let username = input.username.trim().to_string();
        let email = input.email.trim().to_string();

        if self
            .user_repo
            .exists_by_username_or_email(&username, &email)
            .await?
        {
            return Err(BlogError::UserAlreadyRegistered);
        }

        // Argon2 is CPU-bound; keep it off the async workers
        let cost = self.config.hash_cost;
        let password = input.password;
        let password_hash =
            tokio::task::spawn_blocking(move || password.hash(&cost)).await??;

        let user = NewUser {
            username,
            email,
            password_hash: password_hash.into_phc_string(),
        };

        // A concurrent registration can still hit the unique constraints
        self.user_repo.save(&user).await.map_err(|e| match e {
            BlogError::Duplicate(_) => BlogError::UserAlreadyRegistered,
            other => other,
        })?;

        tracing::info!(username = %user.username, "User registered");
        Ok(())
    }
}
