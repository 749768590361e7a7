//! Login Use Case
//!
//! Verifies credentials and mints a fingerprint-bound session token.

use std::sync::Arc;

use platform::crypto::random_token;
use platform::password::{ClearTextPassword, HashedSecret};

use crate::application::config::BlogConfig;
use crate::application::token::TokenService;
use crate::domain::repository::UserRepository;
use crate::domain::role::Role;
use crate::domain::validation::{LoginIdentity, validate_login};
use crate::error::{BlogError, BlogResult};

/// Raw fingerprint length in bytes
pub const FINGERPRINT_BYTES: usize = 32;

/// Login input; either identifier may be empty, not both
pub struct LoginInput {
    pub username: String,
    pub email: String,
    pub password: ClearTextPassword,
}

/// Login output
pub struct LoginOutput {
    /// Bearer token, returned in the envelope body
    pub token: String,
    /// Raw fingerprint for the HttpOnly cookie
    pub fingerprint: String,
    /// For the renderer's `Login` cookie
    pub username: String,
}

/// Login use case
pub struct LoginUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
    tokens: Arc<TokenService>,
    config: Arc<BlogConfig>,
}

impl<U> LoginUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>, tokens: Arc<TokenService>, config: Arc<BlogConfig>) -> Self {
        Self {
            user_repo,
            tokens,
            config,
        }
    }

    pub async fn execute(&self, input: LoginInput) -> BlogResult<LoginOutput> {
        let identity = validate_login(&input.username, &input.email, input.password.as_str())?;

        let (username, stored_hash) = match identity {
            LoginIdentity::Email(email) => self
                .user_repo
                .get_username_and_password_by_email(email.trim())
                .await?
                .map(|creds| (creds.username, creds.password_hash)),
            LoginIdentity::Username(name) => {
                let name = name.trim();
                self.user_repo
                    .get_password_by_username(name)
                    .await?
                    .map(|hash| (name.to_string(), hash))
            }
        }
        .ok_or(BlogError::WrongCredentials)?;

        let stored = HashedSecret::from_phc_string(stored_hash)?;
        let password = input.password;
        let matches =
            tokio::task::spawn_blocking(move || stored.verify(password.as_bytes())).await?;
        if !matches {
            return Err(BlogError::WrongCredentials);
        }

        let role = Role::for_username(&username, &self.config.admins);

        let fingerprint = random_token(FINGERPRINT_BYTES);
        let cost = self.config.hash_cost;
        let raw = fingerprint.clone();
        let fingerprint_hash =
            tokio::task::spawn_blocking(move || cost.hash(raw.as_bytes())).await??;

        let token = self
            .tokens
            .mint(role, fingerprint_hash.as_phc_string())
            .map_err(|e| BlogError::Internal(e.to_string()))?;

        tracing::info!(username = %username, role = %role, "User logged in");

        Ok(LoginOutput {
            token,
            fingerprint,
            username,
        })
    }
}
