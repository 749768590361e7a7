//! Two-stage request authentication
//!
//! 1. The bearer token must verify (signature, algorithm, expiry).
//! 2. The `Secure-Fgp` cookie must match the fingerprint hash in the token.
//!
//! Neither stage is accepted without the other.

use std::sync::Arc;

use platform::password::HashedSecret;

use crate::application::token::TokenService;
use crate::domain::role::Role;
use crate::error::{BlogError, BlogResult};

pub struct AuthenticateUseCase {
    tokens: Arc<TokenService>,
}

impl AuthenticateUseCase {
    pub fn new(tokens: Arc<TokenService>) -> Self {
        Self { tokens }
    }

    /// Returns the role frozen into the token
    pub async fn execute(
        &self,
        bearer_token: Option<&str>,
        fingerprint_cookie: Option<&str>,
    ) -> BlogResult<Role> {
        let token = bearer_token.ok_or(BlogError::InvalidToken)?;
        let claims = self.tokens.verify(token).map_err(|e| {
            tracing::debug!(error = %e, "Token stage failed");
            BlogError::InvalidToken
        })?;

        let raw = fingerprint_cookie
            .filter(|raw| !raw.is_empty())
            .ok_or(BlogError::InvalidFingerprint)?
            .to_string();
        let expected = HashedSecret::from_phc_string(claims.fingerprint)
            .map_err(|_| BlogError::InvalidFingerprint)?;

        let matches = tokio::task::spawn_blocking(move || expected.verify(raw.as_bytes())).await?;
        if !matches {
            return Err(BlogError::InvalidFingerprint);
        }

        Ok(claims.role)
    }
}
