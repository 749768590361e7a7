//! Session Tokens
//!
//! HS256-signed bearer tokens. The claims carry the caller's role and the
//! Argon2 hash of the fingerprint whose raw value lives in the
//! `Secure-Fgp` cookie; a token is only accepted together with that cookie.

use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::application::config::BlogConfig;
use crate::domain::role::Role;

/// Token claims
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Expiry (unix seconds)
    pub exp: i64,
    pub role: Role,
    /// PHC string of the hashed fingerprint
    pub fingerprint: String,
}

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("Token signing failed: {0}")]
    Signing(jsonwebtoken::errors::Error),

    /// Malformed, expired, wrong algorithm or bad signature
    #[error("Token rejected: {0}")]
    Rejected(jsonwebtoken::errors::Error),
}

/// Mints and verifies session tokens
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl_secs: i64,
}

impl TokenService {
    pub fn new(config: &BlogConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        Self {
            encoding_key: EncodingKey::from_secret(&config.token_secret),
            decoding_key: DecodingKey::from_secret(&config.token_secret),
            validation,
            ttl_secs: config.session_ttl_secs(),
        }
    }

    /// Sign a token valid for the configured TTL
    pub fn mint(&self, role: Role, fingerprint_hash: &str) -> Result<String, TokenError> {
        self.mint_at(role, fingerprint_hash, Utc::now().timestamp())
    }

    fn mint_at(
        &self,
        role: Role,
        fingerprint_hash: &str,
        issued_at: i64,
    ) -> Result<String, TokenError> {
        let claims = Claims {
            exp: issued_at + self.ttl_secs,
            role,
            fingerprint: fingerprint_hash.to_string(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(TokenError::Signing)
    }

    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(TokenError::Rejected)
    }
}
