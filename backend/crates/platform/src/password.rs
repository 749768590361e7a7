//! Adaptive Hashing and Verification
//!
//! Argon2id hashing shared by two secrets:
//! - user passwords (stored in the `users` table)
//! - session fingerprints (embedded in the bearer token)
//!
//! ## Security Features
//! - Memory-hard hashing with a random 128-bit salt per hash
//! - Constant-time comparison inside the verifier
//! - Zeroization of clear text passwords on drop

use std::fmt;

use argon2::{
    Algorithm, Argon2, Params, PasswordHash, PasswordHasher, PasswordVerifier, Version,
    password_hash::SaltString,
};
use rand::rngs::OsRng;
use thiserror::Error;
use zeroize::{Zeroize, ZeroizeOnDrop};

// ============================================================================
// Error Types
// ============================================================================

/// Hashing errors
#[derive(Debug, Error)]
pub enum HashError {
    /// Cost parameters rejected by Argon2
    #[error("Invalid hash parameters: {0}")]
    InvalidParams(String),

    /// Hashing operation failed
    #[error("Hashing failed: {0}")]
    HashingFailed(String),

    /// Invalid hash format
    #[error("Invalid hash format")]
    InvalidHashFormat,
}

// ============================================================================
// Hash Cost
// ============================================================================

/// Argon2id cost parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HashCost {
    /// Memory in KiB
    pub memory_kib: u32,
    pub iterations: u32,
    pub parallelism: u32,
}

impl Default for HashCost {
    /// OWASP recommended Argon2id parameters: m=19456 (19 MiB), t=2, p=1
    fn default() -> Self {
        Self {
            memory_kib: Params::DEFAULT_M_COST,
            iterations: Params::DEFAULT_T_COST,
            parallelism: Params::DEFAULT_P_COST,
        }
    }
}

impl HashCost {
    /// Smallest cost Argon2 accepts. Tests only.
    pub const fn minimal() -> Self {
        Self {
            memory_kib: Params::MIN_M_COST,
            iterations: Params::MIN_T_COST,
            parallelism: Params::MIN_P_COST,
        }
    }

    fn hasher(&self) -> Result<Argon2<'static>, HashError> {
        let params = Params::new(self.memory_kib, self.iterations, self.parallelism, None)
            .map_err(|e| HashError::InvalidParams(e.to_string()))?;
        Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
    }

    /// Hash a secret into a PHC string
    pub fn hash(&self, secret: &[u8]) -> Result<HashedSecret, HashError> {
        let salt = SaltString::generate(OsRng);

        let hash = self
            .hasher()?
            .hash_password(secret, &salt)
            .map_err(|e| HashError::HashingFailed(e.to_string()))?;

        Ok(HashedSecret {
            hash: hash.to_string(),
        })
    }
}

// ============================================================================
// Clear Text Password (Zeroized on drop)
// ============================================================================

/// Clear text password with automatic memory zeroization
///
/// Does not implement `Clone`; Debug output is redacted.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct ClearTextPassword(String);

impl ClearTextPassword {
    pub fn new(raw: String) -> Self {
        Self(raw)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    /// Hash the password with the given cost
    pub fn hash(&self, cost: &HashCost) -> Result<HashedSecret, HashError> {
        cost.hash(self.as_bytes())
    }
}

impl fmt::Debug for ClearTextPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ClearTextPassword")
            .field(&"[REDACTED]")
            .finish()
    }
}

// ============================================================================
// Hashed Secret (Safe to store)
// ============================================================================

/// Argon2id hash in PHC string format
///
/// The PHC string carries algorithm, version, cost parameters and salt,
/// so verification works regardless of the cost currently configured.
///
/// ## Examples
/// ```rust
/// use platform::password::{ClearTextPassword, HashCost};
///
/// let password = ClearTextPassword::new("Pw-12345678".to_string());
/// let hashed = password.hash(&HashCost::minimal()).unwrap();
/// assert!(hashed.verify(password.as_bytes()));
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct HashedSecret {
    hash: String,
}

impl HashedSecret {
    /// Create from PHC string (e.g., from database or token claims)
    pub fn from_phc_string(s: impl Into<String>) -> Result<Self, HashError> {
        let hash = s.into();

        PasswordHash::new(&hash).map_err(|_| HashError::InvalidHashFormat)?;

        Ok(Self { hash })
    }

    /// Get the PHC string for storage
    pub fn as_phc_string(&self) -> &str {
        &self.hash
    }

    pub fn into_phc_string(self) -> String {
        self.hash
    }

    /// Verify a secret against this hash
    pub fn verify(&self, secret: &[u8]) -> bool {
        let parsed_hash = match PasswordHash::new(&self.hash) {
            Ok(h) => h,
            Err(_) => return false,
        };

        // Parameters come from the PHC string; comparison is constant-time
        Argon2::default()
            .verify_password(secret, &parsed_hash)
            .is_ok()
    }
}

impl fmt::Debug for HashedSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HashedSecret")
            .field("hash", &"[HASH]")
            .finish()
    }
}

// ============================================================================
// Tests
// ============================================================================
