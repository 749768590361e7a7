//! Application Configuration
//!
//! Configuration for the blog application layer.

use std::collections::HashSet;
use std::time::Duration;

use platform::cookie::CookieConfig;
use platform::crypto::random_bytes;
use platform::password::HashCost;

/// Fingerprint cookie; HttpOnly
pub const FINGERPRINT_COOKIE: &str = "Secure-Fgp";
/// Username cookie read by the page renderer; not HttpOnly
pub const LOGIN_COOKIE: &str = "Login";

/// Blog application configuration
#[derive(Clone)]
pub struct BlogConfig {
    /// HMAC-SHA-256 key for session tokens
    pub token_secret: Vec<u8>,
    /// Usernames that receive the admin role at login
    pub admins: HashSet<String>,
    /// Token expiry and cookie max age (1 hour)
    pub session_ttl: Duration,
    pub fingerprint_cookie_name: String,
    pub login_cookie_name: String,
    /// Whether cookies carry `Secure`
    pub cookie_secure: bool,
    /// Cost for password and fingerprint hashing
    pub hash_cost: HashCost,
}

impl Default for BlogConfig {
    fn default() -> Self {
        Self {
            token_secret: Vec::new(),
            admins: HashSet::new(),
            session_ttl: Duration::from_secs(3600),
            fingerprint_cookie_name: FINGERPRINT_COOKIE.to_string(),
            login_cookie_name: LOGIN_COOKIE.to_string(),
            cookie_secure: true,
            hash_cost: HashCost::default(),
        }
    }
}

impl BlogConfig {
    pub fn new(token_secret: impl Into<Vec<u8>>, admins: HashSet<String>) -> Self {
        Self {
            token_secret: token_secret.into(),
            admins,
            ..Default::default()
        }
    }

    /// Random secret, cheap hashing, insecure cookies
    pub fn development() -> Self {
        Self {
            token_secret: random_bytes(32),
            cookie_secure: false,
            hash_cost: HashCost::minimal(),
            ..Default::default()
        }
    }

    pub fn with_admins<I, S>(mut self, admins: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.admins = admins.into_iter().map(Into::into).collect();
        self
    }

    pub fn session_ttl_secs(&self) -> i64 {
        self.session_ttl.as_secs() as i64
    }

    pub fn fingerprint_cookie(&self) -> CookieConfig {
        CookieConfig::site_wide(&self.fingerprint_cookie_name, self.session_ttl_secs())
            .with_secure(self.cookie_secure)
    }

    pub fn login_cookie(&self) -> CookieConfig {
        CookieConfig::site_wide(&self.login_cookie_name, self.session_ttl_secs())
            .script_visible()
            .with_secure(self.cookie_secure)
    }
}

impl std::fmt::Debug for BlogConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BlogConfig")
            .field("token_secret", &"[REDACTED]")
            .field("admins", &self.admins)
            .field("session_ttl", &self.session_ttl)
            .field("cookie_secure", &self.cookie_secure)
            .field("hash_cost", &self.hash_cost)
            .finish_non_exhaustive()
    }
}
