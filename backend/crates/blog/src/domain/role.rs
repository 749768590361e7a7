use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Role embedded in a session token
///
/// Derived at login from the configured admin list; never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    #[default]
    User,
}

impl Role {
    #[inline]
    pub fn for_username(username: &str, admins: &HashSet<String>) -> Self {
        if admins.contains(username) {
            Role::Admin
        } else {
            Role::User
        }
    }

    #[inline]
    pub const fn code(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::User => "user",
        }
    }

    #[inline]
    pub const fn is_admin(&self) -> bool {
        matches!(self, Role::Admin)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
