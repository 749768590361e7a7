/// Row to insert on registration; the password is already hashed
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
}

/// Looked up by email on login
#[derive(Debug, Clone)]
pub struct StoredCredentials {
    pub username: String,
    pub password_hash: String,
}
