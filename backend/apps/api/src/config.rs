//! Server configuration read from the environment

use std::collections::HashSet;
use std::env;

use anyhow::{Context, bail};
use axum::http::Uri;
use blog::BlogConfig;
use sqlx::postgres::PgConnectOptions;

const DEFAULT_DB_HOST: &str = "localhost";
const DEFAULT_DB_PORT: u16 = 5432;
const DEFAULT_SERVER_PORT: u16 = 8080;
const DEFAULT_MAX_CONNECTIONS: u32 = 5;

pub struct ServerConfig {
    pub db_user: String,
    pub db_password: String,
    pub db_name: String,
    pub db_host: String,
    pub db_port: u16,
    pub db_max_connections: u32,
    /// Host part of `DOMAIN`, lowercased
    pub domain_host: String,
    pub jwt_secret: String,
    pub admins: HashSet<String>,
    pub server_port: u16,
}

impl ServerConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let domain = required("DOMAIN")?;
        let uri: Uri = domain
            .parse()
            .with_context(|| format!("DOMAIN is not a valid URL: {domain}"))?;
        let domain_host = uri
            .host()
            .with_context(|| format!("DOMAIN has no host: {domain}"))?
            .to_ascii_lowercase();

        let jwt_secret = required("JWT_SECRET_KEY")?;
        if jwt_secret.trim().is_empty() {
            bail!("JWT_SECRET_KEY must not be empty");
        }

        Ok(Self {
            db_user: required("DB_USER")?,
            db_password: required("DB_PASSWORD")?,
            db_name: required("DB_NAME")?,
            db_host: env::var("DB_HOST").unwrap_or_else(|_| DEFAULT_DB_HOST.to_string()),
            db_port: parsed("DB_PORT", DEFAULT_DB_PORT)?,
            db_max_connections: parsed("DB_MAX_CONNECTIONS", DEFAULT_MAX_CONNECTIONS)?,
            domain_host,
            jwt_secret,
            admins: parse_admins(&env::var("ADMINS").unwrap_or_default()),
            server_port: parsed("SERVER_PORT", DEFAULT_SERVER_PORT)?,
        })
    }

    pub fn admin_host(&self) -> String {
        format!("admin.{}", self.domain_host)
    }

    pub fn connect_options(&self) -> PgConnectOptions {
        PgConnectOptions::new()
            .host(&self.db_host)
            .port(self.db_port)
            .username(&self.db_user)
            .password(&self.db_password)
            .database(&self.db_name)
    }

    pub fn blog_config(&self) -> BlogConfig {
        BlogConfig::new(self.jwt_secret.as_bytes(), self.admins.clone())
    }
}

fn required(name: &str) -> anyhow::Result<String> {
    env::var(name).with_context(|| format!("{name} must be set in environment"))
}

fn parsed<T>(name: &str, default: T) -> anyhow::Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{name} is not valid: {raw}")),
        Err(_) => Ok(default),
    }
}

fn parse_admins(raw: &str) -> HashSet<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}
