//! HTTP Handlers

pub mod comments;
pub mod health;
pub mod posts;
pub mod tags;
pub mod users;

use std::sync::Arc;

use crate::application::config::BlogConfig;
use crate::application::token::TokenService;
use crate::domain::repository::BlogRepository;

/// Shared state for blog handlers
#[derive(Clone)]
pub struct BlogAppState<R>
where
    R: BlogRepository,
{
    pub repo: Arc<R>,
    pub config: Arc<BlogConfig>,
    pub tokens: Arc<TokenService>,
}

impl<R> BlogAppState<R>
where
    R: BlogRepository,
{
    pub fn new(repo: R, config: BlogConfig) -> Self {
        let tokens = TokenService::new(&config);
        Self {
            repo: Arc::new(repo),
            config: Arc::new(config),
            tokens: Arc::new(tokens),
        }
    }
}
