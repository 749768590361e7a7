//! Blog Middleware
//!
//! Guarded routes run, in order: token check, fingerprint check, role check.

use axum::extract::{Request, State};
use axum::http::{HeaderMap, header};
use axum::middleware::Next;
use axum::response::Response;
use platform::cookie::extract_cookie;

use crate::application::AuthenticateUseCase;
use crate::domain::repository::BlogRepository;
use crate::domain::role::Role;
use crate::error::BlogError;
use crate::presentation::handlers::BlogAppState;

/// Role of an authenticated caller, stored in request extensions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallerRole(pub Role);

/// `Authorization: Bearer <token>`; the scheme is case-insensitive
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;

    if scheme.eq_ignore_ascii_case("bearer") {
        Some(token.trim()).filter(|token| !token.is_empty())
    } else {
        None
    }
}

/// Middleware that requires a valid token and its fingerprint cookie
pub async fn require_session<R: BlogRepository>(
    State(state): State<BlogAppState<R>>,
    mut req: Request,
    next: Next,
) -> Result<Response, BlogError> {
    let headers = req.headers();
    let token = bearer_token(headers).map(str::to_owned);
    let fingerprint = extract_cookie(headers, &state.config.fingerprint_cookie_name);

    let role = AuthenticateUseCase::new(state.tokens.clone())
        .execute(token.as_deref(), fingerprint.as_deref())
        .await?;

    req.extensions_mut().insert(CallerRole(role));
    Ok(next.run(req).await)
}

/// Middleware that requires the admin role; runs after `require_session`
pub async fn require_admin(req: Request, next: Next) -> Result<Response, BlogError> {
    match req.extensions().get::<CallerRole>() {
        Some(CallerRole(role)) if role.is_admin() => Ok(next.run(req).await),
        Some(CallerRole(role)) => {
            tracing::debug!(role = %role, path = %req.uri().path(), "Mutation denied");
            Err(BlogError::NoPermissions)
        }
        None => Err(BlogError::InvalidToken),
    }
}
