//! Blog Router
//!
//! Two sites share one listener: the public site and the `admin.` site.
//! The admin site serves every public API route plus the guarded mutations.

use std::any::Any;

use axum::extract::{FromRequestParts, Request, State};
use axum::http::request::Parts;
use axum::middleware::{from_fn, from_fn_with_state};
use axum::response::{IntoResponse, Response};
use axum::{
    Router,
    routing::{get, post, put},
};
use axum_extra::extract::Host;
use kernel::error::app_error::AppError;
use tower::ServiceExt;
use tower_http::catch_panic::CatchPanicLayer;

use crate::application::config::BlogConfig;
use crate::domain::repository::BlogRepository;
use crate::infra::postgres::PgBlogRepository;
use crate::presentation::handlers::{self, BlogAppState};
use crate::presentation::middleware::{require_admin, require_session};

/// Routes open to everyone on both hosts
fn public_api<R: BlogRepository>() -> Router<BlogAppState<R>> {
    Router::new()
        .route("/api/posts", get(handlers::posts::get_posts::<R>))
        .route("/api/posts/{id}", get(handlers::posts::get_post::<R>))
        .route("/api/tags", get(handlers::tags::list_tags::<R>))
        .route("/api/hc", get(handlers::health::health::<R>))
        .route("/api/user/register", post(handlers::users::register::<R>))
        .route("/api/user/login", post(handlers::users::login::<R>))
}

/// Public host: reads, account routes and anonymous comments
pub fn public_router<R: BlogRepository>(state: BlogAppState<R>) -> Router {
    public_api::<R>()
        .route(
            "/api/comments",
            post(handlers::comments::create_comment::<R>),
        )
        .with_state(state)
}

/// Admin host: public reads plus admin-guarded mutations
pub fn admin_router<R: BlogRepository>(state: BlogAppState<R>) -> Router {
    // Layers run outermost-last: session first, then the role check
    let guarded = Router::new()
        .route("/api/posts", post(handlers::posts::create_post::<R>))
        .route(
            "/api/posts/{id}",
            put(handlers::posts::update_post::<R>).delete(handlers::posts::delete_post::<R>),
        )
        .route(
            "/api/comments",
            post(handlers::comments::create_comment::<R>),
        )
        .route(
            "/api/comments/{id}",
            put(handlers::comments::update_comment::<R>)
                .delete(handlers::comments::delete_comment::<R>),
        )
        .route("/api/tags", post(handlers::tags::create_tag::<R>))
        .route(
            "/api/tags/{id}",
            put(handlers::tags::update_tag::<R>).delete(handlers::tags::delete_tag::<R>),
        )
        .route_layer(from_fn(require_admin))
        .route_layer(from_fn_with_state(state.clone(), require_session::<R>));

    public_api::<R>().merge(guarded).with_state(state)
}

/// Create the blog router with PostgreSQL repository
pub fn blog_router(
    repo: PgBlogRepository,
    config: BlogConfig,
    admin_host: impl Into<String>,
) -> Router {
    blog_router_generic(repo, config, admin_host)
}

/// Create a blog router for any repository implementation
///
/// Requests whose host equals `admin_host` (port and case ignored) reach
/// the admin site; everything else reaches the public site.
pub fn blog_router_generic<R: BlogRepository>(
    repo: R,
    config: BlogConfig,
    admin_host: impl Into<String>,
) -> Router {
    let state = BlogAppState::new(repo, config);

    let sites = Sites {
        public: public_router(state.clone()),
        admin: admin_router(state),
        admin_host: admin_host.into().to_ascii_lowercase(),
    };

    Router::new()
        .fallback(dispatch)
        .with_state(sites)
        .layer(CatchPanicLayer::custom(panic_response))
}

#[derive(Clone)]
struct Sites {
    public: Router,
    admin: Router,
    admin_host: String,
}

async fn dispatch(State(sites): State<Sites>, req: Request) -> Response {
    let (mut parts, body) = req.into_parts();
    let is_admin = request_host(&mut parts)
        .await
        .is_some_and(|host| host == sites.admin_host);
    let req = Request::from_parts(parts, body);

    let site = if is_admin { sites.admin } else { sites.public };

    match site.oneshot(req).await {
        Ok(response) => response,
        Err(never) => match never {},
    }
}

/// Host as seen by the client (forwarded headers, `Host`, URI authority)
async fn request_host(parts: &mut Parts) -> Option<String> {
    let Host(raw) = Host::from_request_parts(parts, &()).await.ok()?;
    Some(normalize_host(&raw))
}

/// Drop a numeric port and lowercase
fn normalize_host(raw: &str) -> String {
    let host = match raw.rsplit_once(':') {
        Some((name, port)) if port.chars().all(|c| c.is_ascii_digit()) => name,
        _ => raw,
    };
    host.to_ascii_lowercase()
}

fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = err
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| err.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");

    tracing::error!(panic = %detail, "Handler panicked");
    AppError::internal("handler panicked").into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;

    fn request(host: Option<&str>, uri: &str) -> Request {
        let mut builder = Request::builder().uri(uri);
        if let Some(host) = host {
            builder = builder.header(axum::http::header::HOST, host);
        }
        builder.body(Body::empty()).unwrap()
    }

    async fn host_of(req: Request) -> Option<String> {
        let (mut parts, _) = req.into_parts();
        request_host(&mut parts).await
    }

    #[test]
    fn normalize_strips_port_and_case() {
        assert_eq!(normalize_host("Admin.Example.com:8080"), "admin.example.com");
        assert_eq!(normalize_host("example.com"), "example.com");
    }

    #[tokio::test]
    async fn host_header_is_used() {
        assert_eq!(
            host_of(request(Some("Admin.Example.com:8080"), "/")).await,
            Some("admin.example.com".to_string())
        );
    }

    #[tokio::test]
    async fn forwarded_host_wins_over_host_header() {
        let mut req = request(Some("backend.internal:8080"), "/api/posts");
        req.headers_mut()
            .insert("x-forwarded-host", "admin.example.com".parse().unwrap());
        assert_eq!(host_of(req).await, Some("admin.example.com".to_string()));
    }

    #[tokio::test]
    async fn host_falls_back_to_uri_authority() {
        assert_eq!(
            host_of(request(None, "http://admin.example.com/api/posts")).await,
            Some("admin.example.com".to_string())
        );
        assert_eq!(host_of(request(None, "/api/posts")).await, None);
    }

    async fn boom() -> &'static str {
        panic!("boom")
    }

    #[tokio::test]
    async fn panics_become_technical_errors() {
        let app = Router::new()
            .route("/boom", get(boom))
            .layer(CatchPanicLayer::custom(panic_response));

        let response = app.oneshot(request(None, "/boom")).await.unwrap();
        assert_eq!(response.status(), axum::http::StatusCode::INTERNAL_SERVER_ERROR);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"], "TECHNICAL_ERROR");
        assert!(json["body"].is_null());
    }
}
