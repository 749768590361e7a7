//! Error conversions - store classification and HTTP rendering
//!
//! - [`is_unique_violation`] separates duplicate keys from every other store failure
//! - [`AppError`] renders as an `{error, body}` envelope

#[cfg(feature = "axum")]
use super::app_error::AppError;

// ============================================================================
// SQLx classification (feature-gated)
// ============================================================================

/// PostgreSQL: Class 23 — unique_violation
/// https://www.postgresql.org/docs/current/errcodes-appendix.html
#[cfg(feature = "sqlx")]
pub const UNIQUE_VIOLATION: &str = "23505";

/// 一意制約違反かどうかを判定
///
/// 重複キーはドメイン固有のコード（`TAG_ALREADY_EXISTS` など）に変換されるため、
/// それ以外のストアエラーと区別できる必要があります。
#[cfg(feature = "sqlx")]
pub fn is_unique_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => db_err
            .code()
            .is_some_and(|code| code.as_ref() == UNIQUE_VIOLATION),
        _ => false,
    }
}

// ============================================================================
// Axum conversions (feature-gated)
// ============================================================================

#[cfg(feature = "axum")]
impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        use axum::http::StatusCode;

        use crate::envelope::Envelope;

        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        (status, Envelope::error(self.code())).into_response()
    }
}
