//! Response Envelope
//!
//! Every JSON reply has exactly two keys, `error` and `body`. Only one of
//! them is meaningful in a given response; the other is `null`.

use serde::Serialize;

use crate::error::code::ErrorCode;

/// `{error, body}` レスポンスコンテナ
///
/// ## Examples
/// ```rust
/// use kernel::envelope::Envelope;
/// use kernel::error::code::ErrorCode;
///
/// let ok = serde_json::to_value(Envelope::body("token")).unwrap();
/// assert_eq!(ok, serde_json::json!({ "error": null, "body": "token" }));
///
/// let err = serde_json::to_value(Envelope::error(ErrorCode::InvalidToken)).unwrap();
/// assert_eq!(err, serde_json::json!({ "error": "INVALID_TOKEN", "body": null }));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Envelope<T> {
    pub error: Option<ErrorCode>,
    pub body: Option<T>,
}

impl<T> Envelope<T> {
    /// Successful reply carrying a payload
    pub fn body(body: T) -> Self {
        Self {
            error: None,
            body: Some(body),
        }
    }
}

impl Envelope<()> {
    /// Failed reply carrying a machine readable code
    pub fn error(code: ErrorCode) -> Self {
        Self {
            error: Some(code),
            body: None,
        }
    }
}

#[cfg(feature = "axum")]
impl<T: Serialize> axum::response::IntoResponse for Envelope<T> {
    fn into_response(self) -> axum::response::Response {
        axum::Json(self).into_response()
    }
}
