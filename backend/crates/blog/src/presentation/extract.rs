//! Request extractors whose rejections speak the envelope format

use axum::extract::FromRequest;

use crate::error::BlogError;

/// `axum::Json` that rejects with `BAD_BODY`
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(BlogError))]
pub struct JsonBody<T>(pub T);
