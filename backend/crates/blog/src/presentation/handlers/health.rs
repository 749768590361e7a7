use axum::extract::State;
use axum::http::StatusCode;

use crate::domain::repository::{BlogRepository, StoreHealth};
use crate::error::BlogResult;
use crate::presentation::handlers::BlogAppState;

/// GET /api/hc
pub async fn health<R: BlogRepository>(
    State(state): State<BlogAppState<R>>,
) -> BlogResult<StatusCode> {
    state.repo.ping().await?;
    Ok(StatusCode::OK)
}
