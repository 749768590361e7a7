use axum::extract::{Path, State};
use axum::http::StatusCode;
use kernel::envelope::Envelope;

use crate::application::TagService;
use crate::domain::entity::tag::Tag;
use crate::domain::repository::BlogRepository;
use crate::error::BlogResult;
use crate::presentation::dto::TagRequest;
use crate::presentation::extract::JsonBody;
use crate::presentation::handlers::BlogAppState;

/// GET /api/tags
pub async fn list_tags<R: BlogRepository>(
    State(state): State<BlogAppState<R>>,
) -> BlogResult<Envelope<Vec<Tag>>> {
    let tags = TagService::new(state.repo.clone()).list().await?;
    Ok(Envelope::body(tags))
}

/// POST /api/tags
pub async fn create_tag<R: BlogRepository>(
    State(state): State<BlogAppState<R>>,
    JsonBody(req): JsonBody<TagRequest>,
) -> BlogResult<Envelope<Tag>> {
    let tag = TagService::new(state.repo.clone()).create(&req.name).await?;
    Ok(Envelope::body(tag))
}

/// PUT /api/tags/{id}
pub async fn update_tag<R: BlogRepository>(
    State(state): State<BlogAppState<R>>,
    Path(id): Path<String>,
    JsonBody(req): JsonBody<TagRequest>,
) -> BlogResult<Envelope<Tag>> {
    let tag = TagService::new(state.repo.clone())
        .update(&id, &req.name)
        .await?;
    Ok(Envelope::body(tag))
}

/// DELETE /api/tags/{id}
pub async fn delete_tag<R: BlogRepository>(
    State(state): State<BlogAppState<R>>,
    Path(id): Path<String>,
) -> BlogResult<StatusCode> {
    TagService::new(state.repo.clone()).delete(&id).await?;
    Ok(StatusCode::OK)
}
