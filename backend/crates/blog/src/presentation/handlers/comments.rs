use axum::extract::{Path, State};
use axum::http::StatusCode;
use kernel::envelope::Envelope;

use crate::application::CommentService;
use crate::domain::entity::comment::Comment;
use crate::domain::repository::BlogRepository;
use crate::error::BlogResult;
use crate::presentation::dto::{CreateCommentRequest, UpdateCommentRequest};
use crate::presentation::extract::JsonBody;
use crate::presentation::handlers::BlogAppState;

fn service<R: BlogRepository>(state: &BlogAppState<R>) -> CommentService<R, R> {
    CommentService::new(state.repo.clone(), state.repo.clone())
}

/// POST /api/comments
pub async fn create_comment<R: BlogRepository>(
    State(state): State<BlogAppState<R>>,
    JsonBody(req): JsonBody<CreateCommentRequest>,
) -> BlogResult<(StatusCode, Envelope<Comment>)> {
    let comment = service(&state).create(req.into()).await?;
    Ok((StatusCode::CREATED, Envelope::body(comment)))
}

/// PUT /api/comments/{id}
pub async fn update_comment<R: BlogRepository>(
    State(state): State<BlogAppState<R>>,
    Path(id): Path<String>,
    JsonBody(req): JsonBody<UpdateCommentRequest>,
) -> BlogResult<(StatusCode, Envelope<Comment>)> {
    let comment = service(&state).update(&id, &req.content).await?;
    Ok((StatusCode::CREATED, Envelope::body(comment)))
}

/// DELETE /api/comments/{id}
pub async fn delete_comment<R: BlogRepository>(
    State(state): State<BlogAppState<R>>,
    Path(id): Path<String>,
) -> BlogResult<StatusCode> {
    service(&state).delete(&id).await?;
    Ok(StatusCode::OK)
}
