use axum::extract::rejection::QueryRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use kernel::envelope::Envelope;

use crate::application::{PostService, PostWithComments};
use crate::domain::entity::post::Post;
use crate::domain::repository::BlogRepository;
use crate::domain::validation::{PageRange, ValidationError};
use crate::error::BlogResult;
use crate::presentation::dto::{PostRequest, RangeQuery};
use crate::presentation::extract::JsonBody;
use crate::presentation::handlers::BlogAppState;

fn service<R: BlogRepository>(state: &BlogAppState<R>) -> PostService<R, R, R> {
    PostService::new(state.repo.clone(), state.repo.clone(), state.repo.clone())
}

/// GET /api/posts?page=&posts-per-page=&tag=
pub async fn get_posts<R: BlogRepository>(
    State(state): State<BlogAppState<R>>,
    query: Result<Query<RangeQuery>, QueryRejection>,
) -> BlogResult<Envelope<Vec<Post>>> {
    let Query(query) = query.map_err(|_| ValidationError::InvalidPostsRange)?;
    let range = PageRange::parse(query.page.as_deref(), query.posts_per_page.as_deref())?;

    let posts = service(&state).get_range(range, query.tag.as_deref()).await?;
    Ok(Envelope::body(posts))
}

/// GET /api/posts/{id}
pub async fn get_post<R: BlogRepository>(
    State(state): State<BlogAppState<R>>,
    Path(id): Path<String>,
) -> BlogResult<Envelope<PostWithComments>> {
    let post = service(&state).get_with_comments(&id).await?;
    Ok(Envelope::body(post))
}

/// POST /api/posts
pub async fn create_post<R: BlogRepository>(
    State(state): State<BlogAppState<R>>,
    JsonBody(req): JsonBody<PostRequest>,
) -> BlogResult<(StatusCode, Envelope<Post>)> {
    let post = service(&state).create(req.into()).await?;
    Ok((StatusCode::CREATED, Envelope::body(post)))
}

/// PUT /api/posts/{id}
pub async fn update_post<R: BlogRepository>(
    State(state): State<BlogAppState<R>>,
    Path(id): Path<String>,
    JsonBody(req): JsonBody<PostRequest>,
) -> BlogResult<(StatusCode, Envelope<Post>)> {
    let post = service(&state).update(&id, req.into()).await?;
    Ok((StatusCode::CREATED, Envelope::body(post)))
}

/// DELETE /api/posts/{id}
pub async fn delete_post<R: BlogRepository>(
    State(state): State<BlogAppState<R>>,
    Path(id): Path<String>,
) -> BlogResult<StatusCode> {
    service(&state).delete(&id).await?;
    Ok(StatusCode::OK)
}
