//! Post Use Cases
//!
//! Validation, existence checks and tag joining around the post gateway.

use std::sync::Arc;

use kernel::id::PostId;
use serde::Serialize;

use crate::domain::entity::comment::{CommentNode, build_forest};
use crate::domain::entity::post::{Post, PostDraft};
use crate::domain::repository::{CommentRepository, PostRepository, TagRepository};
use crate::domain::validation::{PageRange, validate_id, validate_post};
use crate::error::{BlogError, BlogResult};

/// A post together with its reply forest
#[derive(Debug, Clone, Serialize)]
pub struct PostWithComments {
    #[serde(flatten)]
    pub post: Post,
    pub comments: Vec<CommentNode>,
}

/// Post service
pub struct PostService<P, C, T>
where
    P: PostRepository,
    C: CommentRepository,
    T: TagRepository,
{
    post_repo: Arc<P>,
    comment_repo: Arc<C>,
    tag_repo: Arc<T>,
}

impl<P, C, T> PostService<P, C, T>
where
    P: PostRepository,
    C: CommentRepository,
    T: TagRepository,
{
    pub fn new(post_repo: Arc<P>, comment_repo: Arc<C>, tag_repo: Arc<T>) -> Self {
        Self {
            post_repo,
            comment_repo,
            tag_repo,
        }
    }

    pub async fn create(&self, draft: PostDraft) -> BlogResult<Post> {
        validate_post(&draft)?;

        let mut post = self.post_repo.save(&draft).await?;
        post.tags = self.replace_tags(post.id, &draft).await?;

        tracing::info!(post_id = %post.id, "Post created");
        Ok(post)
    }

    pub async fn update(&self, raw_id: &str, draft: PostDraft) -> BlogResult<Post> {
        let id: PostId = validate_id(raw_id)?;
        validate_post(&draft)?;

        if !self.post_repo.exists_by_id(id).await? {
            return Err(BlogError::NoSuchPost);
        }

        // A concurrent delete can still win between the check and the write
        let mut post = self
            .post_repo
            .update(id, &draft)
            .await?
            .ok_or(BlogError::NoSuchPost)?;
        post.tags = self.replace_tags(post.id, &draft).await?;

        tracing::info!(post_id = %post.id, "Post updated");
        Ok(post)
    }

    /// Idempotent
    pub async fn delete(&self, raw_id: &str) -> BlogResult<()> {
        let id: PostId = validate_id(raw_id)?;
        self.post_repo.delete(id).await?;

        tracing::info!(post_id = %id, "Post deleted");
        Ok(())
    }

    pub async fn get_with_comments(&self, raw_id: &str) -> BlogResult<PostWithComments> {
        let id: PostId = validate_id(raw_id)?;

        let mut post = self
            .post_repo
            .get_by_id(id)
            .await?
            .ok_or(BlogError::PostNotFound)?;
        post.tags = self.tag_repo.get_all_by_post_id(id).await?;

        let comments = self.comment_repo.get_all_by_post_id(id).await?;

        Ok(PostWithComments {
            post,
            comments: build_forest(comments),
        })
    }

    /// Newest-first page, optionally restricted to one tag
    pub async fn get_range(&self, range: PageRange, tag: Option<&str>) -> BlogResult<Vec<Post>> {
        let tag = tag.map(str::trim).filter(|t| !t.is_empty());

        let mut posts = match tag {
            Some(name) => {
                let ids = self.tag_repo.get_all_post_ids_by_tag(name).await?;
                if ids.is_empty() {
                    return Ok(Vec::new());
                }
                self.post_repo.get_range_by_ids(&ids, range).await?
            }
            None => self.post_repo.get_range(range).await?,
        };

        if posts.is_empty() {
            return Ok(posts);
        }

        let ids: Vec<PostId> = posts.iter().map(|p| p.id).collect();
        let mut tags = self.tag_repo.get_all_in_range_of_posts(&ids).await?;
        for post in &mut posts {
            post.tags = tags.remove(&post.id).unwrap_or_default();
        }

        Ok(posts)
    }

    async fn replace_tags(&self, post_id: PostId, draft: &PostDraft) -> BlogResult<Vec<String>> {
        let names = draft.normalized_tags();
        self.tag_repo.save_post_tags(post_id, &names).await?;
        Ok(names)
    }
}
