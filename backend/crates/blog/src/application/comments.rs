//! Comment Use Cases

use std::sync::Arc;

use kernel::id::CommentId;
use platform::escape::escape_html;

use crate::domain::entity::comment::{Comment, DELETED_COMMENT_CONTENT, NewComment};
use crate::domain::repository::{CommentRepository, PostRepository};
use crate::domain::validation::{
    validate_comment_content, validate_id, validate_new_comment,
};
use crate::error::{BlogError, BlogResult};

/// Comment creation input, ids still textual
#[derive(Debug, Clone)]
pub struct CommentInput {
    pub post_id: String,
    pub parent_id: Option<String>,
    pub author: String,
    pub content: String,
}

/// Comment service
pub struct CommentService<C, P>
where
    C: CommentRepository,
    P: PostRepository,
{
    comment_repo: Arc<C>,
    post_repo: Arc<P>,
}

impl<C, P> CommentService<C, P>
where
    C: CommentRepository,
    P: PostRepository,
{
    pub fn new(comment_repo: Arc<C>, post_repo: Arc<P>) -> Self {
        Self {
            comment_repo,
            post_repo,
        }
    }

    /// Replies must target a comment of the same post
    pub async fn create(&self, input: CommentInput) -> BlogResult<Comment> {
        let target = validate_new_comment(
            &input.post_id,
            input.parent_id.as_deref(),
            &input.author,
            &input.content,
        )?;

        if !self.post_repo.exists_by_id(target.post_id).await? {
            return Err(BlogError::InvalidReference(format!(
                "post {} does not exist",
                target.post_id
            )));
        }

        if let Some(parent_id) = target.parent_id {
            let parent = self.comment_repo.get_by_id(parent_id).await?;
            match parent {
                Some(parent) if parent.post_id == target.post_id => {}
                Some(_) => {
                    return Err(BlogError::InvalidReference(format!(
                        "comment {parent_id} belongs to another post"
                    )));
                }
                None => {
                    return Err(BlogError::InvalidReference(format!(
                        "comment {parent_id} does not exist"
                    )));
                }
            }
        }

        let new = NewComment::escaped(
            target.post_id,
            target.parent_id,
            &input.author,
            &input.content,
        );
        let comment = self.comment_repo.save(&new).await?;

        tracing::info!(
            comment_id = %comment.id,
            post_id = %comment.post_id,
            "Comment created"
        );
        Ok(comment)
    }

    pub async fn update(&self, raw_id: &str, content: &str) -> BlogResult<Comment> {
        let id: CommentId = validate_id(raw_id)?;
        validate_comment_content(content)?;

        if !self.comment_repo.exists_by_id(id).await? {
            return Err(BlogError::NoSuchComment);
        }

        let comment = self
            .comment_repo
            .update(id, &escape_html(content))
            .await?
            .ok_or(BlogError::NoSuchComment)?;

        tracing::info!(comment_id = %id, "Comment updated");
        Ok(comment)
    }

    /// Idempotent; a comment with replies is only marked deleted
    pub async fn delete(&self, raw_id: &str) -> BlogResult<()> {
        let id: CommentId = validate_id(raw_id)?;
        self.comment_repo.delete(id, DELETED_COMMENT_CONTENT).await?;

        tracing::info!(comment_id = %id, "Comment deleted");
        Ok(())
    }
}
