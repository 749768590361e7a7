//! API DTOs (Data Transfer Objects)
//!
//! Missing request fields decode as empty values and are then rejected by
//! the validators with a field-specific code.

use platform::password::ClearTextPassword;
use serde::Deserialize;

use crate::application::{CommentInput, LoginInput, RegisterInput};
use crate::domain::entity::post::{Metadata, PostDraft};

// ============================================================================
// Posts
// ============================================================================

/// Create / update post request
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PostRequest {
    pub title: String,
    pub author: String,
    pub snippet: String,
    pub content: String,
    pub metadata: Metadata,
    pub tags: Vec<String>,
}

impl From<PostRequest> for PostDraft {
    fn from(req: PostRequest) -> Self {
        PostDraft {
            title: req.title,
            author: req.author,
            snippet: req.snippet,
            content: req.content,
            metadata: req.metadata,
            tags: req.tags,
        }
    }
}

/// `GET /api/posts` query
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RangeQuery {
    pub page: Option<String>,
    #[serde(rename = "posts-per-page")]
    pub posts_per_page: Option<String>,
    pub tag: Option<String>,
}

// ============================================================================
// Comments
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CreateCommentRequest {
    #[serde(rename = "postID")]
    pub post_id: String,
    #[serde(rename = "parentID")]
    pub parent_id: Option<String>,
    pub author: String,
    pub content: String,
}

impl From<CreateCommentRequest> for CommentInput {
    fn from(req: CreateCommentRequest) -> Self {
        CommentInput {
            post_id: req.post_id,
            parent_id: req.parent_id,
            author: req.author,
            content: req.content,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct UpdateCommentRequest {
    pub content: String,
}

// ============================================================================
// Tags
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TagRequest {
    pub name: String,
}

// ============================================================================
// Users
// ============================================================================

/// Register request
#[derive(Default, Deserialize)]
#[serde(default)]
pub struct RegisterRequest {
    #[serde(alias = "username")]
    pub login: String,
    pub email: String,
    pub password: String,
}

impl From<RegisterRequest> for RegisterInput {
    fn from(req: RegisterRequest) -> Self {
        RegisterInput {
            username: req.login,
            email: req.email,
            password: ClearTextPassword::new(req.password),
        }
    }
}

/// Login request; identify by `login` or `email`
#[derive(Default, Deserialize)]
#[serde(default)]
pub struct LoginRequest {
    #[serde(alias = "username")]
    pub login: String,
    pub email: String,
    pub password: String,
}

impl From<LoginRequest> for LoginInput {
    fn from(req: LoginRequest) -> Self {
        LoginInput {
            username: req.login,
            email: req.email,
            password: ClearTextPassword::new(req.password),
        }
    }
}
