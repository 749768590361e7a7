//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.
//! Every write is a single statement; server-assigned fields come back
//! through `RETURNING`.

use std::collections::HashMap;

use kernel::id::{CommentId, PostId, TagId};

use crate::domain::entity::{
    comment::{Comment, NewComment},
    post::{Post, PostDraft},
    tag::Tag,
    user::{NewUser, StoredCredentials},
};
use crate::domain::validation::PageRange;
use crate::error::BlogResult;

/// Post repository trait
///
/// Returned posts carry an empty `tags` list; tags are joined by the service.
#[trait_variant::make(PostRepository: Send)]
pub trait LocalPostRepository {
    /// Insert a post; id and date are assigned by the store
    async fn save(&self, draft: &PostDraft) -> BlogResult<Post>;

    /// Overwrite every field except id and date
    async fn update(&self, id: PostId, draft: &PostDraft) -> BlogResult<Option<Post>>;

    async fn exists_by_id(&self, id: PostId) -> BlogResult<bool>;

    /// Remove the post; comments and tag links cascade
    async fn delete(&self, id: PostId) -> BlogResult<()>;

    async fn get_by_id(&self, id: PostId) -> BlogResult<Option<Post>>;

    /// Newest first
    async fn get_range(&self, range: PageRange) -> BlogResult<Vec<Post>>;

    /// Newest first, restricted to `ids`
    async fn get_range_by_ids(&self, ids: &[PostId], range: PageRange) -> BlogResult<Vec<Post>>;
}

/// Comment repository trait
#[trait_variant::make(CommentRepository: Send)]
pub trait LocalCommentRepository {
    async fn save(&self, comment: &NewComment) -> BlogResult<Comment>;

    /// Replace the content; `content` must already be escaped
    async fn update(&self, id: CommentId, content: &str) -> BlogResult<Option<Comment>>;

    async fn exists_by_id(&self, id: CommentId) -> BlogResult<bool>;

    /// Physically delete a leaf; a comment with replies is kept, flagged
    /// deleted and its content replaced by `notice`
    async fn delete(&self, id: CommentId, notice: &str) -> BlogResult<()>;

    async fn get_by_id(&self, id: CommentId) -> BlogResult<Option<Comment>>;

    /// Ascending by id
    async fn get_all_by_post_id(&self, post_id: PostId) -> BlogResult<Vec<Comment>>;
}

/// Tag repository trait
#[trait_variant::make(TagRepository: Send)]
pub trait LocalTagRepository {
    async fn save(&self, name: &str) -> BlogResult<Tag>;

    async fn update(&self, id: TagId, name: &str) -> BlogResult<Option<Tag>>;

    /// Links to posts cascade
    async fn delete_by_id(&self, id: TagId) -> BlogResult<()>;

    /// Newest id first
    async fn get_all(&self) -> BlogResult<Vec<Tag>>;

    async fn get_all_by_post_id(&self, post_id: PostId) -> BlogResult<Vec<String>>;

    /// Tag names per post for a page of posts
    async fn get_all_in_range_of_posts(
        &self,
        post_ids: &[PostId],
    ) -> BlogResult<HashMap<PostId, Vec<String>>>;

    async fn get_all_post_ids_by_tag(&self, name: &str) -> BlogResult<Vec<PostId>>;

    /// Make `names` exactly the post's tags, creating unknown names
    async fn save_post_tags(&self, post_id: PostId, names: &[String]) -> BlogResult<()>;
}

/// User repository trait
#[trait_variant::make(UserRepository: Send)]
pub trait LocalUserRepository {
    async fn save(&self, user: &NewUser) -> BlogResult<()>;

    async fn exists_by_username_or_email(&self, username: &str, email: &str) -> BlogResult<bool>;

    /// Stored password hash (PHC string)
    async fn get_password_by_username(&self, username: &str) -> BlogResult<Option<String>>;

    async fn get_username_and_password_by_email(
        &self,
        email: &str,
    ) -> BlogResult<Option<StoredCredentials>>;
}

/// Store liveness probe
#[trait_variant::make(StoreHealth: Send)]
pub trait LocalStoreHealth {
    async fn ping(&self) -> BlogResult<()>;
}

/// Everything the HTTP layer needs from one store handle
pub trait BlogRepository:
    PostRepository
    + CommentRepository
    + TagRepository
    + UserRepository
    + StoreHealth
    + Clone
    + Send
    + Sync
    + 'static
{
}

impl<R> BlogRepository for R where
    R: PostRepository
        + CommentRepository
        + TagRepository
        + UserRepository
        + StoreHealth
        + Clone
        + Send
        + Sync
        + 'static
{
}
