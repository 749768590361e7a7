//! PostgreSQL Repository Implementations
//!
//! Every operation is one statement. Writes return the stored row through
//! `RETURNING`; cascades are left to the foreign keys.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use kernel::id::{CommentId, PostId, TagId};
use sqlx::PgPool;
use sqlx::types::Json;

use crate::domain::entity::{
    comment::{Comment, NewComment},
    post::{Metadata, Post, PostDraft},
    tag::Tag,
    user::{NewUser, StoredCredentials},
};
use crate::domain::repository::{
    CommentRepository, PostRepository, StoreHealth, TagRepository, UserRepository,
};
use crate::domain::validation::PageRange;
use crate::error::{BlogError, BlogResult};

/// PostgreSQL-backed blog repository
#[derive(Clone)]
pub struct PgBlogRepository {
    pool: PgPool,
}

impl PgBlogRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

fn ids_of<T>(ids: &[kernel::id::Id<T>]) -> Vec<i64> {
    ids.iter().map(|id| id.get()).collect()
}

// ============================================================================
// Post Repository Implementation
// ============================================================================

impl PostRepository for PgBlogRepository {
    async fn save(&self, draft: &PostDraft) -> BlogResult<Post> {
        let row = sqlx::query_as::<_, PostRow>(
            r#"
            INSERT INTO posts (title, author, snippet, content, metadata)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, title, author, date, snippet, content, metadata
            "#,
        )
        .bind(&draft.title)
        .bind(&draft.author)
        .bind(&draft.snippet)
        .bind(&draft.content)
        .bind(Json(&draft.metadata))
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into_post())
    }

    async fn update(&self, id: PostId, draft: &PostDraft) -> BlogResult<Option<Post>> {
        let row = sqlx::query_as::<_, PostRow>(
            r#"
            UPDATE posts
            SET title = $2, author = $3, snippet = $4, content = $5, metadata = $6
            WHERE id = $1
            RETURNING id, title, author, date, snippet, content, metadata
            "#,
        )
        .bind(id.get())
        .bind(&draft.title)
        .bind(&draft.author)
        .bind(&draft.snippet)
        .bind(&draft.content)
        .bind(Json(&draft.metadata))
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(PostRow::into_post))
    }

    async fn exists_by_id(&self, id: PostId) -> BlogResult<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM posts WHERE id = $1)",
        )
        .bind(id.get())
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn delete(&self, id: PostId) -> BlogResult<()> {
        sqlx::query("DELETE FROM posts WHERE id = $1")
            .bind(id.get())
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn get_by_id(&self, id: PostId) -> BlogResult<Option<Post>> {
        let row = sqlx::query_as::<_, PostRow>(
            r#"
            SELECT id, title, author, date, snippet, content, metadata
            FROM posts
            WHERE id = $1
            "#,
        )
        .bind(id.get())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(PostRow::into_post))
    }

    async fn get_range(&self, range: PageRange) -> BlogResult<Vec<Post>> {
        let rows = sqlx::query_as::<_, PostRow>(
            r#"
            SELECT id, title, author, date, snippet, content, metadata
            FROM posts
            ORDER BY date DESC, id DESC
            OFFSET $1
            LIMIT $2
            "#,
        )
        .bind(range.offset()?)
        .bind(range.limit())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(PostRow::into_post).collect())
    }

    async fn get_range_by_ids(&self, ids: &[PostId], range: PageRange) -> BlogResult<Vec<Post>> {
        let rows = sqlx::query_as::<_, PostRow>(
            r#"
            SELECT id, title, author, date, snippet, content, metadata
            FROM posts
            WHERE id = ANY($1)
            ORDER BY date DESC, id DESC
            OFFSET $2
            LIMIT $3
            "#,
        )
        .bind(ids_of(ids))
        .bind(range.offset()?)
        .bind(range.limit())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(PostRow::into_post).collect())
    }
}

// ============================================================================
// Comment Repository Implementation
// ============================================================================

impl CommentRepository for PgBlogRepository {
    async fn save(&self, comment: &NewComment) -> BlogResult<Comment> {
        let row = sqlx::query_as::<_, CommentRow>(
            r#"
            INSERT INTO comments (post_id, parent_id, author, content)
            VALUES ($1, $2, $3, $4)
            RETURNING id, post_id, parent_id, author, date, content, deleted
            "#,
        )
        .bind(comment.post_id().get())
        .bind(comment.parent_id().map(|id| id.get()))
        .bind(comment.author())
        .bind(comment.content())
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into_comment())
    }

    async fn update(&self, id: CommentId, content: &str) -> BlogResult<Option<Comment>> {
        let row = sqlx::query_as::<_, CommentRow>(
            r#"
            UPDATE comments
            SET content = $2
            WHERE id = $1
            RETURNING id, post_id, parent_id, author, date, content, deleted
            "#,
        )
        .bind(id.get())
        .bind(content)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(CommentRow::into_comment))
    }

    async fn exists_by_id(&self, id: CommentId) -> BlogResult<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM comments WHERE id = $1)",
        )
        .bind(id.get())
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn delete(&self, id: CommentId, notice: &str) -> BlogResult<()> {
        // Both branches see the same snapshot, so exactly one of them applies
        sqlx::query(
            r#"
            WITH marked AS (
                UPDATE comments
                SET deleted = TRUE, content = $2
                WHERE id = $1
                  AND EXISTS (SELECT 1 FROM comments WHERE parent_id = $1)
                RETURNING id
            )
            DELETE FROM comments
            WHERE id = $1
              AND NOT EXISTS (SELECT 1 FROM comments WHERE parent_id = $1)
            "#,
        )
        .bind(id.get())
        .bind(notice)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn get_by_id(&self, id: CommentId) -> BlogResult<Option<Comment>> {
        let row = sqlx::query_as::<_, CommentRow>(
            r#"
            SELECT id, post_id, parent_id, author, date, content, deleted
            FROM comments
            WHERE id = $1
            "#,
        )
        .bind(id.get())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(CommentRow::into_comment))
    }

    async fn get_all_by_post_id(&self, post_id: PostId) -> BlogResult<Vec<Comment>> {
        let rows = sqlx::query_as::<_, CommentRow>(
            r#"
            SELECT id, post_id, parent_id, author, date, content, deleted
            FROM comments
            WHERE post_id = $1
            ORDER BY id ASC
            "#,
        )
        .bind(post_id.get())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(CommentRow::into_comment).collect())
    }
}

// ============================================================================
// Tag Repository Implementation
// ============================================================================

impl TagRepository for PgBlogRepository {
    async fn save(&self, name: &str) -> BlogResult<Tag> {
        let row = sqlx::query_as::<_, TagRow>(
            "INSERT INTO tags (tag) VALUES ($1) RETURNING tag_id, tag",
        )
        .bind(name)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into_tag())
    }

    async fn update(&self, id: TagId, name: &str) -> BlogResult<Option<Tag>> {
        let row = sqlx::query_as::<_, TagRow>(
            "UPDATE tags SET tag = $2 WHERE tag_id = $1 RETURNING tag_id, tag",
        )
        .bind(id.get())
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(TagRow::into_tag))
    }

    async fn delete_by_id(&self, id: TagId) -> BlogResult<()> {
        sqlx::query("DELETE FROM tags WHERE tag_id = $1")
            .bind(id.get())
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn get_all(&self) -> BlogResult<Vec<Tag>> {
        let rows = sqlx::query_as::<_, TagRow>(
            "SELECT tag_id, tag FROM tags ORDER BY tag_id DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(TagRow::into_tag).collect())
    }

    async fn get_all_by_post_id(&self, post_id: PostId) -> BlogResult<Vec<String>> {
        let names = sqlx::query_scalar::<_, String>(
            r#"
            SELECT t.tag
            FROM post_tags pt
            JOIN tags t ON t.tag_id = pt.tag_id
            WHERE pt.post_id = $1
            ORDER BY t.tag_id
            "#,
        )
        .bind(post_id.get())
        .fetch_all(&self.pool)
        .await?;

        Ok(names)
    }

    async fn get_all_in_range_of_posts(
        &self,
        post_ids: &[PostId],
    ) -> BlogResult<HashMap<PostId, Vec<String>>> {
        let rows = sqlx::query_as::<_, (i64, String)>(
            r#"
            SELECT pt.post_id, t.tag
            FROM post_tags pt
            JOIN tags t ON t.tag_id = pt.tag_id
            WHERE pt.post_id = ANY($1)
            ORDER BY pt.post_id, t.tag_id
            "#,
        )
        .bind(ids_of(post_ids))
        .fetch_all(&self.pool)
        .await?;

        let mut tags: HashMap<PostId, Vec<String>> = HashMap::new();
        for (post_id, name) in rows {
            tags.entry(PostId::new(post_id)).or_default().push(name);
        }
        Ok(tags)
    }

    async fn get_all_post_ids_by_tag(&self, name: &str) -> BlogResult<Vec<PostId>> {
        let ids = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT pt.post_id
            FROM post_tags pt
            JOIN tags t ON t.tag_id = pt.tag_id
            WHERE t.tag = $1
            "#,
        )
        .bind(name)
        .fetch_all(&self.pool)
        .await?;

        Ok(ids.into_iter().map(PostId::new).collect())
    }

    async fn save_post_tags(&self, post_id: PostId, names: &[String]) -> BlogResult<()> {
        // Rows inserted by `new_tags` are invisible to the other CTEs,
        // hence the union with its RETURNING set.
        sqlx::query(
            r#"
            WITH new_tags AS (
                INSERT INTO tags (tag)
                SELECT unnest($2::text[])
                ON CONFLICT (tag) DO NOTHING
                RETURNING tag_id
            ),
            wanted AS (
                SELECT tag_id FROM tags WHERE tag = ANY($2::text[])
                UNION
                SELECT tag_id FROM new_tags
            ),
            cleared AS (
                DELETE FROM post_tags
                WHERE post_id = $1
                  AND tag_id NOT IN (SELECT tag_id FROM wanted)
            )
            INSERT INTO post_tags (post_id, tag_id)
            SELECT $1, tag_id FROM wanted
            ON CONFLICT DO NOTHING
            "#,
        )
        .bind(post_id.get())
        .bind(names)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

// ============================================================================
// User Repository Implementation
// ============================================================================

impl UserRepository for PgBlogRepository {
    async fn save(&self, user: &NewUser) -> BlogResult<()> {
        sqlx::query("INSERT INTO users (username, email, password) VALUES ($1, $2, $3)")
            .bind(&user.username)
            .bind(&user.email)
            .bind(&user.password_hash)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn exists_by_username_or_email(&self, username: &str, email: &str) -> BlogResult<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM users WHERE username = $1 OR email = $2)",
        )
        .bind(username)
        .bind(email)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn get_password_by_username(&self, username: &str) -> BlogResult<Option<String>> {
        let hash = sqlx::query_scalar::<_, String>(
            "SELECT password FROM users WHERE username = $1",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(hash)
    }

    async fn get_username_and_password_by_email(
        &self,
        email: &str,
    ) -> BlogResult<Option<StoredCredentials>> {
        let row = sqlx::query_as::<_, (String, String)>(
            "SELECT username, password FROM users WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|(username, password_hash)| StoredCredentials {
            username,
            password_hash,
        }))
    }
}

// ============================================================================
// Health
// ============================================================================

impl StoreHealth for PgBlogRepository {
    async fn ping(&self) -> BlogResult<()> {
        sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map_err(BlogError::Unavailable)?;

        Ok(())
    }
}

// ============================================================================
// Row Types
// ============================================================================

#[derive(sqlx::FromRow)]
struct PostRow {
    id: i64,
    title: String,
    author: String,
    date: DateTime<Utc>,
    snippet: String,
    content: String,
    metadata: Json<Metadata>,
}

impl PostRow {
    fn into_post(self) -> Post {
        Post {
            id: PostId::new(self.id),
            title: self.title,
            author: self.author,
            date: self.date,
            snippet: self.snippet,
            content: self.content,
            metadata: self.metadata.0,
            tags: Vec::new(),
        }
    }
}

#[derive(sqlx::FromRow)]
struct CommentRow {
    id: i64,
    post_id: i64,
    parent_id: Option<i64>,
    author: String,
    date: DateTime<Utc>,
    content: String,
    deleted: bool,
}

impl CommentRow {
    fn into_comment(self) -> Comment {
        Comment {
            id: CommentId::new(self.id),
            post_id: PostId::new(self.post_id),
            parent_id: self.parent_id.map(CommentId::new),
            author: self.author,
            date: self.date,
            content: self.content,
            deleted: self.deleted,
        }
    }
}

#[derive(sqlx::FromRow)]
struct TagRow {
    tag_id: i64,
    tag: String,
}

impl TagRow {
    fn into_tag(self) -> Tag {
        Tag {
            id: TagId::new(self.tag_id),
            name: self.tag,
        }
    }
}
