//! Tag Use Cases

use std::sync::Arc;

use kernel::id::TagId;

use crate::domain::entity::tag::Tag;
use crate::domain::repository::TagRepository;
use crate::domain::validation::validate_id;
use crate::error::{BlogError, BlogResult};

/// Tag service
pub struct TagService<T: TagRepository> {
    tag_repo: Arc<T>,
}

impl<T: TagRepository> TagService<T> {
    pub fn new(tag_repo: Arc<T>) -> Self {
        Self { tag_repo }
    }

    pub async fn create(&self, name: &str) -> BlogResult<Tag> {
        let name = Self::clean_name(name)?;

        let tag = self
            .tag_repo
            .save(name)
            .await
            .map_err(Self::claim_duplicate)?;

        tracing::info!(tag_id = %tag.id, "Tag created");
        Ok(tag)
    }

    pub async fn update(&self, raw_id: &str, name: &str) -> BlogResult<Tag> {
        let id: TagId = validate_id(raw_id)?;
        let name = Self::clean_name(name)?;

        let tag = self
            .tag_repo
            .update(id, name)
            .await
            .map_err(Self::claim_duplicate)?
            .ok_or_else(|| BlogError::InvalidReference(format!("tag {id} does not exist")))?;

        tracing::info!(tag_id = %id, "Tag updated");
        Ok(tag)
    }

    /// Idempotent
    pub async fn delete(&self, raw_id: &str) -> BlogResult<()> {
        let id: TagId = validate_id(raw_id)?;
        self.tag_repo.delete_by_id(id).await?;

        tracing::info!(tag_id = %id, "Tag deleted");
        Ok(())
    }

    pub async fn list(&self) -> BlogResult<Vec<Tag>> {
        self.tag_repo.get_all().await
    }

    fn clean_name(name: &str) -> BlogResult<&str> {
        let name = name.trim();
        if name.is_empty() {
            return Err(BlogError::BadBody("tag name is empty".to_string()));
        }
        Ok(name)
    }

    fn claim_duplicate(err: BlogError) -> BlogError {
        match err {
            BlogError::Duplicate(_) => BlogError::TagAlreadyExists,
            other => other,
        }
    }
}
