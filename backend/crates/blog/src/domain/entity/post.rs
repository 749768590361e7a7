use chrono::{DateTime, Utc};
use kernel::id::PostId;
use serde::{Deserialize, Serialize};

/// Search-engine metadata attached to a post
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    pub description: String,
    #[serde(default)]
    pub keywords: Vec<String>,
}

/// Stored blog post
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Post {
    pub id: PostId,
    pub title: String,
    pub author: String,
    /// Assigned by the store on insert, never updated
    pub date: DateTime<Utc>,
    pub snippet: String,
    pub content: String,
    pub metadata: Metadata,
    /// Tag names; filled by the service, not by the post row
    pub tags: Vec<String>,
}

/// Writable fields of a post (create and update)
#[derive(Debug, Clone, PartialEq)]
pub struct PostDraft {
    pub title: String,
    pub author: String,
    pub snippet: String,
    pub content: String,
    pub metadata: Metadata,
    pub tags: Vec<String>,
}

impl PostDraft {
    /// Tag names trimmed, blanks and repeats dropped, first occurrence kept
    pub fn normalized_tags(&self) -> Vec<String> {
        let mut names: Vec<String> = Vec::with_capacity(self.tags.len());
        for name in self.tags.iter().map(|t| t.trim()).filter(|t| !t.is_empty()) {
            if !names.iter().any(|seen| seen == name) {
                names.push(name.to_string());
            }
        }
        names
    }
}
