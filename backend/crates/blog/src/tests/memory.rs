//! In-memory repository driving the routers in tests

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::Utc;
use kernel::id::{CommentId, PostId, TagId};

use crate::domain::entity::{
    comment::{Comment, NewComment},
    post::{Post, PostDraft},
    tag::Tag,
    user::{NewUser, StoredCredentials},
};
use crate::domain::repository::{
    CommentRepository, PostRepository, StoreHealth, TagRepository, UserRepository,
};
use crate::domain::validation::PageRange;
use crate::error::{BlogError, BlogResult};

#[derive(Default)]
struct MemoryState {
    posts: BTreeMap<i64, Post>,
    comments: BTreeMap<i64, Comment>,
    tags: BTreeMap<i64, String>,
    post_tags: BTreeSet<(i64, i64)>,
    users: Vec<NewUser>,
    last_id: i64,
    unavailable: bool,
}

impl MemoryState {
    fn next_id(&mut self) -> i64 {
        self.last_id += 1;
        self.last_id
    }

    fn tag_id(&self, name: &str) -> Option<i64> {
        self.tags
            .iter()
            .find_map(|(id, tag)| (tag == name).then_some(*id))
    }

    fn newest_first<'a>(
        &self,
        posts: impl Iterator<Item = &'a Post>,
        range: PageRange,
    ) -> BlogResult<Vec<Post>> {
        let mut posts: Vec<Post> = posts.cloned().collect();
        posts.sort_by(|a, b| (b.date, b.id).cmp(&(a.date, a.id)));

        let offset = usize::try_from(range.offset()?).unwrap_or(usize::MAX);
        let limit = usize::try_from(range.limit()).unwrap_or(0);
        Ok(posts.into_iter().skip(offset).take(limit).collect())
    }
}

/// Shares state between clones, like a pool
#[derive(Clone, Default)]
pub struct InMemoryBlogRepository {
    state: Arc<Mutex<MemoryState>>,
}

impl InMemoryBlogRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, MemoryState> {
        self.state.lock().unwrap()
    }

    /// Make `ping` fail
    pub fn set_unavailable(&self, unavailable: bool) {
        self.lock().unavailable = unavailable;
    }

    pub fn comment(&self, id: i64) -> Option<Comment> {
        self.lock().comments.get(&id).cloned()
    }

    pub fn stored_password(&self, username: &str) -> Option<String> {
        self.lock()
            .users
            .iter()
            .find(|u| u.username == username)
            .map(|u| u.password_hash.clone())
    }
}

fn duplicate(what: &str) -> BlogError {
    BlogError::Duplicate(format!("duplicate key value violates unique constraint on {what}"))
}

impl PostRepository for InMemoryBlogRepository {
    async fn save(&self, draft: &PostDraft) -> BlogResult<Post> {
        let mut state = self.lock();
        let id = state.next_id();
        let post = Post {
            id: PostId::new(id),
            title: draft.title.clone(),
            author: draft.author.clone(),
            date: Utc::now(),
            snippet: draft.snippet.clone(),
            content: draft.content.clone(),
            metadata: draft.metadata.clone(),
            tags: Vec::new(),
        };
        state.posts.insert(id, post.clone());
        Ok(post)
    }

    async fn update(&self, id: PostId, draft: &PostDraft) -> BlogResult<Option<Post>> {
        let mut state = self.lock();
        Ok(state.posts.get_mut(&id.get()).map(|post| {
            post.title = draft.title.clone();
            post.author = draft.author.clone();
            post.snippet = draft.snippet.clone();
            post.content = draft.content.clone();
            post.metadata = draft.metadata.clone();
            post.clone()
        }))
    }

    async fn exists_by_id(&self, id: PostId) -> BlogResult<bool> {
        Ok(self.lock().posts.contains_key(&id.get()))
    }

    async fn delete(&self, id: PostId) -> BlogResult<()> {
        let mut state = self.lock();
        state.posts.remove(&id.get());
        state.comments.retain(|_, c| c.post_id != id);
        state.post_tags.retain(|(post_id, _)| *post_id != id.get());
        Ok(())
    }

    async fn get_by_id(&self, id: PostId) -> BlogResult<Option<Post>> {
        Ok(self.lock().posts.get(&id.get()).cloned())
    }

    async fn get_range(&self, range: PageRange) -> BlogResult<Vec<Post>> {
        let state = self.lock();
        state.newest_first(state.posts.values(), range)
    }

    async fn get_range_by_ids(&self, ids: &[PostId], range: PageRange) -> BlogResult<Vec<Post>> {
        let state = self.lock();
        state.newest_first(state.posts.values().filter(|p| ids.contains(&p.id)), range)
    }
}

impl CommentRepository for InMemoryBlogRepository {
    async fn save(&self, comment: &NewComment) -> BlogResult<Comment> {
        let mut state = self.lock();
        let id = state.next_id();
        let stored = Comment {
            id: CommentId::new(id),
            post_id: comment.post_id(),
            parent_id: comment.parent_id(),
            author: comment.author().to_string(),
            date: Utc::now(),
            content: comment.content().to_string(),
            deleted: false,
        };
        state.comments.insert(id, stored.clone());
        Ok(stored)
    }

    async fn update(&self, id: CommentId, content: &str) -> BlogResult<Option<Comment>> {
        let mut state = self.lock();
        Ok(state.comments.get_mut(&id.get()).map(|comment| {
            comment.content = content.to_string();
            comment.clone()
        }))
    }

    async fn exists_by_id(&self, id: CommentId) -> BlogResult<bool> {
        Ok(self.lock().comments.contains_key(&id.get()))
    }

    async fn delete(&self, id: CommentId, notice: &str) -> BlogResult<()> {
        let mut state = self.lock();
        let has_children = state
            .comments
            .values()
            .any(|c| c.parent_id == Some(id));

        if has_children {
            if let Some(comment) = state.comments.get_mut(&id.get()) {
                comment.deleted = true;
                comment.content = notice.to_string();
            }
        } else {
            state.comments.remove(&id.get());
        }
        Ok(())
    }

    async fn get_by_id(&self, id: CommentId) -> BlogResult<Option<Comment>> {
        Ok(self.lock().comments.get(&id.get()).cloned())
    }

    async fn get_all_by_post_id(&self, post_id: PostId) -> BlogResult<Vec<Comment>> {
        Ok(self
            .lock()
            .comments
            .values()
            .filter(|c| c.post_id == post_id)
            .cloned()
            .collect())
    }
}

impl TagRepository for InMemoryBlogRepository {
    async fn save(&self, name: &str) -> BlogResult<Tag> {
        let mut state = self.lock();
        if state.tag_id(name).is_some() {
            return Err(duplicate("tags.tag"));
        }
        let id = state.next_id();
        state.tags.insert(id, name.to_string());
        Ok(Tag {
            id: TagId::new(id),
            name: name.to_string(),
        })
    }

    async fn update(&self, id: TagId, name: &str) -> BlogResult<Option<Tag>> {
        let mut state = self.lock();
        if state.tag_id(name).is_some_and(|existing| existing != id.get()) {
            return Err(duplicate("tags.tag"));
        }
        Ok(state.tags.get_mut(&id.get()).map(|tag| {
            *tag = name.to_string();
            Tag {
                id,
                name: name.to_string(),
            }
        }))
    }

    async fn delete_by_id(&self, id: TagId) -> BlogResult<()> {
        let mut state = self.lock();
        state.tags.remove(&id.get());
        state.post_tags.retain(|(_, tag_id)| *tag_id != id.get());
        Ok(())
    }

    async fn get_all(&self) -> BlogResult<Vec<Tag>> {
        Ok(self
            .lock()
            .tags
            .iter()
            .rev()
            .map(|(id, name)| Tag {
                id: TagId::new(*id),
                name: name.clone(),
            })
            .collect())
    }

    async fn get_all_by_post_id(&self, post_id: PostId) -> BlogResult<Vec<String>> {
        let state = self.lock();
        Ok(state
            .tags
            .iter()
            .filter(|(id, _)| state.post_tags.contains(&(post_id.get(), **id)))
            .map(|(_, name)| name.clone())
            .collect())
    }

    async fn get_all_in_range_of_posts(
        &self,
        post_ids: &[PostId],
    ) -> BlogResult<HashMap<PostId, Vec<String>>> {
        let mut tags = HashMap::new();
        for post_id in post_ids {
            let names = TagRepository::get_all_by_post_id(self, *post_id).await?;
            if !names.is_empty() {
                tags.insert(*post_id, names);
            }
        }
        Ok(tags)
    }

    async fn get_all_post_ids_by_tag(&self, name: &str) -> BlogResult<Vec<PostId>> {
        let state = self.lock();
        let Some(tag_id) = state.tag_id(name) else {
            return Ok(Vec::new());
        };
        Ok(state
            .post_tags
            .iter()
            .filter(|(_, t)| *t == tag_id)
            .map(|(post_id, _)| PostId::new(*post_id))
            .collect())
    }

    async fn save_post_tags(&self, post_id: PostId, names: &[String]) -> BlogResult<()> {
        let mut state = self.lock();
        let mut wanted = BTreeSet::new();
        for name in names {
            let id = match state.tag_id(name) {
                Some(id) => id,
                None => {
                    let id = state.next_id();
                    state.tags.insert(id, name.clone());
                    id
                }
            };
            wanted.insert(id);
        }

        state
            .post_tags
            .retain(|(p, t)| *p != post_id.get() || wanted.contains(t));
        for tag_id in wanted {
            state.post_tags.insert((post_id.get(), tag_id));
        }
        Ok(())
    }
}

impl UserRepository for InMemoryBlogRepository {
    async fn save(&self, user: &NewUser) -> BlogResult<()> {
        let mut state = self.lock();
        if state
            .users
            .iter()
            .any(|u| u.username == user.username || u.email == user.email)
        {
            return Err(duplicate("users"));
        }
        state.users.push(user.clone());
        Ok(())
    }

    async fn exists_by_username_or_email(&self, username: &str, email: &str) -> BlogResult<bool> {
        Ok(self
            .lock()
            .users
            .iter()
            .any(|u| u.username == username || u.email == email))
    }

    async fn get_password_by_username(&self, username: &str) -> BlogResult<Option<String>> {
        Ok(self.stored_password(username))
    }

    async fn get_username_and_password_by_email(
        &self,
        email: &str,
    ) -> BlogResult<Option<StoredCredentials>> {
        Ok(self
            .lock()
            .users
            .iter()
            .find(|u| u.email == email)
            .map(|u| StoredCredentials {
                username: u.username.clone(),
                password_hash: u.password_hash.clone(),
            }))
    }
}

impl StoreHealth for InMemoryBlogRepository {
    async fn ping(&self) -> BlogResult<()> {
        if self.lock().unavailable {
            return Err(BlogError::Unavailable(sqlx::Error::PoolClosed));
        }
        Ok(())
    }
}
