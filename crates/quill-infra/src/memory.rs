//! In-memory post store - used as fallback when no database is configured
//! and as the isolated storage target for the integration suite.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use quill_core::domain::{BlogPost, NewPost, PostPatch};
use quill_core::error::StoreError;
use quill_core::ports::PostStore;

/// In-memory store using a HashMap behind an async RwLock.
///
/// Note: Data is lost on process restart.
pub struct MemoryPostStore {
    posts: RwLock<HashMap<Uuid, BlogPost>>,
}

impl MemoryPostStore {
    pub fn new() -> Self {
        Self {
            posts: RwLock::new(HashMap::new()),
        }
    }

    fn materialize(post: NewPost) -> BlogPost {
        BlogPost {
            id: Uuid::new_v4(),
            author: post.author,
            content: post.content,
            title: post.title,
            created: post.created,
        }
    }
}

impl Default for MemoryPostStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PostStore for MemoryPostStore {
    async fn insert_many(&self, posts: Vec<NewPost>) -> Result<Vec<BlogPost>, StoreError> {
        let mut store = self.posts.write().await;
        let mut inserted = Vec::with_capacity(posts.len());

        for post in posts {
            let record = Self::materialize(post);
            store.insert(record.id, record.clone());
            inserted.push(record);
        }

        Ok(inserted)
    }

    async fn insert(&self, post: NewPost) -> Result<BlogPost, StoreError> {
        let record = Self::materialize(post);

        let mut store = self.posts.write().await;
        store.insert(record.id, record.clone());

        Ok(record)
    }

    async fn count(&self) -> Result<u64, StoreError> {
        let store = self.posts.read().await;
        Ok(store.len() as u64)
    }

    async fn find_all(&self) -> Result<Vec<BlogPost>, StoreError> {
        let store = self.posts.read().await;
        Ok(store.values().cloned().collect())
    }

    async fn find_one(&self) -> Result<Option<BlogPost>, StoreError> {
        let store = self.posts.read().await;
        Ok(store.values().next().cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<BlogPost>, StoreError> {
        let store = self.posts.read().await;
        Ok(store.get(&id).cloned())
    }

    async fn update(&self, id: Uuid, patch: PostPatch) -> Result<(), StoreError> {
        let mut store = self.posts.write().await;
        let post = store.get_mut(&id).ok_or(StoreError::NotFound)?;
        patch.apply(post);
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<(), StoreError> {
        let mut store = self.posts.write().await;
        store.remove(&id).ok_or(StoreError::NotFound)?;
        Ok(())
    }

    async fn drop_all(&self) -> Result<(), StoreError> {
        tracing::warn!("dropping all posts from the in-memory store");
        let mut store = self.posts.write().await;
        store.clear();
        Ok(())
    }
}
