use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{BlogPost, NewPost, PostPatch};
use crate::error::StoreError;

/// Storage boundary for blog posts.
///
/// Tests also consume this trait directly to cross-check what the HTTP
/// layer reports against what is actually persisted.
#[async_trait]
pub trait PostStore: Send + Sync {
    /// Persist a batch of new posts, returning them with assigned ids.
    async fn insert_many(&self, posts: Vec<NewPost>) -> Result<Vec<BlogPost>, StoreError>;

    /// Persist a single new post, returning it with its assigned id.
    async fn insert(&self, post: NewPost) -> Result<BlogPost, StoreError>;

    /// Total number of stored posts.
    async fn count(&self) -> Result<u64, StoreError>;

    /// Every stored post.
    async fn find_all(&self) -> Result<Vec<BlogPost>, StoreError>;

    /// An arbitrary single post, if any exist.
    async fn find_one(&self) -> Result<Option<BlogPost>, StoreError>;

    /// Point lookup by id.
    async fn find_by_id(&self, id: Uuid) -> Result<Option<BlogPost>, StoreError>;

    /// Apply a partial update to the post with the given id.
    /// Returns `StoreError::NotFound` if no such post exists.
    async fn update(&self, id: Uuid, patch: PostPatch) -> Result<(), StoreError>;

    /// Delete the post with the given id.
    /// Returns `StoreError::NotFound` if no such post exists.
    async fn delete(&self, id: Uuid) -> Result<(), StoreError>;

    /// Unconditionally remove every stored post.
    async fn drop_all(&self) -> Result<(), StoreError>;
}
