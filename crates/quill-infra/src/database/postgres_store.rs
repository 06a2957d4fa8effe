//! PostgreSQL post store implementation.

use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, DbConn, EntityTrait, IntoActiveModel, PaginatorTrait, Set};
use uuid::Uuid;

use quill_core::domain::{BlogPost, NewPost, PostPatch};
use quill_core::error::StoreError;
use quill_core::ports::PostStore;

use super::entity::post::{self, Entity as PostEntity};

/// PostgreSQL-backed post store.
pub struct PostgresPostStore {
    db: DbConn,
}

impl PostgresPostStore {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }

    /// Ids are assigned here, on the storage side, never by callers.
    fn assign_id(post: NewPost) -> BlogPost {
        BlogPost {
            id: Uuid::new_v4(),
            author: post.author,
            content: post.content,
            title: post.title,
            created: post.created,
        }
    }

    fn query_err(e: sea_orm::DbErr) -> StoreError {
        let err_str = e.to_string();
        if err_str.contains("duplicate") || err_str.contains("unique") {
            StoreError::Constraint("Record already exists".to_string())
        } else {
            StoreError::Query(err_str)
        }
    }
}

#[async_trait]
impl PostStore for PostgresPostStore {
    async fn insert_many(&self, posts: Vec<NewPost>) -> Result<Vec<BlogPost>, StoreError> {
        // SeaORM rejects an empty insert statement.
        if posts.is_empty() {
            return Ok(Vec::new());
        }

        let records: Vec<BlogPost> = posts.into_iter().map(Self::assign_id).collect();
        let models: Vec<post::ActiveModel> =
            records.iter().cloned().map(Into::into).collect();

        PostEntity::insert_many(models)
            .exec(&self.db)
            .await
            .map_err(Self::query_err)?;

        Ok(records)
    }

    async fn insert(&self, post: NewPost) -> Result<BlogPost, StoreError> {
        let record = Self::assign_id(post);
        let active: post::ActiveModel = record.into();

        let model = active.insert(&self.db).await.map_err(Self::query_err)?;

        Ok(model.into())
    }

    async fn count(&self) -> Result<u64, StoreError> {
        PostEntity::find()
            .count(&self.db)
            .await
            .map_err(Self::query_err)
    }

    async fn find_all(&self) -> Result<Vec<BlogPost>, StoreError> {
        let result = PostEntity::find()
            .all(&self.db)
            .await
            .map_err(Self::query_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn find_one(&self) -> Result<Option<BlogPost>, StoreError> {
        let result = PostEntity::find()
            .one(&self.db)
            .await
            .map_err(Self::query_err)?;

        Ok(result.map(Into::into))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<BlogPost>, StoreError> {
        let result = PostEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(Self::query_err)?;

        Ok(result.map(Into::into))
    }

    async fn update(&self, id: Uuid, patch: PostPatch) -> Result<(), StoreError> {
        let model = PostEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(Self::query_err)?
            .ok_or(StoreError::NotFound)?;

        // An UPDATE with no changed columns is invalid SQL.
        if patch.is_empty() {
            return Ok(());
        }

        // All columns start Unchanged so only the patched ones hit the UPDATE.
        let mut active = model.into_active_model();
        if let Some(author) = patch.author {
            active.author_first_name = Set(author.first_name);
            active.author_last_name = Set(author.last_name);
        }
        if let Some(content) = patch.content {
            active.content = Set(content);
        }
        if let Some(title) = patch.title {
            active.title = Set(title);
        }

        active.update(&self.db).await.map_err(Self::query_err)?;

        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<(), StoreError> {
        let result = PostEntity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(Self::query_err)?;

        if result.rows_affected == 0 {
            return Err(StoreError::NotFound);
        }

        Ok(())
    }

    async fn drop_all(&self) -> Result<(), StoreError> {
        tracing::warn!("dropping all posts from the database");
        PostEntity::delete_many()
            .exec(&self.db)
            .await
            .map_err(Self::query_err)?;

        Ok(())
    }
}
