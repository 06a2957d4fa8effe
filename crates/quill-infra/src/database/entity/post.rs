//! Post entity for SeaORM.
//!
//! The author is stored as a structured name pair; the display-string form
//! only exists at the API boundary.

use sea_orm::Set;
use sea_orm::entity::prelude::*;

use quill_core::domain::{AuthorName, BlogPost};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "posts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub author_first_name: String,
    pub author_last_name: String,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub content: String,
    pub created: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Conversion from SeaORM Model to the domain BlogPost.
impl From<Model> for BlogPost {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            author: AuthorName::new(model.author_first_name, model.author_last_name),
            content: model.content,
            title: model.title,
            created: model.created.into(),
        }
    }
}

/// Conversion from the domain BlogPost to a SeaORM ActiveModel.
impl From<BlogPost> for ActiveModel {
    fn from(post: BlogPost) -> Self {
        Self {
            id: Set(post.id),
            author_first_name: Set(post.author.first_name),
            author_last_name: Set(post.author.last_name),
            title: Set(post.title),
            content: Set(post.content),
            created: Set(post.created.into()),
        }
    }
}
