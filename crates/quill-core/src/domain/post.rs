use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;

/// Author of a post, stored as a structured name pair.
///
/// The API boundary renders an `AuthorName` as a single display string
/// ("Jane Doe") and parses incoming strings back into the pair. Parsing
/// splits at the last space, so a single token becomes a first name with
/// an empty last name and round-trips unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorName {
    pub first_name: String,
    pub last_name: String,
}

impl AuthorName {
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
        }
    }

    /// Parse a display string into a structured name.
    pub fn from_display(display: &str) -> Self {
        match display.trim().rsplit_once(' ') {
            Some((first, last)) => Self::new(first, last),
            None => Self::new(display.trim(), ""),
        }
    }

    /// Render the name as the single string the API exposes.
    pub fn display(&self) -> String {
        if self.last_name.is_empty() {
            self.first_name.clone()
        } else {
            format!("{} {}", self.first_name, self.last_name)
        }
    }

    pub fn is_empty(&self) -> bool {
        self.first_name.is_empty() && self.last_name.is_empty()
    }
}

/// BlogPost entity - one persisted blog post.
///
/// `id` is assigned by the storage layer on insertion and never changes;
/// `created` is set at generation time and is not touched by updates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlogPost {
    pub id: Uuid,
    pub author: AuthorName,
    pub content: String,
    pub title: String,
    pub created: DateTime<Utc>,
}

/// A post that has not been persisted yet - everything but the `id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewPost {
    pub author: AuthorName,
    pub content: String,
    pub title: String,
    pub created: DateTime<Utc>,
}

impl NewPost {
    pub fn new(author: AuthorName, content: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            author,
            content: content.into(),
            title: title.into(),
            created: Utc::now(),
        }
    }

    /// Check the non-empty field contracts.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.author.is_empty() {
            return Err(DomainError::Validation("author must not be empty".into()));
        }
        if self.content.is_empty() {
            return Err(DomainError::Validation("content must not be empty".into()));
        }
        if self.title.is_empty() {
            return Err(DomainError::Validation("title must not be empty".into()));
        }
        Ok(())
    }
}

/// Partial update to a post. `None` fields are left untouched; `created`
/// and `id` are immutable and therefore absent here.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PostPatch {
    pub author: Option<AuthorName>,
    pub content: Option<String>,
    pub title: Option<String>,
}

impl PostPatch {
    pub fn is_empty(&self) -> bool {
        self.author.is_none() && self.content.is_none() && self.title.is_none()
    }

    /// Apply the patch to a post, mutating only the supplied fields.
    pub fn apply(&self, post: &mut BlogPost) {
        if let Some(author) = &self.author {
            post.author = author.clone();
        }
        if let Some(content) = &self.content {
            post.content = content.clone();
        }
        if let Some(title) = &self.title {
            post.title = title.clone();
        }
    }
}
