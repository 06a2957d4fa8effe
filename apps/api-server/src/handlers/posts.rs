//! Blog post CRUD handlers.

use actix_web::{HttpResponse, web};
use chrono::Utc;
use uuid::Uuid;

use quill_core::domain::{AuthorName, BlogPost, NewPost, PostPatch};
use quill_shared::dto::{CreatePostRequest, PostResponse, UpdatePostRequest};

use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// Domain record to wire shape: the structured author collapses to its
/// display string here and nowhere else.
fn to_response(post: BlogPost) -> PostResponse {
    PostResponse {
        id: post.id,
        author: post.author.display(),
        content: post.content,
        title: post.title,
        created: post.created,
    }
}

/// GET /posts
pub async fn list(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let posts = state.posts.find_all().await?;

    let body: Vec<PostResponse> = posts.into_iter().map(to_response).collect();
    Ok(HttpResponse::Ok().json(body))
}

/// POST /posts
pub async fn create(
    state: web::Data<AppState>,
    body: web::Json<CreatePostRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    let post = NewPost {
        author: AuthorName::from_display(&req.author),
        content: req.content,
        title: req.title,
        created: req.created.unwrap_or_else(Utc::now),
    };
    post.validate()?;

    let created = state.posts.insert(post).await?;

    tracing::debug!(post_id = %created.id, "created post");
    Ok(HttpResponse::Created().json(to_response(created)))
}

/// PUT /posts/{id}
pub async fn update(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    body: web::Json<UpdatePostRequest>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let req = body.into_inner();

    if let Some(body_id) = req.id {
        if body_id != id {
            return Err(AppError::BadRequest(format!(
                "Request path id ({id}) and request body id ({body_id}) must match"
            )));
        }
    }

    // Supplied fields must still satisfy the non-empty contracts.
    for (field, value) in [("author", &req.author), ("content", &req.content), ("title", &req.title)] {
        if value.as_deref().is_some_and(|v| v.trim().is_empty()) {
            return Err(AppError::BadRequest(format!("{field} must not be empty")));
        }
    }

    let patch = PostPatch {
        author: req.author.as_deref().map(AuthorName::from_display),
        content: req.content,
        title: req.title,
    };

    state.posts.update(id, patch).await?;

    tracing::debug!(post_id = %id, "updated post");
    Ok(HttpResponse::NoContent().finish())
}

/// DELETE /posts/{id}
pub async fn remove(state: web::Data<AppState>, path: web::Path<Uuid>) -> AppResult<HttpResponse> {
    let id = path.into_inner();

    state.posts.delete(id).await?;

    tracing::debug!(post_id = %id, "deleted post");
    Ok(HttpResponse::NoContent().finish())
}
