//! Feed handlers: paginated listing, post CRUD, and image uploads.
//!
//! Mutations follow the engine's fixed order; these handlers only parse the
//! transport shape (multipart, query strings) and hand off to the services.

use actix_multipart::form::{MultipartForm, tempfile::TempFile, text::Text};
use actix_web::{HttpResponse, web};
use serde::Deserialize;
use uuid::Uuid;

use feedr_core::DomainError;
use feedr_core::services::PostView;
use feedr_shared::dto::{CreatorDto, FeedPayload, FilePayload, MessagePayload, PostDto, PostPayload};

use crate::middleware::auth::AuthUser;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// Image encodings accepted for upload. Everything else is rejected before
/// reaching the engine.
const ALLOWED_IMAGE_TYPES: &[&str] = &["image/png", "image/jpeg", "image/gif", "image/webp"];

#[derive(Debug, Deserialize)]
pub struct PageQuery {
    pub page: Option<u64>,
}

/// Multipart body for POST /posts.
#[derive(Debug, MultipartForm)]
pub struct CreatePostForm {
    pub title: Text<String>,
    pub content: Text<String>,
    #[multipart(limit = "10MB")]
    pub image: TempFile,
}

/// Multipart body for PUT /posts/{id}. Omitting the image leaves the
/// existing artifact path untouched.
#[derive(Debug, MultipartForm)]
pub struct UpdatePostForm {
    pub title: Text<String>,
    pub content: Text<String>,
    #[multipart(limit = "10MB")]
    pub image: Option<TempFile>,
}

/// Multipart body for PUT /image.
#[derive(Debug, MultipartForm)]
pub struct ImageForm {
    #[multipart(limit = "10MB")]
    pub image: TempFile,
}

pub fn post_view_to_dto(view: PostView) -> PostDto {
    PostDto {
        id: view.post.id,
        title: view.post.title,
        content: view.post.content,
        image_url: view.post.image_url,
        creator: CreatorDto {
            id: view.owner.id,
            name: view.owner.name,
        },
        created_at: view.post.created_at,
        updated_at: view.post.updated_at,
    }
}

fn ensure_image_kind(file: &TempFile) -> Result<(), AppError> {
    let accepted = file
        .content_type
        .as_ref()
        .map(|mime| ALLOWED_IMAGE_TYPES.contains(&mime.essence_str()))
        .unwrap_or(false);

    if !accepted {
        return Err(AppError(DomainError::validation(
            "only png, jpeg, gif, or webp images are accepted",
        )));
    }
    Ok(())
}

/// Persist an uploaded file through the artifact store, returning the public
/// path to record on the post.
async fn persist_upload(state: &AppState, file: &TempFile) -> Result<String, AppError> {
    ensure_image_kind(file)?;

    let bytes = tokio::fs::read(file.file.path())
        .await
        .map_err(|e| AppError(DomainError::Upstream(e.to_string())))?;

    let suggested = file.file_name.as_deref().unwrap_or("upload");
    Ok(state.artifacts.store(&bytes, suggested).await?)
}

/// GET /posts?page=N
pub async fn list_posts(
    state: web::Data<AppState>,
    _auth: AuthUser,
    query: web::Query<PageQuery>,
) -> AppResult<HttpResponse> {
    let page = state.feed.page(query.page.unwrap_or(1)).await?;

    Ok(HttpResponse::Ok().json(FeedPayload {
        message: "Posts fetched successfully.".to_string(),
        posts: page.items.into_iter().map(post_view_to_dto).collect(),
        total_items: page.total_items,
    }))
}

/// GET /posts/{id}
pub async fn get_post(
    state: web::Data<AppState>,
    _auth: AuthUser,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let view = state.feed.single(path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(PostPayload {
        message: "Post fetched.".to_string(),
        post: post_view_to_dto(view),
    }))
}

/// POST /posts (multipart with image)
pub async fn create_post(
    state: web::Data<AppState>,
    auth: AuthUser,
    MultipartForm(form): MultipartForm<CreatePostForm>,
) -> AppResult<HttpResponse> {
    let image_url = persist_upload(&state, &form.image).await?;

    let post = state
        .posts
        .create(&auth.0, &form.title, &form.content, &image_url)
        .await?;
    let view = state.feed.single(post.id).await?;

    Ok(HttpResponse::Created().json(PostPayload {
        message: "Post created successfully!".to_string(),
        post: post_view_to_dto(view),
    }))
}

/// PUT /posts/{id} (multipart; image optional)
pub async fn update_post(
    state: web::Data<AppState>,
    auth: AuthUser,
    path: web::Path<Uuid>,
    MultipartForm(form): MultipartForm<UpdatePostForm>,
) -> AppResult<HttpResponse> {
    let image_url = match &form.image {
        Some(file) => Some(persist_upload(&state, file).await?),
        None => None,
    };

    let post = state
        .posts
        .update(
            &auth.0,
            path.into_inner(),
            &form.title,
            &form.content,
            image_url.as_deref(),
        )
        .await?;
    let view = state.feed.single(post.id).await?;

    Ok(HttpResponse::Ok().json(PostPayload {
        message: "Post updated successfully.".to_string(),
        post: post_view_to_dto(view),
    }))
}

/// DELETE /posts/{id}
pub async fn delete_post(
    state: web::Data<AppState>,
    auth: AuthUser,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    state.posts.delete(&auth.0, path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(MessagePayload {
        message: "Post deleted successfully.".to_string(),
    }))
}

/// PUT /image - standalone upload returning a path for later attachment
/// (the GraphQL createPost flow uses this).
pub async fn upload_image(
    state: web::Data<AppState>,
    _auth: AuthUser,
    MultipartForm(form): MultipartForm<ImageForm>,
) -> AppResult<HttpResponse> {
    let file_path = persist_upload(&state, &form.image).await?;

    Ok(HttpResponse::Created().json(FilePayload {
        message: "File stored.".to_string(),
        file_path,
    }))
}
