//! Post CRUD, search and sort handlers.

use actix_web::{HttpRequest, HttpResponse, web};
use serde::Deserialize;

use quill_core::domain::PostDraft;
use quill_shared::MessageBody;
use quill_shared::dto::{CommentPayload, PageResponse, PostPayload};

use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::pagination::{base_url, paginate};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct PageQuery {
    page: Option<u32>,
    per_page: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    query: Option<String>,
    page: Option<u32>,
    per_page: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct SortQuery {
    sort_by: Option<String>,
    direction: Option<String>,
    page: Option<u32>,
    per_page: Option<u32>,
}

/// Apply defaults and reject non-positive pagination parameters.
fn page_params(page: Option<u32>, per_page: Option<u32>) -> Result<(usize, usize), AppError> {
    let page = page.unwrap_or(1);
    let per_page = per_page.unwrap_or(10);

    if page < 1 || per_page < 1 {
        return Err(AppError::BadRequest(
            "Page and per_page must be positive integers".to_string(),
        ));
    }

    Ok((page as usize, per_page as usize))
}

fn draft(payload: &PostPayload) -> PostDraft {
    PostDraft {
        title: payload.title.clone(),
        content: payload.content.clone(),
        author: payload.author.clone(),
    }
}

/// GET /api/v1/posts
pub async fn list_posts(
    _identity: Identity,
    state: web::Data<AppState>,
    query: web::Query<PageQuery>,
    req: HttpRequest,
) -> AppResult<HttpResponse> {
    let (page, per_page) = page_params(query.page, query.per_page)?;

    let posts = state.posts.list_all().await;
    let (results, next_url) = paginate(&posts, page, per_page, &base_url(&req), &[]);

    Ok(HttpResponse::Ok().json(PageResponse { results, next_url }))
}

/// POST /api/v1/posts
pub async fn create_post(
    _identity: Identity,
    state: web::Data<AppState>,
    body: web::Json<PostPayload>,
) -> AppResult<HttpResponse> {
    let payload = body.into_inner();
    let fields = draft(&payload).validate()?;

    let post = state
        .posts
        .add(fields, payload.categories, payload.tags)
        .await?;

    Ok(HttpResponse::Created().json(post))
}

/// PUT /api/v1/posts/{post_id}
pub async fn update_post(
    _identity: Identity,
    state: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Json<PostPayload>,
) -> AppResult<HttpResponse> {
    let post_id = path.into_inner();
    let fields = draft(&body.into_inner()).validate()?;

    let post = state.posts.update(&post_id, fields).await?;

    Ok(HttpResponse::Ok().json(post))
}

/// DELETE /api/v1/posts/{post_id}
pub async fn delete_post(
    _identity: Identity,
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let post_id = path.into_inner();
    state.posts.delete(&post_id).await?;

    Ok(HttpResponse::Ok().json(MessageBody::new("Post deleted")))
}

/// POST /api/v1/posts/{post_id}/comments
pub async fn add_comment(
    _identity: Identity,
    state: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Json<CommentPayload>,
) -> AppResult<HttpResponse> {
    let post_id = path.into_inner();
    let content = match body.into_inner().content {
        Some(content) if !content.is_empty() => content,
        _ => {
            return Err(AppError::BadRequest(
                "Missing or empty field: content".to_string(),
            ));
        }
    };

    let comment = state.posts.add_comment(&post_id, content).await?;

    Ok(HttpResponse::Created().json(comment))
}

/// GET /api/v1/posts/search
pub async fn search_posts(
    _identity: Identity,
    state: web::Data<AppState>,
    query: web::Query<SearchQuery>,
    req: HttpRequest,
) -> AppResult<HttpResponse> {
    let params = query.into_inner();
    let (page, per_page) = page_params(params.page, params.per_page)?;

    let needle = match params.query {
        Some(q) if !q.is_empty() => q,
        _ => return Err(AppError::BadRequest("Missing query parameter".to_string())),
    };

    let matches = state.posts.search(&needle).await;
    let (results, next_url) = paginate(
        &matches,
        page,
        per_page,
        &base_url(&req),
        &[("query", needle.clone())],
    );

    Ok(HttpResponse::Ok().json(PageResponse { results, next_url }))
}

/// GET /api/v1/posts/sort
pub async fn sort_posts(
    _identity: Identity,
    state: web::Data<AppState>,
    query: web::Query<SortQuery>,
    req: HttpRequest,
) -> AppResult<HttpResponse> {
    let params = query.into_inner();
    let (page, per_page) = page_params(params.page, params.per_page)?;
    let direction = params.direction.unwrap_or_else(|| "asc".to_string());

    let sorted = state
        .posts
        .sort(params.sort_by.as_deref(), &direction)
        .await?;

    // Carry the sort parameters into the next-page link, but only when a
    // field was actually requested
    let mut extra_params: Vec<(&str, String)> = Vec::new();
    if let Some(sort_by) = &params.sort_by {
        extra_params.push(("sort_by", sort_by.clone()));
        extra_params.push(("direction", direction.clone()));
    }

    let (results, next_url) = paginate(&sorted, page, per_page, &base_url(&req), &extra_params);

    Ok(HttpResponse::Ok().json(PageResponse { results, next_url }))
}
