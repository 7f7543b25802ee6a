use actix_web::{web, HttpResponse, Responder};
use tracing::instrument;

use crate::{entities::blog_post::BlogPostRequest, errors::AppError, use_cases::extractors::AdminClaims, AppState};

#[instrument(skip(state))]
pub async fn list_blog_posts(
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let posts = state.blog_handler.list_blog_posts().await?;

    Ok(HttpResponse::Ok().json(posts))
}

#[instrument(skip(state))]
pub async fn get_blog_post(
    state: web::Data<AppState>,
    post_id: web::Path<String>,
) -> Result<impl Responder, AppError> {
    let post = state.blog_handler.get_blog_post(&post_id).await?;

    Ok(HttpResponse::Ok().json(post))
}

#[instrument(skip(_claims, state, data))]
pub async fn create_blog_post(
    _claims: AdminClaims,
    state: web::Data<AppState>,
    data: web::Json<BlogPostRequest>,
) -> Result<impl Responder, AppError> {
    let post = state.blog_handler
        .create_blog_post(data.into_inner())
        .await?;

    Ok(HttpResponse::Created().json(post))
}

#[instrument(skip(_claims, state, data))]
pub async fn update_blog_post(
    _claims: AdminClaims,
    state: web::Data<AppState>,
    post_id: web::Path<String>,
    data: web::Json<BlogPostRequest>,
) -> Result<impl Responder, AppError> {
    let post = state.blog_handler
        .update_blog_post(&post_id, data.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(post))
}

#[instrument(skip(_claims, state))]
pub async fn delete_blog_post(
    _claims: AdminClaims,
    state: web::Data<AppState>,
    post_id: web::Path<String>,
) -> Result<impl Responder, AppError> {
    state.blog_handler.delete_blog_post(&post_id).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "Blog post deleted"
    })))
}
