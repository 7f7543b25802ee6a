use actix_web::{web, HttpResponse, Responder};
use tracing::instrument;

use crate::{entities::inquiry::NewInquiryForm, errors::AppError, use_cases::extractors::AdminClaims, AppState};

#[instrument(skip(state, data))]
pub async fn create_inquiry(
    state: web::Data<AppState>,
    data: web::Json<NewInquiryForm>,
) -> Result<impl Responder, AppError> {
    let inquiry = state.inquiry_handler
        .create_inquiry(data.into_inner())
        .await?;

    Ok(HttpResponse::Created().json(inquiry))
}

#[instrument(skip(_claims, state))]
pub async fn list_inquiries(
    _claims: AdminClaims,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let inquiries = state.inquiry_handler.list_inquiries().await?;

    Ok(HttpResponse::Ok().json(inquiries))
}

#[instrument(skip(_claims, state))]
pub async fn delete_inquiry(
    _claims: AdminClaims,
    state: web::Data<AppState>,
    inquiry_id: web::Path<String>,
) -> Result<impl Responder, AppError> {
    state.inquiry_handler.delete_inquiry(&inquiry_id).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "Inquiry deleted"
    })))
}
