use actix_web::{web, HttpResponse, Responder};
use tracing::instrument;

use crate::{use_cases::extractors::AdminClaims, AppState};

#[instrument(skip(state))]
pub async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let response = state.system_handler.health_check().await;

    if response.is_healthy() {
        HttpResponse::Ok().json(response)
    } else {
        HttpResponse::ServiceUnavailable().json(response)
    }
}

#[instrument(skip(_claims, state))]
pub async fn stats(
    _claims: AdminClaims,
    state: web::Data<AppState>,
) -> impl Responder {
    HttpResponse::Ok().json(state.system_handler.stats().await)
}
