use actix_web::web;

use crate::errors::AppError;

/// Malformed or oversized JSON bodies are answered in the API error format.
pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(|err, _req| {
        AppError::from(err).into()
    }));
}
