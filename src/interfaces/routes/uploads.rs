use actix_multipart::form::MultipartFormConfig;
use actix_web::web;

use crate::{errors::AppError, handlers::upload};

/// Room for multipart boundaries and headers on top of the file itself.
const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

pub fn config_routes(cfg: &mut web::ServiceConfig, max_bytes: usize) {
    let limit = max_bytes + MULTIPART_OVERHEAD_BYTES;

    cfg.service(
        web::resource("/upload")
            .app_data(
                MultipartFormConfig::default()
                    .total_limit(limit)
                    .memory_limit(limit)
                    .error_handler(|err, _req| AppError::from(err).into()),
            )
            .route(web::post().to(upload::upload_image))
    );
}
