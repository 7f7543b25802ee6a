use actix_web::web;

use crate::handlers::system;

pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(system::health_check))
        .route("/stats", web::get().to(system::stats));
}
