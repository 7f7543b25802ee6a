use actix_web::web;

use crate::handlers::inquiries;

pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/inquiries")
            .service(
                web::resource("")
                    .route(web::get().to(inquiries::list_inquiries))
                    .route(web::post().to(inquiries::create_inquiry))
            )
            .service(
                web::resource("/{inquiry_id}")
                    .route(web::delete().to(inquiries::delete_inquiry))
            )
    );
}
