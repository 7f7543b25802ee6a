use actix_web::web;

use crate::handlers::home::home;

mod admin;
mod blog;
mod inquiries;
mod json_error;
mod projects;
mod system;
mod uploads;

/// Registers every route. `upload_max_bytes` bounds the image upload body.
pub fn configure_routes(upload_max_bytes: usize) -> impl FnOnce(&mut web::ServiceConfig) {
    move |cfg| {
        cfg.service(home);

        cfg.service(
            web::scope("/api")
                .configure(system::config_routes)
                .configure(admin::config_routes)
                .configure(projects::config_routes)
                .configure(blog::config_routes)
                .configure(inquiries::config_routes)
                .configure(|cfg| uploads::config_routes(cfg, upload_max_bytes))
        );

        cfg.configure(json_error::config_routes);
    }
}
