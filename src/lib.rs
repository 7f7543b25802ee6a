mod domain;
mod interfaces;
mod infrastructure;
pub mod errors;
pub mod settings;
pub mod constants;
pub mod graceful_shutdown;
pub mod shared_repos;

pub use domain::{entities, use_cases};
pub use interfaces::{handlers, repositories, middlewares, routes};
pub use infrastructure::{auth, db, mail, storage, utils};

use auth::jwt::JwtService;
use shared_repos::{ExternalServices, SharedRepositories};
use use_cases::{
    auth::{AdminCredentials, AuthHandler},
    blog::BlogPostHandler,
    inquiry::InquiryHandler,
    project::ProjectHandler,
    system::SystemHandler,
    upload::UploadHandler,
};

pub struct AppState {
    pub auth_handler: AppAuthHandler,
    pub project_handler: ProjectHandler,
    pub blog_handler: BlogPostHandler,
    pub inquiry_handler: InquiryHandler,
    pub system_handler: SystemHandler,
    pub upload_handler: UploadHandler,
}

pub type AppAuthHandler = AuthHandler<JwtService>;

impl AppState {
    pub fn new(config: &settings::AppConfig, repos: SharedRepositories, services: ExternalServices) -> Self {
        let auth_handler = AuthHandler::new(AdminCredentials::from(config), JwtService::new(config));

        AppState {
            auth_handler,
            project_handler: ProjectHandler::new(repos.project_repo),
            blog_handler: BlogPostHandler::new(repos.blog_post_repo),
            inquiry_handler: InquiryHandler::new(repos.inquiry_repo, services.notifier),
            system_handler: SystemHandler::new(repos.system_repo),
            upload_handler: UploadHandler::new(services.image_storage, config.upload_max_bytes),
        }
    }
}
