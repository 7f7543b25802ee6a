pub mod blog_post;
pub mod image_storage;
pub mod inquiry;
pub mod notifier;
pub mod project;
pub mod sqlx_repo;
pub mod system;
pub mod token;
