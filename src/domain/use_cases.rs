pub mod auth;
pub mod blog;
pub mod extractors;
pub mod inquiry;
pub mod project;
pub mod system;
pub mod upload;
