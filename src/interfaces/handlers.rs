pub mod auth;
pub mod blog_posts;
pub mod home;
pub mod inquiries;
pub mod projects;
pub mod system;
pub mod upload;
