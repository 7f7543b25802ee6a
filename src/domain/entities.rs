pub mod blog_post;
pub mod inquiry;
pub mod project;
pub mod system;
pub mod token;
pub mod upload;
