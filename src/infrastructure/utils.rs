pub mod markdown;
pub mod valid_id;
