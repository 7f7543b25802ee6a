use async_trait::async_trait;
use derive_more::Display;

use crate::entities::upload::{ImageUpload, StoredImage};

#[derive(Debug, Display, Clone, PartialEq)]
pub enum ImageStorageError {
    /// The storage service answered with an error.
    #[display("{_0}")]
    Rejected(String),
    /// The storage service could not be reached or returned garbage.
    #[display("Image storage unavailable: {_0}")]
    Unavailable(String),
}

impl std::error::Error for ImageStorageError {}

/// Remote store that keeps uploaded images and hands back a public URL.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ImageStorage: Send + Sync {
    async fn upload_image(&self, image: ImageUpload) -> Result<StoredImage, ImageStorageError>;
}
