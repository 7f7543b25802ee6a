use std::sync::Arc;

use crate::{
    entities::upload::{ImageUpload, ImageUploadForm, UploadResponse, ALLOWED_IMAGE_MIME_TYPES},
    errors::AppError,
    repositories::image_storage::{ImageStorage, ImageStorageError},
};

pub struct UploadHandler {
    pub storage: Option<Arc<dyn ImageStorage>>,
    pub max_bytes: usize,
}

impl UploadHandler {
    pub fn new(storage: Option<Arc<dyn ImageStorage>>, max_bytes: usize) -> Self {
        UploadHandler { storage, max_bytes }
    }

    /// Validates the `image` field and forwards it to image storage
    pub async fn upload_image(&self, form: ImageUploadForm) -> Result<UploadResponse, AppError> {
        let storage = self.storage.as_ref().ok_or_else(|| {
            AppError::ServiceUnavailable("Image storage is not configured".to_string())
        })?;

        let file = form
            .image
            .ok_or_else(|| AppError::BadRequest("No file uploaded".to_string()))?;

        if file.data.is_empty() {
            return Err(AppError::BadRequest("No file uploaded".to_string()));
        }
        if file.data.len() > self.max_bytes {
            return Err(AppError::PayloadTooLarge(format!(
                "File exceeds the {} byte limit",
                self.max_bytes
            )));
        }

        let mime_type = infer::get(&file.data)
            .map(|kind| kind.mime_type())
            .filter(|mime| ALLOWED_IMAGE_MIME_TYPES.contains(mime))
            .ok_or_else(|| {
                AppError::BadRequest("Unsupported image format. Allowed: jpg, jpeg, png, webp".to_string())
            })?;

        let upload = ImageUpload {
            file_name: file.file_name.unwrap_or_else(|| "upload".to_string()),
            mime_type: mime_type.to_string(),
            data: file.data.to_vec(),
        };

        let stored = storage.upload_image(upload).await.map_err(|e| match e {
            ImageStorageError::Rejected(msg) => AppError::BadRequest(msg),
            ImageStorageError::Unavailable(_) => {
                tracing::error!(error = %e, "Image storage request failed");
                AppError::BadRequest(e.to_string())
            }
        })?;

        tracing::info!(url = %stored.url, "Image uploaded");
        Ok(UploadResponse { image_url: stored.url })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::upload::StoredImage;
    use crate::repositories::image_storage::MockImageStorage;
    use actix_multipart::form::bytes::Bytes;

    const PNG_HEADER: [u8; 16] = [
        0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x48, 0x44, 0x52,
    ];

    fn form(data: &[u8]) -> ImageUploadForm {
        ImageUploadForm {
            image: Some(Bytes {
                data: data.to_vec().into(),
                content_type: None,
                file_name: Some("shot.png".into()),
            }),
        }
    }

    fn handler(storage: MockImageStorage) -> UploadHandler {
        UploadHandler::new(Some(Arc::new(storage)), 1024)
    }

    #[actix_rt::test]
    async fn png_is_forwarded_to_storage() {
        let mut storage = MockImageStorage::new();
        storage
            .expect_upload_image()
            .withf(|image| image.mime_type == "image/png" && image.file_name == "shot.png")
            .returning(|_| Ok(StoredImage {
                url: "https://res.cloudinary.com/demo/shot.png".into(),
                public_id: Some("portfolio_uploads/shot".into()),
            }));

        let response = handler(storage).upload_image(form(&PNG_HEADER)).await.unwrap();
        assert_eq!(response.image_url, "https://res.cloudinary.com/demo/shot.png");
    }

    #[actix_rt::test]
    async fn missing_file_is_bad_request() {
        let err = handler(MockImageStorage::new())
            .upload_image(ImageUploadForm { image: None })
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::BadRequest(_)));
    }

    #[actix_rt::test]
    async fn oversized_file_is_rejected() {
        let mut data = PNG_HEADER.to_vec();
        data.resize(2048, 0);

        let err = handler(MockImageStorage::new()).upload_image(form(&data)).await.unwrap_err();
        assert!(matches!(err, AppError::PayloadTooLarge(_)));
    }

    #[actix_rt::test]
    async fn non_image_content_is_rejected() {
        let mut storage = MockImageStorage::new();
        storage.expect_upload_image().never();

        let err = handler(storage).upload_image(form(b"plain text, not an image")).await.unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
    }

    #[actix_rt::test]
    async fn storage_rejection_is_bad_request_with_message() {
        let mut storage = MockImageStorage::new();
        storage
            .expect_upload_image()
            .returning(|_| Err(ImageStorageError::Rejected("Invalid image file".into())));

        let err = handler(storage).upload_image(form(&PNG_HEADER)).await.unwrap_err();
        assert!(matches!(err, AppError::BadRequest(msg) if msg == "Invalid image file"));
    }

    #[actix_rt::test]
    async fn unconfigured_storage_is_unavailable() {
        let err = UploadHandler::new(None, 1024).upload_image(form(&PNG_HEADER)).await.unwrap_err();
        assert!(matches!(err, AppError::ServiceUnavailable(_)));
    }
}
