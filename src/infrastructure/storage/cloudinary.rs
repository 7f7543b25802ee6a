use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use sha1::{Digest, Sha1};

use crate::entities::upload::{ImageUpload, StoredImage, UPLOAD_TRANSFORMATION};
use crate::repositories::image_storage::{ImageStorage, ImageStorageError};
use crate::settings::CloudinaryConfig;

const API_BASE: &str = "https://api.cloudinary.com/v1_1";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Signed uploads to the Cloudinary image API.
pub struct CloudinaryStorage {
    client: reqwest::Client,
    config: CloudinaryConfig,
    upload_url: String,
}

#[derive(Debug, Deserialize)]
struct UploadApiResponse {
    secure_url: Option<String>,
    public_id: Option<String>,
    error: Option<UploadApiError>,
}

#[derive(Debug, Deserialize)]
struct UploadApiError {
    message: String,
}

impl CloudinaryStorage {
    pub fn new(config: CloudinaryConfig) -> Result<Self, ImageStorageError> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| ImageStorageError::Unavailable(e.to_string()))?;

        let upload_url = format!("{}/{}/image/upload", API_BASE, config.cloud_name);

        Ok(CloudinaryStorage { client, config, upload_url })
    }

    fn signed_params(&self, timestamp: i64) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("folder", self.config.folder.clone()),
            ("timestamp", timestamp.to_string()),
            ("transformation", UPLOAD_TRANSFORMATION.to_string()),
        ];
        let signature = sign_params(&mut params, &self.config.api_secret);

        params.push(("api_key", self.config.api_key.clone()));
        params.push(("signature", signature));
        params
    }
}

/// Sorts `params` by key and returns the SHA-1 hex digest of
/// `k1=v1&k2=v2...` followed by the secret.
pub fn sign_params(params: &mut [(&'static str, String)], api_secret: &str) -> String {
    params.sort_by(|a, b| a.0.cmp(b.0));

    let to_sign = params
        .iter()
        .map(|(key, value)| format!("{}={}", key, value))
        .collect::<Vec<_>>()
        .join("&");

    let mut hasher = Sha1::new();
    hasher.update(to_sign.as_bytes());
    hasher.update(api_secret.as_bytes());
    hex::encode(hasher.finalize())
}

#[async_trait]
impl ImageStorage for CloudinaryStorage {
    #[tracing::instrument(skip(self, image), fields(file_name = %image.file_name, size = image.data.len()))]
    async fn upload_image(&self, image: ImageUpload) -> Result<StoredImage, ImageStorageError> {
        let file_part = Part::bytes(image.data)
            .file_name(image.file_name)
            .mime_str(&image.mime_type)
            .map_err(|e| ImageStorageError::Rejected(e.to_string()))?;

        let mut form = Form::new().part("file", file_part);
        for (key, value) in self.signed_params(Utc::now().timestamp()) {
            form = form.text(key, value);
        }

        let response = self
            .client
            .post(&self.upload_url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| ImageStorageError::Unavailable(e.to_string()))?;

        let status = response.status();
        let body: UploadApiResponse = response
            .json()
            .await
            .map_err(|e| ImageStorageError::Unavailable(format!("unreadable response ({}): {}", status, e)))?;

        if let Some(error) = body.error {
            tracing::warn!(%status, message = %error.message, "Image storage rejected upload");
            return Err(ImageStorageError::Rejected(error.message));
        }

        match body.secure_url {
            Some(url) if status.is_success() => Ok(StoredImage { url, public_id: body.public_id }),
            _ => Err(ImageStorageError::Rejected(format!("Upload failed with status {}", status))),
        }
    }
}
