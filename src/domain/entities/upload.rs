use actix_multipart::form::{bytes::Bytes, MultipartForm};
use serde::Serialize;

/// Formats the image storage accepts, as detected from the file content.
pub const ALLOWED_IMAGE_MIME_TYPES: [&str; 3] = ["image/jpeg", "image/png", "image/webp"];

/// Bounding box applied by the image service: fit inside 1000x1000, never upscale.
pub const UPLOAD_TRANSFORMATION: &str = "c_limit,h_1000,w_1000";

/// `multipart/form-data` body of `POST /api/upload`.
#[derive(Debug, MultipartForm)]
pub struct ImageUploadForm {
    pub image: Option<Bytes>,
}

/// An image read fully into memory, ready to hand to storage.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub file_name: String,
    pub mime_type: String,
    pub data: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StoredImage {
    pub url: String,
    pub public_id: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    pub image_url: String,
}
