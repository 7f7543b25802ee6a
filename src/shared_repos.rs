use std::sync::Arc;

use sqlx::PgPool;

use crate::{
    mail::smtp::SmtpNotifier,
    repositories::{
        blog_post::BlogPostRepository,
        image_storage::ImageStorage,
        inquiry::InquiryRepository,
        notifier::InquiryNotifier,
        project::ProjectRepository,
        sqlx_repo::{SqlxBlogPostRepo, SqlxInquiryRepo, SqlxProjectRepo, SqlxSystemRepo},
        system::SystemRepository,
    },
    settings::AppConfig,
    storage::cloudinary::CloudinaryStorage,
};

/// Store-backed repositories shared by every worker.
#[derive(Clone)]
pub struct SharedRepositories {
    pub project_repo: Arc<dyn ProjectRepository>,
    pub blog_post_repo: Arc<dyn BlogPostRepository>,
    pub inquiry_repo: Arc<dyn InquiryRepository>,
    pub system_repo: Arc<dyn SystemRepository>,
}

impl SharedRepositories {
    pub fn postgres(pool: PgPool) -> Self {
        SharedRepositories {
            project_repo: Arc::new(SqlxProjectRepo::new(pool.clone())),
            blog_post_repo: Arc::new(SqlxBlogPostRepo::new(pool.clone())),
            inquiry_repo: Arc::new(SqlxInquiryRepo::new(pool.clone())),
            system_repo: Arc::new(SqlxSystemRepo::new(pool)),
        }
    }
}

/// Optional third-party integrations. Either may be absent.
#[derive(Clone, Default)]
pub struct ExternalServices {
    pub image_storage: Option<Arc<dyn ImageStorage>>,
    pub notifier: Option<Arc<dyn InquiryNotifier>>,
}

impl ExternalServices {
    pub fn from_config(config: &AppConfig) -> Self {
        let image_storage = config.cloudinary().and_then(|cloudinary| {
            CloudinaryStorage::new(cloudinary)
                .map(|storage| Arc::new(storage) as Arc<dyn ImageStorage>)
                .map_err(|e| tracing::error!("Image storage disabled: {}", e))
                .ok()
        });
        if image_storage.is_none() {
            tracing::warn!("Cloudinary is not configured; uploads will answer 503");
        }

        let notifier = config.smtp().and_then(|smtp| {
            SmtpNotifier::new(&smtp)
                .map(|notifier| Arc::new(notifier) as Arc<dyn InquiryNotifier>)
                .map_err(|e| tracing::error!("Inquiry notifications disabled: {}", e))
                .ok()
        });
        if notifier.is_none() {
            tracing::info!("SMTP is not configured; inquiries will not be emailed");
        }

        ExternalServices { image_storage, notifier }
    }
}
