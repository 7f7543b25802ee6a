use async_trait::async_trait;
use derive_more::Display;

use crate::entities::inquiry::Inquiry;

#[derive(Debug, Display)]
pub enum NotifierError {
    #[display("Failed to build notification: {_0}")]
    Message(String),
    #[display("Failed to deliver notification: {_0}")]
    Transport(String),
}

impl std::error::Error for NotifierError {}

/// Tells the site owner a new inquiry arrived.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait InquiryNotifier: Send + Sync {
    async fn notify_new_inquiry(&self, inquiry: &Inquiry) -> Result<(), NotifierError>;
}
