use std::sync::Arc;

use validator::Validate;

use crate::{
    entities::inquiry::{Inquiry, NewInquiryForm},
    errors::AppError,
    repositories::{inquiry::InquiryRepository, notifier::InquiryNotifier},
    utils::valid_id::valid_id,
};

pub struct InquiryHandler {
    pub inquiry_repo: Arc<dyn InquiryRepository>,
    pub notifier: Option<Arc<dyn InquiryNotifier>>,
}

impl InquiryHandler {
    pub fn new(inquiry_repo: Arc<dyn InquiryRepository>, notifier: Option<Arc<dyn InquiryNotifier>>) -> Self {
        InquiryHandler { inquiry_repo, notifier }
    }

    /// Stores a contact form submission and notifies the owner in the background
    pub async fn create_inquiry(&self, request: NewInquiryForm) -> Result<Inquiry, AppError> {
        request.validate()?;

        let inquiry = self.inquiry_repo.create_inquiry(&request).await?;
        tracing::info!(inquiry_id = inquiry.id, "Inquiry received");

        if let Some(notifier) = &self.notifier {
            let notifier = Arc::clone(notifier);
            let stored = inquiry.clone();

            tokio::spawn(async move {
                if let Err(e) = notifier.notify_new_inquiry(&stored).await {
                    tracing::warn!(inquiry_id = stored.id, error = %e, "Inquiry notification failed");
                }
            });
        }

        Ok(inquiry)
    }

    /// Lists all inquiries, newest first
    pub async fn list_inquiries(&self) -> Result<Vec<Inquiry>, AppError> {
        self.inquiry_repo.list_inquiries().await
    }

    pub async fn delete_inquiry(&self, id: &str) -> Result<(), AppError> {
        if let Some(valid_id) = valid_id(id)? {
            self.inquiry_repo.delete_inquiry(valid_id).await?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::inquiry::MockInquiryRepository;
    use crate::repositories::notifier::{MockInquiryNotifier, NotifierError};
    use chrono::Utc;
    use tokio::sync::oneshot;

    fn form(email: &str) -> NewInquiryForm {
        NewInquiryForm {
            name: "A".into(),
            email: email.into(),
            message: "hi".into(),
        }
    }

    fn stored(form: &NewInquiryForm) -> Inquiry {
        Inquiry {
            id: 1,
            name: form.name.clone(),
            email: form.email.clone(),
            message: form.message.clone(),
            created_at: Utc::now(),
        }
    }

    #[actix_rt::test]
    async fn create_stores_and_notifies() {
        let mut repo = MockInquiryRepository::new();
        repo.expect_create_inquiry().times(1).returning(|f| Ok(stored(f)));

        let (tx, rx) = oneshot::channel();
        let tx = std::sync::Mutex::new(Some(tx));
        let mut notifier = MockInquiryNotifier::new();
        notifier.expect_notify_new_inquiry().times(1).returning(move |inquiry| {
            if let Some(tx) = tx.lock().unwrap().take() {
                let _ = tx.send(inquiry.id);
            }
            Ok(())
        });

        let handler = InquiryHandler::new(Arc::new(repo), Some(Arc::new(notifier)));
        let inquiry = handler.create_inquiry(form("a@x.com")).await.unwrap();

        assert_eq!(inquiry.email, "a@x.com");
        assert_eq!(rx.await.unwrap(), 1);
    }

    #[actix_rt::test]
    async fn notification_failure_does_not_fail_the_request() {
        let mut repo = MockInquiryRepository::new();
        repo.expect_create_inquiry().returning(|f| Ok(stored(f)));

        let mut notifier = MockInquiryNotifier::new();
        notifier
            .expect_notify_new_inquiry()
            .returning(|_| Err(NotifierError::Transport("smtp down".into())));

        let handler = InquiryHandler::new(Arc::new(repo), Some(Arc::new(notifier)));

        assert!(handler.create_inquiry(form("a@x.com")).await.is_ok());
    }

    #[actix_rt::test]
    async fn invalid_email_is_rejected() {
        let mut repo = MockInquiryRepository::new();
        repo.expect_create_inquiry().never();

        let handler = InquiryHandler::new(Arc::new(repo), None);
        let err = handler.create_inquiry(form("nope")).await.unwrap_err();

        assert!(matches!(err, AppError::ValidationError(_)));
    }

    #[actix_rt::test]
    async fn delete_rejects_bad_id() {
        let handler = InquiryHandler::new(Arc::new(MockInquiryRepository::new()), None);

        let err = handler.delete_inquiry("x1").await.unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
    }
}
