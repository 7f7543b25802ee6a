use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use crate::entities::inquiry::Inquiry;
use crate::repositories::notifier::{InquiryNotifier, NotifierError};
use crate::settings::SmtpConfig;

/// Mails the site owner whenever the contact form is used.
pub struct SmtpNotifier {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
    to: Mailbox,
}

impl SmtpNotifier {
    pub fn new(config: &SmtpConfig) -> Result<Self, NotifierError> {
        let creds = Credentials::new(config.username.clone(), config.password.to_string());

        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)
            .map_err(|e| NotifierError::Transport(e.to_string()))?
            .port(config.port)
            .credentials(creds)
            .build();

        Ok(SmtpNotifier {
            transport,
            from: parse_mailbox(&config.from)?,
            to: parse_mailbox(&config.notify_to)?,
        })
    }
}

fn parse_mailbox(address: &str) -> Result<Mailbox, NotifierError> {
    address
        .parse()
        .map_err(|e| NotifierError::Message(format!("Invalid address {}: {}", address, e)))
}

/// Plain-text notification for one inquiry, replying straight to the sender.
pub fn build_notification(from: Mailbox, to: Mailbox, inquiry: &Inquiry) -> Result<Message, NotifierError> {
    let body = format!(
        "Name: {}\nEmail: {}\nMessage: {}",
        inquiry.name, inquiry.email, inquiry.message
    );

    let mut builder = Message::builder()
        .from(from)
        .to(to)
        .subject(format!("New Inquiry from {}", inquiry.name))
        .header(ContentType::TEXT_PLAIN);

    if let Ok(reply_to) = inquiry.email.parse::<Mailbox>() {
        builder = builder.reply_to(reply_to);
    }

    builder
        .body(body)
        .map_err(|e| NotifierError::Message(e.to_string()))
}

#[async_trait]
impl InquiryNotifier for SmtpNotifier {
    #[tracing::instrument(skip(self, inquiry), fields(inquiry_id = inquiry.id))]
    async fn notify_new_inquiry(&self, inquiry: &Inquiry) -> Result<(), NotifierError> {
        let message = build_notification(self.from.clone(), self.to.clone(), inquiry)?;

        self.transport
            .send(message)
            .await
            .map_err(|e| NotifierError::Transport(e.to_string()))?;

        tracing::info!("Inquiry notification sent");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn inquiry(email: &str) -> Inquiry {
        Inquiry {
            id: 3,
            name: "Ada".into(),
            email: email.into(),
            message: "Can you build my site?".into(),
            created_at: Utc::now(),
        }
    }

    fn mailbox(address: &str) -> Mailbox {
        address.parse().unwrap()
    }

    #[test]
    fn notification_carries_inquiry_details() {
        let message = build_notification(
            mailbox("site@example.com"),
            mailbox("owner@example.com"),
            &inquiry("ada@example.com"),
        )
        .unwrap();

        let raw = String::from_utf8(message.formatted()).unwrap();
        assert!(raw.contains("Subject: New Inquiry from Ada"));
        assert!(raw.contains("Reply-To: ada@example.com"));
        assert!(raw.contains("Message: Can you build my site?"));
    }

    #[test]
    fn unparseable_sender_skips_reply_to() {
        let message = build_notification(
            mailbox("site@example.com"),
            mailbox("owner@example.com"),
            &inquiry("not an address"),
        )
        .unwrap();

        let raw = String::from_utf8(message.formatted()).unwrap();
        assert!(!raw.contains("Reply-To"));
    }

    #[test]
    fn invalid_configured_address_is_rejected() {
        assert!(matches!(parse_mailbox("nope"), Err(NotifierError::Message(_))));
    }
}
