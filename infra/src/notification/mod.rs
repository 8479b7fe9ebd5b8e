//! Email delivery implementations of the core `Notifier` port

mod log;
mod queue;
mod smtp;
mod worker;

pub use self::log::LogNotifier;
pub use queue::{EmailJob, QueueNotifier};
pub use smtp::{EmailError, SmtpNotifier};
pub use worker::EmailWorker;

use std::sync::Arc;

use async_trait::async_trait;
use survey_core::services::notification::{EmailMessage, Notifier};
use survey_shared::config::{NotificationChannel, NotificationConfig};

use crate::queue::QueuePublisher;
use crate::InfrastructureError;

/// Notifier selected at startup from `NotificationConfig::channel`
pub enum EmailNotifier {
    Log(LogNotifier),
    Smtp(SmtpNotifier),
    Queue(QueueNotifier),
}

impl EmailNotifier {
    /// Build the configured notifier. The queue variant starts unconnected;
    /// call [`connect`](Self::connect) before serving requests.
    pub fn from_config(config: &NotificationConfig) -> Result<Self, InfrastructureError> {
        match config.channel {
            NotificationChannel::Log => Ok(EmailNotifier::Log(LogNotifier::new())),
            NotificationChannel::Smtp => SmtpNotifier::new(&config.smtp)
                .map(EmailNotifier::Smtp)
                .map_err(|e| InfrastructureError::Email(e.to_string())),
            NotificationChannel::Queue => {
                let publisher = Arc::new(QueuePublisher::new(config.queue.clone()));
                Ok(EmailNotifier::Queue(QueueNotifier::new(
                    publisher,
                    config.queue.queue_name.clone(),
                )))
            }
        }
    }

    pub async fn connect(&self) -> Result<(), InfrastructureError> {
        if let EmailNotifier::Queue(notifier) = self {
            notifier.publisher().connect().await?;
        }
        Ok(())
    }

    pub fn channel(&self) -> NotificationChannel {
        match self {
            EmailNotifier::Log(_) => NotificationChannel::Log,
            EmailNotifier::Smtp(_) => NotificationChannel::Smtp,
            EmailNotifier::Queue(_) => NotificationChannel::Queue,
        }
    }
}

#[async_trait]
impl Notifier for EmailNotifier {
    async fn send_email(&self, message: &EmailMessage) -> Result<(), String> {
        match self {
            EmailNotifier::Log(n) => n.send_email(message).await,
            EmailNotifier::Smtp(n) => n.send_email(message).await,
            EmailNotifier::Queue(n) => n.send_email(message).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_config_selects_channel() {
        let mut config = NotificationConfig::default();
        let notifier = EmailNotifier::from_config(&config).unwrap();
        assert_eq!(notifier.channel(), NotificationChannel::Log);

        config.channel = NotificationChannel::Queue;
        let notifier = EmailNotifier::from_config(&config).unwrap();
        assert_eq!(notifier.channel(), NotificationChannel::Queue);
    }

    #[tokio::test]
    async fn test_unconnected_queue_notifier_fails_to_send() {
        let config = NotificationConfig {
            channel: NotificationChannel::Queue,
            ..NotificationConfig::default()
        };
        let notifier = EmailNotifier::from_config(&config).unwrap();

        let result = notifier
            .send_email(&EmailMessage::verification_code("owner@acme.com", "A1B2C3"))
            .await;
        assert!(result.is_err());
    }
}
