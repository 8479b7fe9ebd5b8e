//! Hand emails to the background worker through the Redis queue

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use survey_core::services::notification::{EmailMessage, Notifier};
use survey_shared::mask_email;

use crate::queue::QueuePublisher;

/// Payload pushed onto the email queue
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailJob {
    pub id: Uuid,
    pub to: String,
    pub subject: String,
    pub body: String,
    pub enqueued_at: DateTime<Utc>,
}

impl EmailJob {
    pub fn into_message(self) -> EmailMessage {
        EmailMessage::new(self.to, self.subject, self.body)
    }
}

impl From<&EmailMessage> for EmailJob {
    fn from(message: &EmailMessage) -> Self {
        Self {
            id: Uuid::new_v4(),
            to: message.to.clone(),
            subject: message.subject.clone(),
            body: message.body.clone(),
            enqueued_at: Utc::now(),
        }
    }
}

pub struct QueueNotifier {
    publisher: Arc<QueuePublisher>,
    queue_name: String,
}

impl QueueNotifier {
    pub fn new(publisher: Arc<QueuePublisher>, queue_name: impl Into<String>) -> Self {
        Self {
            publisher,
            queue_name: queue_name.into(),
        }
    }

    pub fn publisher(&self) -> &Arc<QueuePublisher> {
        &self.publisher
    }
}

#[async_trait]
impl Notifier for QueueNotifier {
    async fn send_email(&self, message: &EmailMessage) -> Result<(), String> {
        let job = EmailJob::from(message);
        self.publisher
            .publish(&self.queue_name, &job)
            .await
            .map_err(|e| {
                tracing::error!(
                    to = %mask_email(&message.to),
                    queue = %self.queue_name,
                    error = %e,
                    event = "email_enqueue_failed",
                    "Failed to enqueue email"
                );
                e.to_string()
            })?;

        tracing::info!(
            job_id = %job.id,
            to = %mask_email(&message.to),
            event = "email_enqueued",
            "Email queued for delivery"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_job_wire_format() {
        let message = EmailMessage::verification_code("owner@acme.com", "A1B2C3");
        let job = EmailJob::from(&message);

        let json = serde_json::to_value(&job).unwrap();
        assert_eq!(json["to"], "owner@acme.com");
        assert!(json.get("enqueuedAt").is_some());

        let decoded: EmailJob = serde_json::from_value(json).unwrap();
        assert_eq!(decoded.into_message(), message);
    }
}
