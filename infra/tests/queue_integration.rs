//! Integration tests for the Redis work queue

use std::sync::Arc;

use survey_core::services::notification::{EmailMessage, Notifier};
use survey_infra::{EmailJob, QueueNotifier, QueuePublisher};
use survey_shared::config::QueueConfig;

fn queue_config() -> QueueConfig {
    QueueConfig {
        url: std::env::var("TEST_REDIS_URL").unwrap_or_else(|_| "redis://127.0.0.1:6379".to_string()),
        queue_name: format!("email-test-{}", uuid::Uuid::new_v4().simple()),
        ..QueueConfig::default()
    }
}

#[tokio::test]
#[ignore] // Requires Redis to be running
async fn test_queued_email_is_popped_in_order() {
    let config = queue_config();
    let publisher = Arc::new(QueuePublisher::new(config.clone()));
    publisher.connect().await.expect("Failed to connect to Redis");

    let notifier = QueueNotifier::new(publisher.clone(), config.queue_name.clone());
    let first = EmailMessage::verification_code("owner@acme.com", "A1B2C3");
    let second = EmailMessage::verification_code("other@acme.net", "D4E5F6");
    notifier.send_email(&first).await.unwrap();
    notifier.send_email(&second).await.unwrap();

    let popped: EmailJob = publisher.pop(&config.queue_name, 1.0).await.unwrap().unwrap();
    assert_eq!(popped.into_message(), first);
    let popped: EmailJob = publisher.pop(&config.queue_name, 1.0).await.unwrap().unwrap();
    assert_eq!(popped.into_message(), second);

    let empty: Option<EmailJob> = publisher.pop(&config.queue_name, 1.0).await.unwrap();
    assert!(empty.is_none());

    publisher.disconnect().await;
    assert!(!publisher.is_connected().await);
}
