//! Shared fixtures for service tests

use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use crate::domain::entities::account::NewAccount;
use crate::services::notification::{EmailMessage, Notifier};

/// Notifier that remembers every message it was asked to send
#[derive(Clone, Default)]
pub struct RecordingNotifier {
    pub sent: Arc<Mutex<Vec<EmailMessage>>>,
    pub should_fail: bool,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            should_fail: true,
            ..Self::default()
        }
    }

    pub fn sent(&self) -> Vec<EmailMessage> {
        self.sent.lock().unwrap().clone()
    }

    pub fn last(&self) -> Option<EmailMessage> {
        self.sent.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn send_email(&self, message: &EmailMessage) -> Result<(), String> {
        if self.should_fail {
            return Err("SMTP connection refused".to_string());
        }
        self.sent.lock().unwrap().push(message.clone());
        Ok(())
    }
}

pub fn new_account(email: &str) -> NewAccount {
    NewAccount {
        name: "Acme Research Ltd".to_string(),
        email: email.to_string(),
        address: "1 Main Street".to_string(),
        city: "Ikeja".to_string(),
        state: "Lagos".to_string(),
        password: "secret1".to_string(),
    }
}
