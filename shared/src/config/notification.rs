//! Outgoing notification configuration

use serde::{Deserialize, Serialize};

use super::{env_opt, env_or};

/// Transport used to deliver verification and reset emails
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationChannel {
    /// Write the message to the log (development)
    Log,
    /// Send directly over SMTP
    Smtp,
    /// Push an email job onto the Redis work queue
    Queue,
}

impl Default for NotificationChannel {
    fn default() -> Self {
        NotificationChannel::Log
    }
}

impl std::str::FromStr for NotificationChannel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "log" => Ok(NotificationChannel::Log),
            "smtp" => Ok(NotificationChannel::Smtp),
            "queue" | "redis" => Ok(NotificationChannel::Queue),
            _ => Err(format!("Invalid notification channel: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub username: Option<String>,
    pub password: Option<String>,
    /// Mailbox used in the `From` header, e.g. `Survey <no-reply@example.com>`
    pub from_address: String,
}

impl Default for SmtpConfig {
    fn default() -> Self {
        Self {
            host: String::from("localhost"),
            port: 587,
            username: None,
            password: None,
            from_address: String::from("Survey <no-reply@survey.local>"),
        }
    }
}

/// Redis work queue settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct QueueConfig {
    pub url: String,
    /// Name of the Redis list email jobs are pushed onto
    pub queue_name: String,
    pub max_retries: u32,
    /// Initial delay between connection attempts, doubled on each retry
    pub retry_delay_ms: u64,
}

impl Default for QueueConfig {
    fn default() -> Self {
        Self {
            url: String::from("redis://127.0.0.1:6379"),
            queue_name: String::from("email"),
            max_retries: 3,
            retry_delay_ms: 100,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct NotificationConfig {
    pub channel: NotificationChannel,
    #[serde(default)]
    pub smtp: SmtpConfig,
    #[serde(default)]
    pub queue: QueueConfig,
}

impl NotificationConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let smtp_defaults = SmtpConfig::default();
        let queue_defaults = QueueConfig::default();

        Self {
            channel: env_or("NOTIFICATION_CHANNEL", NotificationChannel::default()),
            smtp: SmtpConfig {
                host: env_opt("SMTP_HOST").unwrap_or(smtp_defaults.host),
                port: env_or("SMTP_PORT", smtp_defaults.port),
                username: env_opt("SMTP_USERNAME"),
                password: env_opt("SMTP_PASSWORD"),
                from_address: env_opt("SMTP_FROM").unwrap_or(smtp_defaults.from_address),
            },
            queue: QueueConfig {
                url: env_opt("REDIS_URL").unwrap_or(queue_defaults.url),
                queue_name: env_opt("QUEUE_NAME").unwrap_or(queue_defaults.queue_name),
                max_retries: env_or("QUEUE_MAX_RETRIES", queue_defaults.max_retries),
                retry_delay_ms: env_or("QUEUE_RETRY_DELAY_MS", queue_defaults.retry_delay_ms),
            },
        }
    }
}
