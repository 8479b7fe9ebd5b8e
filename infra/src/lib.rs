//! # Infrastructure Layer
//!
//! Concrete implementations of the ports defined in `survey_core`:
//! - **Database**: MySQL repositories using SQLx, plus migrations
//! - **Queue**: Redis-backed work queue publisher with connection lifecycle
//! - **Notification**: email delivery via log, SMTP or the work queue
//!
//! ## Features
//!
//! - `mysql`: Enable MySQL database support (default)

/// Database module - MySQL implementations using SQLx
#[cfg(feature = "mysql")]
pub mod database;

/// Email delivery implementations of `Notifier`
pub mod notification;

/// Redis work queue
pub mod queue;

pub use notification::{EmailJob, EmailNotifier, EmailWorker, LogNotifier, QueueNotifier, SmtpNotifier};
pub use queue::{QueueError, QueuePublisher};

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Database connection or query error
    #[cfg(feature = "mysql")]
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Migration failure
    #[cfg(feature = "mysql")]
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// Work queue error
    #[error("Queue error: {0}")]
    Queue(#[from] QueueError),

    /// SMTP transport or message error
    #[error("Email error: {0}")]
    Email(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Mask credentials in a connection URL before logging it
pub(crate) fn mask_url(url: &str) -> String {
    if let Some(at_pos) = url.rfind('@') {
        if let Some(proto_end) = url.find("://") {
            let proto = &url[..proto_end + 3];
            let host_part = &url[at_pos..];
            return format!("{}****{}", proto, host_part);
        }
    }
    url.to_string()
}
