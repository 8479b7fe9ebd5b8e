//! Shared utilities and common types for the survey backend
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types loaded from the environment
//! - The JSON response envelope
//! - Utility functions (email rules, slugs, log masking)

pub mod config;
pub mod types;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, AuthConfig, CorsConfig, DatabaseConfig, Environment, JwtConfig, LoggingConfig,
    NotificationChannel, NotificationConfig, PendingVerificationPolicy, QueueConfig,
    ServerConfig, SmtpConfig, StorageBackend,
};
pub use types::{ApiResponse, ResponseStatus};
pub use utils::{mask_email, slug, validation};
