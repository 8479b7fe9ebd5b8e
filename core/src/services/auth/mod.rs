//! Authentication workflow: login and the password reset token lifecycle
//!
//! Reset tokens move `none -> issued -> consumed | expired-cleared`. Only the
//! SHA-256 of a reset token is stored; the raw value exists only in the email.

mod config;
mod service;

#[cfg(test)]
mod tests;

pub use config::AuthServiceConfig;
pub use service::{hash_reset_token, AuthService, SessionGrant};
