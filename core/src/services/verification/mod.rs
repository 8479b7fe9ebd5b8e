//! Email verification and sign-up workflow
//!
//! A one-time code is issued to an email address and later consumed when the
//! company signs up with it. Codes live for a configurable window (30 minutes
//! by default).

mod config;
mod service;


pub use config::VerificationServiceConfig;
pub use service::{generate_code, VerificationService};
