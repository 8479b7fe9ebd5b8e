//! Session token issuing and verification (HS256)

mod config;
mod service;


pub use config::SessionTokenConfig;
pub use service::SessionTokenService;
