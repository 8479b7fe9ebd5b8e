pub mod auth;
pub mod cors;

pub use auth::{authenticate, AuthenticatedAccount};
pub use cors::create_cors;
