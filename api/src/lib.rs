//! HTTP layer of the survey backend

pub mod app;
pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod state;

pub use app::create_app;
pub use state::{AppState, MemoryBundle, ServiceBundle, Stores};

#[cfg(feature = "mysql")]
pub use state::MySqlBundle;
