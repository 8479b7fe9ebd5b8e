//! Redis-backed work queue
//!
//! Jobs are JSON documents pushed onto a Redis list with `LPUSH` and taken
//! off the other end with `BRPOP`, which gives FIFO delivery per list.

mod publisher;

pub use publisher::QueuePublisher;

use redis::RedisError;

#[derive(Debug, thiserror::Error)]
pub enum QueueError {
    /// `publish`/`pop` called before `connect`, or after `disconnect`
    #[error("Queue connection has not been established")]
    NotConnected,

    #[error("Invalid queue URL: {0}")]
    InvalidUrl(String),

    #[error("Redis error: {0}")]
    Redis(#[from] RedisError),

    #[error("Failed to encode or decode job: {0}")]
    Serialization(#[from] serde_json::Error),
}
