//! Queue publisher with an explicit connection lifecycle

use std::time::Duration;

use redis::aio::MultiplexedConnection;
use redis::{AsyncCommands, Client};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::sync::RwLock;
use tokio::time::sleep;
use tracing::{debug, error, info, warn};

use survey_shared::config::QueueConfig;

use super::QueueError;
use crate::mask_url;

/// Upper bound for the reconnect backoff
const MAX_RETRY_DELAY_MS: u64 = 5000;

/// Publishes and consumes JSON jobs on Redis lists.
///
/// Constructing a publisher does not touch the network; call [`connect`](Self::connect)
/// once at startup. Operations on an unconnected publisher fail with
/// [`QueueError::NotConnected`].
pub struct QueuePublisher {
    config: QueueConfig,
    connection: RwLock<Option<MultiplexedConnection>>,
}

impl QueuePublisher {
    pub fn new(config: QueueConfig) -> Self {
        Self {
            config,
            connection: RwLock::new(None),
        }
    }

    pub fn config(&self) -> &QueueConfig {
        &self.config
    }

    /// Open the connection, retrying with exponential backoff
    pub async fn connect(&self) -> Result<(), QueueError> {
        info!(
            url = %mask_url(&self.config.url),
            event = "queue_connecting",
            "Connecting to work queue"
        );

        let client = Client::open(self.config.url.as_str())
            .map_err(|e| QueueError::InvalidUrl(e.to_string()))?;
        let connection = self.connect_with_retry(&client).await?;

        *self.connection.write().await = Some(connection);
        Ok(())
    }

    async fn connect_with_retry(&self, client: &Client) -> Result<MultiplexedConnection, QueueError> {
        let max_retries = self.config.max_retries.max(1);
        let mut attempts = 0;
        let mut delay = self.config.retry_delay_ms;

        loop {
            attempts += 1;
            debug!(attempt = attempts, "Attempting to connect to Redis");

            match client.get_multiplexed_async_connection().await {
                Ok(connection) => {
                    info!(event = "queue_connected", "Connected to work queue");
                    return Ok(connection);
                }
                Err(e) if attempts < max_retries => {
                    warn!(
                        attempt = attempts,
                        max_retries,
                        delay_ms = delay,
                        error = %e,
                        "Failed to connect to Redis, retrying"
                    );
                    sleep(Duration::from_millis(delay)).await;
                    delay = (delay * 2).min(MAX_RETRY_DELAY_MS);
                }
                Err(e) => {
                    error!(
                        attempts,
                        error = %e,
                        event = "queue_connect_failed",
                        "Failed to connect to Redis"
                    );
                    return Err(QueueError::Redis(e));
                }
            }
        }
    }

    pub async fn is_connected(&self) -> bool {
        self.connection.read().await.is_some()
    }

    async fn current_connection(&self) -> Result<MultiplexedConnection, QueueError> {
        self.connection
            .read()
            .await
            .clone()
            .ok_or(QueueError::NotConnected)
    }

    /// Serialize `job` and push it onto `queue`.
    ///
    /// A failed push drops the connection, reconnects once and retries.
    pub async fn publish<T: Serialize>(&self, queue: &str, job: &T) -> Result<(), QueueError> {
        let payload = serde_json::to_string(job)?;
        let mut conn = self.current_connection().await?;

        match conn.lpush::<_, _, ()>(queue, &payload).await {
            Ok(()) => {
                debug!(queue, event = "job_published", "Published job");
                Ok(())
            }
            Err(e) => {
                warn!(queue, error = %e, "Publish failed, reconnecting");
                *self.connection.write().await = None;
                self.connect().await?;

                let mut conn = self.current_connection().await?;
                conn.lpush::<_, _, ()>(queue, &payload).await?;
                debug!(queue, event = "job_published", "Published job after reconnect");
                Ok(())
            }
        }
    }

    /// Block up to `timeout_secs` for the next job on `queue`.
    ///
    /// Returns `Ok(None)` when the timeout elapses with no job.
    pub async fn pop<T: DeserializeOwned>(
        &self,
        queue: &str,
        timeout_secs: f64,
    ) -> Result<Option<T>, QueueError> {
        let mut conn = self.current_connection().await?;
        let popped: Option<(String, String)> = conn.brpop(queue, timeout_secs).await?;

        match popped {
            Some((_, payload)) => Ok(Some(serde_json::from_str(&payload)?)),
            None => Ok(None),
        }
    }

    pub async fn disconnect(&self) {
        if self.connection.write().await.take().is_some() {
            info!(event = "queue_disconnected", "Disconnected from work queue");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Serialize, Deserialize)]
    struct Job {
        id: u32,
    }

    #[tokio::test]
    async fn test_publish_before_connect_is_rejected() {
        let publisher = QueuePublisher::new(QueueConfig::default());

        assert!(!publisher.is_connected().await);
        let result = publisher.publish("email", &Job { id: 1 }).await;
        assert!(matches!(result, Err(QueueError::NotConnected)));
    }

    #[tokio::test]
    async fn test_pop_before_connect_is_rejected() {
        let publisher = QueuePublisher::new(QueueConfig::default());

        let result = publisher.pop::<Job>("email", 1.0).await;
        assert!(matches!(result, Err(QueueError::NotConnected)));
    }

    #[tokio::test]
    async fn test_invalid_url_fails_without_retrying() {
        let publisher = QueuePublisher::new(QueueConfig {
            url: "not a url".to_string(),
            ..QueueConfig::default()
        });

        let result = publisher.connect().await;
        assert!(matches!(result, Err(QueueError::InvalidUrl(_))));
        assert!(!publisher.is_connected().await);
    }

    #[tokio::test]
    async fn test_disconnect_without_connection_is_noop() {
        let publisher = QueuePublisher::new(QueueConfig::default());
        publisher.disconnect().await;
        assert!(!publisher.is_connected().await);
    }
}
