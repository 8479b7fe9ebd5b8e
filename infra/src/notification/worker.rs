//! Background consumer for the email queue

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::time::sleep;
use tracing::{error, info, warn};

use survey_core::services::notification::Notifier;
use survey_shared::mask_email;

use super::queue::EmailJob;
use crate::queue::{QueueError, QueuePublisher};

/// Seconds BRPOP waits before the loop rechecks for shutdown
const POLL_TIMEOUT_SECS: f64 = 5.0;
const ERROR_BACKOFF: Duration = Duration::from_secs(1);

/// Pops [`EmailJob`]s and hands them to a delivering notifier (usually SMTP).
///
/// The worker needs its own publisher: a blocking pop holds the connection.
pub struct EmailWorker<N: Notifier> {
    publisher: Arc<QueuePublisher>,
    sender: N,
    queue_name: String,
}

impl<N: Notifier> EmailWorker<N> {
    pub fn new(publisher: Arc<QueuePublisher>, sender: N, queue_name: impl Into<String>) -> Self {
        Self {
            publisher,
            sender,
            queue_name: queue_name.into(),
        }
    }

    /// Deliver one job. Failed deliveries are logged and dropped.
    pub async fn deliver(&self, job: EmailJob) -> bool {
        let job_id = job.id;
        let to = mask_email(&job.to);
        match self.sender.send_email(&job.into_message()).await {
            Ok(()) => {
                info!(job_id = %job_id, to = %to, event = "email_job_delivered", "Delivered queued email");
                true
            }
            Err(reason) => {
                error!(
                    job_id = %job_id,
                    to = %to,
                    error = %reason,
                    event = "email_job_failed",
                    "Dropping queued email after delivery failure"
                );
                false
            }
        }
    }

    /// Wait for and process the next job. Returns `Ok(false)` on poll timeout.
    pub async fn process_next(&self) -> Result<bool, QueueError> {
        match self
            .publisher
            .pop::<EmailJob>(&self.queue_name, POLL_TIMEOUT_SECS)
            .await?
        {
            Some(job) => {
                self.deliver(job).await;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Run until `shutdown` flips to `true` or its sender is dropped.
    ///
    /// Shutdown is checked between polls, so a job already popped is always
    /// delivered before the worker stops. Delivery is at most once: a job
    /// whose send fails is not requeued.
    pub async fn run(self, mut shutdown: watch::Receiver<bool>) {
        info!(queue = %self.queue_name, event = "email_worker_started", "Email worker started");

        while !stop_requested(&shutdown) {
            if let Err(e) = self.process_next().await {
                warn!(error = %e, event = "email_worker_error", "Email worker poll failed");
                if matches!(e, QueueError::NotConnected) {
                    if let Err(e) = self.publisher.connect().await {
                        error!(error = %e, "Email worker could not reconnect");
                    }
                }

                // Only the idle backoff is cut short by shutdown
                tokio::select! {
                    _ = sleep(ERROR_BACKOFF) => {}
                    changed = shutdown.changed() => {
                        if changed.is_err() {
                            break;
                        }
                    }
                }
            }
        }

        self.publisher.disconnect().await;
        info!(event = "email_worker_stopped", "Email worker stopped");
    }
}

fn stop_requested(shutdown: &watch::Receiver<bool>) -> bool {
    *shutdown.borrow() || shutdown.has_changed().is_err()
}
