//! SMTP delivery via lettre

use async_trait::async_trait;
use lettre::{
    message::header::ContentType,
    transport::smtp::{authentication::Credentials, Error as SmtpError},
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};
use thiserror::Error;

use survey_core::services::notification::{EmailMessage, Notifier};
use survey_shared::config::SmtpConfig;
use survey_shared::mask_email;

#[derive(Debug, Error)]
pub enum EmailError {
    #[error("SMTP error: {0}")]
    Smtp(#[from] SmtpError),

    #[error("Failed to build message: {0}")]
    MessageBuild(#[from] lettre::error::Error),

    #[error("Invalid email address: {0}")]
    InvalidAddress(String),
}

#[derive(Clone)]
pub struct SmtpNotifier {
    mailer: AsyncSmtpTransport<Tokio1Executor>,
    from_address: String,
}

impl SmtpNotifier {
    /// Build the transport. STARTTLS with credentials when a username is set,
    /// otherwise a plain connection for local relays.
    pub fn new(config: &SmtpConfig) -> Result<Self, EmailError> {
        let mailer = match (&config.username, &config.password) {
            (Some(username), password) => {
                let credentials =
                    Credentials::new(username.clone(), password.clone().unwrap_or_default());
                AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)?
                    .port(config.port)
                    .credentials(credentials)
                    .build()
            }
            (None, _) => AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&config.host)
                .port(config.port)
                .build(),
        };

        Ok(Self {
            mailer,
            from_address: config.from_address.clone(),
        })
    }

    fn build_message(&self, message: &EmailMessage) -> Result<Message, EmailError> {
        let email = Message::builder()
            .from(
                self.from_address
                    .parse()
                    .map_err(|_| EmailError::InvalidAddress(self.from_address.clone()))?,
            )
            .to(message
                .to
                .parse()
                .map_err(|_| EmailError::InvalidAddress(message.to.clone()))?)
            .subject(&message.subject)
            .header(ContentType::TEXT_PLAIN)
            .body(message.body.clone())?;

        Ok(email)
    }

    pub async fn deliver(&self, message: &EmailMessage) -> Result<(), EmailError> {
        let email = self.build_message(message)?;
        self.mailer.send(email).await?;

        tracing::info!(
            to = %mask_email(&message.to),
            event = "email_sent",
            "Email delivered over SMTP"
        );
        Ok(())
    }
}

#[async_trait]
impl Notifier for SmtpNotifier {
    async fn send_email(&self, message: &EmailMessage) -> Result<(), String> {
        self.deliver(message).await.map_err(|e| {
            tracing::error!(
                to = %mask_email(&message.to),
                error = %e,
                event = "email_send_failed",
                "SMTP delivery failed"
            );
            e.to_string()
        })
    }
}
