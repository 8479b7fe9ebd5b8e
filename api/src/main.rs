use std::sync::Arc;

use actix_web::{web, HttpServer};
use anyhow::Context;
use tokio::sync::watch;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use survey_api::{create_app, AppState, MemoryBundle, ServiceBundle, Stores};
use survey_infra::{EmailNotifier, EmailWorker, QueuePublisher, SmtpNotifier};
use survey_shared::config::{
    AppConfig, LogFormat, LoggingConfig, NotificationChannel, StorageBackend,
};

fn init_tracing(config: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.level.clone()));

    let json = matches!(config.format, LogFormat::Json).then(|| {
        tracing_subscriber::fmt::layer()
            .json()
            .flatten_event(true)
            .with_file(config.source_location)
            .with_line_number(config.source_location)
    });
    let pretty = matches!(config.format, LogFormat::Pretty)
        .then(|| tracing_subscriber::fmt::layer().pretty());
    let compact = matches!(config.format, LogFormat::Compact)
        .then(|| tracing_subscriber::fmt::layer().compact());

    tracing_subscriber::registry()
        .with(filter)
        .with(json)
        .with(pretty)
        .with(compact)
        .init();
}

/// Start the queue consumer when emails go through the queue and SMTP is set up
fn spawn_email_worker(config: &AppConfig) -> anyhow::Result<Option<watch::Sender<bool>>> {
    if config.notification.channel != NotificationChannel::Queue {
        return Ok(None);
    }

    let sender = SmtpNotifier::new(&config.notification.smtp).context("invalid SMTP settings")?;
    let publisher = Arc::new(QueuePublisher::new(config.notification.queue.clone()));
    let worker = EmailWorker::new(
        publisher.clone(),
        sender,
        config.notification.queue.queue_name.clone(),
    );
    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    tokio::spawn(async move {
        if let Err(e) = publisher.connect().await {
            tracing::error!(error = %e, "Email worker could not connect to the queue");
        }
        worker.run(shutdown_rx).await;
    });

    Ok(Some(shutdown_tx))
}

async fn serve<B: ServiceBundle>(state: AppState<B>, config: &AppConfig) -> anyhow::Result<()> {
    let state = web::Data::new(state);
    let cors = config.cors.clone();
    let bind_address = config.server.bind_address();

    tracing::info!(address = %bind_address, event = "server_starting", "Starting survey API");

    let mut server = HttpServer::new(move || create_app(state.clone(), &cors));
    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }

    server
        .bind(&bind_address)
        .with_context(|| format!("failed to bind {}", bind_address))?
        .run()
        .await
        .context("server error")
}

#[cfg(feature = "mysql")]
async fn serve_mysql(notifier: Arc<EmailNotifier>, config: &AppConfig) -> anyhow::Result<()> {
    use survey_api::MySqlBundle;
    use survey_infra::database::DatabasePool;

    let database = DatabasePool::new(&config.database)
        .await
        .context("failed to connect to MySQL")?;
    if config.database.run_migrations {
        database
            .run_migrations()
            .await
            .context("failed to run migrations")?;
    }

    let state = AppState::<MySqlBundle>::new(Stores::mysql(&database), notifier, config);
    let result = serve(state, config).await;
    database.close().await;
    result
}

#[cfg(not(feature = "mysql"))]
async fn serve_mysql(_notifier: Arc<EmailNotifier>, _config: &AppConfig) -> anyhow::Result<()> {
    anyhow::bail!("STORAGE_BACKEND=mysql requires the `mysql` feature")
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env();
    init_tracing(&config.logging);

    tracing::info!(
        environment = %config.environment,
        storage = ?config.storage,
        notification = ?config.notification.channel,
        "Loaded configuration"
    );

    let notifier = EmailNotifier::from_config(&config.notification)?;
    notifier.connect().await?;
    let notifier = Arc::new(notifier);
    let worker_shutdown = spawn_email_worker(&config)?;

    let result = match config.storage {
        StorageBackend::Memory => {
            tracing::warn!("Using in-memory storage; data is lost on restart");
            let state = AppState::<MemoryBundle>::new(Stores::in_memory(), notifier, &config);
            serve(state, &config).await
        }
        StorageBackend::MySql => serve_mysql(notifier, &config).await,
    };

    if let Some(shutdown) = worker_shutdown {
        let _ = shutdown.send(true);
    }

    tracing::info!(event = "server_stopped", "Survey API stopped");
    result
}
