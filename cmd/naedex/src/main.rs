//! The naedex server binary: loads configuration, selects the backend once,
//! assembles the services, and serves the JSON API until shutdown.

use anyhow::Context;
use api_adapters::AppState;
use mail_adapters::BrevoMailer;
use services::{EngagementService, ModerationService, Notifier, SessionManager};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = configs::AppConfig::load().context("failed to load configuration")?;

    // Backend selection happens exactly once; everything downstream sees
    // the same port traits whichever store came back.
    let store_config = config.store();
    let stores = storage_adapters::connect(store_config.as_ref())?;
    let auth = auth_adapters::connect(store_config.as_ref())?;

    let mailer = Arc::new(BrevoMailer::new(config.mail()));
    let notifier = Arc::new(Notifier::new(mailer));

    // Surface the toast feed in the server log.
    let mut toasts = notifier.subscribe();
    tokio::spawn(async move {
        while let Ok(toast) = toasts.recv().await {
            info!(title = %toast.title, message = %toast.message, "toast");
        }
    });

    let state = AppState {
        moderation: Arc::new(ModerationService::new(stores.projects, notifier.clone())),
        engagement: Arc::new(EngagementService::new(stores.engagement)),
        sessions: Arc::new(SessionManager::new(auth, stores.profiles)),
    };

    let app = api_adapters::router(state);
    let address = format!("0.0.0.0:{}", config.port);
    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("failed to bind {address}"))?;
    info!(%address, "naedex listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("server shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
        info!("received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
        info!("received terminate signal, shutting down");
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
