//! Seeds a configured remote store with the demo showcase projects.
//! Refuses to run in mock mode — the mock store seeds itself at startup.

use anyhow::{bail, Context};
use domains::{ProjectStatus, ProjectStore};
use storage_adapters::{demo_projects, RemoteStore};
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
    let Some(store_config) = config.store() else {
        bail!("seeding requires real store credentials; the mock store seeds itself");
    };

    let store = RemoteStore::new(store_config)?;
    for (submission, status) in demo_projects() {
        let title = submission.title.clone();
        let project = store
            .insert_project(submission)
            .await
            .with_context(|| format!("failed to insert {title}"))?;
        if status != ProjectStatus::Pending {
            store
                .set_project_status(project.id, status)
                .await
                .with_context(|| format!("failed to set status on {title}"))?;
        }
        info!(%title, %status, "seeded project");
    }

    info!("seeding complete");
    Ok(())
}
