use std::sync::Arc;

use tokio::sync::watch;

use kargoline::infrastructure::observability::{TracingConfig, init_tracing};
use kargoline::presentation::{AppState, Environment, Settings};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let environment = Environment::from_env().map_err(anyhow::Error::msg)?;
    let settings = Settings::load(environment)?;

    init_tracing(
        &TracingConfig::new(environment.to_string())
            .with_json(settings.logging.enable_json)
            .with_filter(&settings.logging.level),
    );

    let state = AppState::from_settings(settings)?;

    let job_count = state.job_service.load().await?;
    let session = state.account_service.restore_session().await?;
    tracing::info!(
        jobs = job_count,
        signed_in = session.is_some(),
        "Marketplace state restored"
    );

    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    let notifications = tokio::spawn(
        Arc::clone(&state.notification_center).run(state.job_service.subscribe()),
    );
    let sync = tokio::spawn(state.sync_worker().run(shutdown_rx));

    tokio::signal::ctrl_c().await?;
    tracing::info!("Received Ctrl+C, shutting down");

    let _ = shutdown_tx.send(true);
    sync.await?;

    // The notification loop ends once the job service, and with it the
    // event sender, is gone.
    drop(state);
    notifications.await?;

    Ok(())
}
