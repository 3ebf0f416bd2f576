use anyhow::Context;
use sea_orm::Database;
use tracing::{error, info};

use docket_core::config::Config;
use docket_core::tracing::init_tracing;

use docket_practice::config::PracticeConfig;
use docket_practice::router::build_router;
use docket_practice::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing("info");

    let config = PracticeConfig::from_env().context("failed to load configuration")?;

    let db = Database::connect(&config.database_url)
        .await
        .context("failed to connect to database")?;

    let state = AppState {
        db,
        slots: config.slots().into(),
    };

    let router = build_router(state, config.cors_permissive);
    let http_addr = format!("0.0.0.0:{}", config.practice_port);
    let listener = tokio::net::TcpListener::bind(&http_addr)
        .await
        .with_context(|| format!("failed to bind {http_addr}"))?;

    info!("practice service listening on {http_addr}");
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("practice service stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "failed to install ctrl-c handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("shutdown signal received");
}
