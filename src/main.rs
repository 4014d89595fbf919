use std::sync::Arc;

use anyhow::{Context, Result};
use catalogdb::{
    CatalogDb,
    config::{AppConfig, Cli},
    web::{AppState, Paging, build_router},
};
use clap::Parser;
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let config = cli.apply(AppConfig::from_env().context("failed to load configuration")?);
    config.validate()?;

    let db = match &config.data_dir {
        Some(dir) => CatalogDb::open(dir)
            .with_context(|| format!("failed to open catalog in {}", dir.display()))?,
        None => {
            info!("no data directory configured, catalog is in-memory only");
            CatalogDb::in_memory()
        }
    };
    let db = Arc::new(db);

    let checkpointer = match config.checkpoint_interval() {
        Some(interval) if db.is_persistent() => {
            Some(tokio::spawn(checkpoint_loop(Arc::clone(&db), interval)))
        }
        _ => None,
    };

    let app = build_router(AppState::new(Arc::clone(&db)).with_paging(Paging::from_config(&config)));

    let addr = config.address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind to {addr}"))?;

    info!(address = %addr, "catalog server started");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    if let Some(handle) = checkpointer {
        handle.abort();
        let _ = handle.await;
    }
    db.checkpoint_blocking()
        .await
        .context("final checkpoint failed")?;
    info!("catalog server stopped");
    Ok(())
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("catalogdb=debug,tower_http=info")),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

async fn checkpoint_loop(db: Arc<CatalogDb>, interval: std::time::Duration) {
    let mut ticker = tokio::time::interval(interval);
    // the first tick completes immediately
    ticker.tick().await;
    loop {
        ticker.tick().await;
        if let Err(err) = Arc::clone(&db).checkpoint_blocking().await {
            warn!(error = %err, "periodic checkpoint failed");
        }
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            error!(error = %err, "unable to install Ctrl+C signal handler");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};

        match signal(SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                error!(error = %err, "unable to install SIGTERM handler");
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
}
