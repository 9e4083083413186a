//! Server binary: read settings, open the store, synchronize the schema, serve until signalled.

use bookshelf_api::{app, sync_schema, AppState, Database, Settings};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let settings = Settings::from_env();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("bookshelf_api=info,tower_http=info")),
        )
        .init();
    let settings = settings.map_err(|e| {
        tracing::error!(error = %e, "invalid configuration");
        e
    })?;

    let db = Database::connect(&settings.db).await.map_err(|e| {
        tracing::error!(error = %e, "could not open database connection");
        e
    })?;
    sync_schema(&db).await.map_err(|e| {
        tracing::error!(error = %e, "schema synchronization failed");
        e
    })?;

    let app = app(AppState::new(db.clone()), settings.max_body_bytes);
    let listener = TcpListener::bind(settings.listen_addr).await.map_err(|e| {
        tracing::error!(error = %e, addr = %settings.listen_addr, "could not bind listener");
        e
    })?;
    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    db.close().await;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %e, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to listen for SIGTERM");
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
    tracing::info!("shutdown signal received");
}
