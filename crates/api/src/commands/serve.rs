//! Serve command - Starts the HTTP server.

use std::sync::Arc;

use user_service_lib::{build_user_service, infra::Database};

use crate::cli::args::ServeArgs;
use crate::config::ApiConfig;
use crate::routes::create_router;
use crate::state::AppState;

/// Execute the serve command
pub async fn execute(
    args: ServeArgs,
    mut config: ApiConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }

    tracing::info!("Starting server...");

    let db = Database::connect(config.user_service.connect_options()).await?;
    let user_service = build_user_service(&db);

    let addr = config.server.addr();
    let state = AppState::new(user_service, Arc::new(db), config);
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server running on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
}
