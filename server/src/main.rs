use anyhow::Context;
use recetas_server::config::Config;
use recetas_server::{api, app, db, telemetry, AppContext};
use std::env;
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Check for --openapi flag to dump spec and exit
    if env::args().any(|arg| arg == "--openapi") {
        println!("{}", api::openapi().to_pretty_json()?);
        return Ok(());
    }

    telemetry::init_telemetry("recetas-server")?;

    let config = Config::from_env().context("invalid configuration")?;
    let pool = db::create_pool(&config.database_url)
        .with_context(|| format!("failed to open database {}", config.database_url))?;

    let state = Arc::new(AppContext {
        pool,
        languages: config.languages.clone(),
    });

    let listener = tokio::net::TcpListener::bind(config.bind_address())
        .await
        .with_context(|| format!("failed to bind {}", config.bind_address()))?;
    let addr = listener.local_addr()?;

    tracing::info!("Server listening on {}", addr);
    tracing::info!("Swagger UI available at http://{}/swagger-ui/", addr);
    tracing::info!(
        languages = ?config
            .languages
            .supported()
            .iter()
            .map(|l| l.code.as_str())
            .collect::<Vec<_>>(),
        default = config.languages.default_code(),
        "language configuration"
    );

    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}
