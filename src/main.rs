use std::sync::Arc;

use tokio::signal;
use tower_http::trace::TraceLayer;
use tracing::{debug, info, warn};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use yookve_provisioner::api::{self, AppState};
use yookve_provisioner::config::Config;
use yookve_provisioner::provision::{provision_at_startup, verify_mappings};
use yookve_provisioner::registry;
use yookve_provisioner::store::{IndexStore, OpenSearchClient};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env must be loaded before LOG_DIR and the rest of the settings are read
    let dotenv_result = dotenvy::dotenv();

    let config = Config::from_env();

    std::fs::create_dir_all(&config.log_dir).unwrap_or_else(|e| {
        eprintln!(
            "Warning: Could not create log directory {}: {}",
            config.log_dir.display(),
            e
        );
    });

    let file_appender = RollingFileAppender::new(Rotation::DAILY, &config.log_dir, "yookve-provisioner.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,yookve_provisioner=debug")),
        )
        .with(fmt::layer().with_target(true))
        .with(
            fmt::layer()
                .with_target(true)
                .with_ansi(false)
                .json()
                .with_writer(non_blocking),
        )
        .init();

    debug!("Logging initialized - log directory: {}", config.log_dir.display());

    if let Err(e) = dotenv_result {
        debug!("No .env file loaded: {}", e);
    }

    for warning in config.insecure_defaults() {
        warn!("Insecure configuration: {}", warning);
    }

    registry::validate()?;

    info!("OpenSearch endpoint: {}", config.opensearch.base_url());
    info!("JWT token lifetime: {:?}", config.jwt.access_token_expires);

    let client = OpenSearchClient::new(&config.opensearch)?;

    // Serving against missing indices is not an option, so failures here end startup.
    // With DEBUG=true an unreachable cluster is tolerated and provisioning is skipped.
    match provision_at_startup(&client, config.debug).await? {
        Some(report) => {
            info!(
                "Provisioned indices: created={:?}, existing={:?}",
                report.created, report.existing
            );

            match verify_mappings(&client).await {
                Ok(drift) if !drift.passed() => warn!("\n{}", drift.error_log()),
                Ok(_) => {}
                Err(e) => warn!("Could not verify index mappings: {}", e),
            }
        }
        None => warn!("Serving admin API without a reachable OpenSearch cluster"),
    }

    let store: Arc<dyn IndexStore> = Arc::new(client);
    let state = Arc::new(AppState::new(store));
    let app = api::router(state).layer(TraceLayer::new_for_http());

    let socket_addr = config.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(&socket_addr).await?;
    info!("Admin API listening on {}", socket_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Received shutdown signal");
}
