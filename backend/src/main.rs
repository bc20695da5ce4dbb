//! Backend entry-point: loads settings, wires storage, and serves the REST API.

mod server;

use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

use backend::inbound::http::health::HealthState;
use backend::outbound::persistence::DbPool;
use backend::settings::AppSettings;
use server::{ServerConfig, create_server, drain};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::load_from_iter(std::env::args_os())
        .map_err(|e| std::io::Error::other(format!("failed to load settings: {e}")))?;
    let bind_addr = settings.bind_address().map_err(std::io::Error::other)?;

    let mut config = ServerConfig::new(bind_addr, settings.enrollment_policy());
    if let Some(pool_config) = settings.pool_config().map_err(std::io::Error::other)? {
        let pool = DbPool::new(pool_config)
            .await
            .map_err(|e| std::io::Error::other(format!("database pool: {e}")))?;
        config = config.with_db_pool(pool);
    }

    #[cfg(feature = "metrics")]
    let config = config.with_metrics(Some(server::metrics::request_metrics()?));

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state.clone(), config)?;
    let handle = server.handle();
    actix_web::rt::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => drain(health_state, handle).await,
            Err(e) => warn!(error = %e, "shutdown signal unavailable"),
        }
    });
    server.await
}
