use std::sync::Arc;
use std::time::Duration;

use actix_web::{web, HttpServer};
use anyhow::Context;
use tracing::info;
use tracing_subscriber::EnvFilter;

use otp_api::app::create_app;
use otp_api::config::{self, otp_service_config};
use otp_api::routes::otp::AppState;
use otp_core::services::{OtpService, OtpStore};
use otp_infra::cache::{MemoryOtpStore, RedisClient};
use otp_shared::config::{AppConfig, CacheBackend, LogFormat, LoggingConfig};

/// How often the in-memory backend drops expired codes
const MEMORY_SWEEP_INTERVAL: Duration = Duration::from_secs(60);

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let config = config::load()?;
    init_tracing(&config.logging);

    info!(
        environment = %config.environment,
        backend = ?config.cache.backend,
        "Starting OtpGate API server"
    );

    match config.cache.backend {
        CacheBackend::Redis => {
            let client = RedisClient::new(&config.cache)
                .await
                .context("Redis is not reachable")?;
            run_server(Arc::new(client), &config).await
        }
        CacheBackend::Memory => {
            let store = Arc::new(MemoryOtpStore::new());
            let sweeper = store.spawn_sweeper(MEMORY_SWEEP_INTERVAL);
            let result = run_server(store, &config).await;
            sweeper.abort();
            result
        }
    }
}

async fn run_server<C>(store: Arc<C>, config: &AppConfig) -> anyhow::Result<()>
where
    C: OtpStore + 'static,
{
    let otp_service = OtpService::new(store, otp_service_config(&config.otp))?;
    let app_state = web::Data::new(AppState::new(Arc::new(otp_service)));

    let bind_address = config.server.bind_address();
    info!(
        address = %bind_address,
        url = %config.server.public_base_url(),
        code_length = config.otp.code_length,
        ttl_seconds = config.otp.ttl_seconds,
        "Listening"
    );

    let mut server = HttpServer::new(move || create_app(app_state.clone()))
        .client_request_timeout(Duration::from_secs(config.server.client_request_timeout));
    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }

    server
        .bind(&bind_address)
        .with_context(|| format!("Failed to bind {}", bind_address))?
        .run()
        .await?;

    info!("Server stopped");
    Ok(())
}

/// Install the global tracing subscriber
///
/// `RUST_LOG` takes precedence over the configured level.
fn init_tracing(logging: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("{},actix_web=info", logging.level)));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    match logging.format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Pretty => builder.pretty().init(),
        LogFormat::Compact => builder.compact().init(),
    }
}
