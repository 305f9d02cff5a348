use anyhow::{bail, Context};
use otp_core::services::OtpServiceConfig;
use otp_shared::config::{AppConfig, CacheBackend, Environment, OtpConfig};

/// Load the full application configuration
///
/// Reads `.env` first, then the environment-specific file (`.env.production`
/// and so on). Variables already set in the process environment win.
pub fn load() -> anyhow::Result<AppConfig> {
    dotenvy::dotenv().ok();
    let environment = Environment::from_env();
    dotenvy::from_filename(environment.env_file()).ok();

    let config = AppConfig::from_env();
    check(&config)?;
    Ok(config)
}

/// Reject configurations the server cannot run with
pub fn check(config: &AppConfig) -> anyhow::Result<()> {
    otp_service_config(&config.otp)
        .validate()
        .context("Invalid passcode configuration")?;

    if config.environment.is_production() && config.cache.backend == CacheBackend::Memory {
        bail!("The in-memory store is single-process only; use Redis in production");
    }
    Ok(())
}

pub fn otp_service_config(otp: &OtpConfig) -> OtpServiceConfig {
    OtpServiceConfig::new(otp.code_length, otp.ttl_seconds, otp.key_prefix.clone())
}
