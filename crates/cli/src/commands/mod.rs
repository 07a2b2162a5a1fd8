//! Subcommand implementations.

pub mod ask;
pub mod chat;
pub mod config_cmd;
pub mod doctor;
pub mod onboard;

use carcare_agent::RemoteAnswerClient;
use carcare_config::AppConfig;

/// Load config and wire the resolution pipeline.
pub fn build_client() -> carcare_core::Result<(AppConfig, RemoteAnswerClient)> {
    let config = AppConfig::load()?;

    if !config.has_api_key() {
        tracing::warn!(
            "No API key configured (set CARCARE_API_KEY or GOOGLE_API_KEY); answers will come from the built-in knowledge"
        );
    }

    let provider = carcare_providers::build_from_config(&config)?;
    let client = RemoteAnswerClient::from_config(&config, provider);
    Ok((config, client))
}
