//! Remote provider implementations for the car-care assistant.
//!
//! All providers implement the `carcare_core::Provider` trait.
//! [`build_from_config`] wires the configured one.

pub mod gemini;

use carcare_config::AppConfig;
use carcare_core::Provider;
use carcare_core::error::ProviderError;
use std::sync::Arc;

pub use gemini::GeminiProvider;

/// Build the remote provider described by the configuration.
///
/// A missing API key is not an error here: the provider reports
/// `NotConfigured` on use, which the resolver answers from the fallback.
pub fn build_from_config(config: &AppConfig) -> Result<Arc<dyn Provider>, ProviderError> {
    let provider = GeminiProvider::with_timeout(
        &config.provider.api_url,
        &config.provider.model,
        config.api_key.clone().unwrap_or_default(),
        config.resolver.request_timeout(),
    )?;
    Ok(Arc::new(provider))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_from_default_config() {
        let config = AppConfig::default();
        let provider = build_from_config(&config).unwrap();
        assert_eq!(provider.name(), "gemini");
    }
}
