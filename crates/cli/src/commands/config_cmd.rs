//! `carcare config` — Configuration management commands.

use carcare_config::AppConfig;

pub async fn validate() -> Result<(), Box<dyn std::error::Error>> {
    println!("🔍 Validating configuration...");

    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(e) => {
            println!("   ❌ Config error: {e}");
            return Err(e.into());
        }
    };
    println!("   ✅ Config parsed successfully");

    let warnings = warnings(&config);
    if warnings.is_empty() {
        println!("   ✅ All checks passed");
    } else {
        println!();
        for w in &warnings {
            println!("   ⚠️  {w}");
        }
    }

    println!();
    println!("   Endpoint:  {}", config.provider.api_url);
    println!("   Model:     {}", config.provider.model);
    println!(
        "   Retries:   {} attempt(s), {}s apart, {}s timeout",
        config.resolver.max_retries,
        config.resolver.retry_delay_secs,
        config.resolver.request_timeout_secs
    );
    println!("   Max tokens: {}", config.generation.max_output_tokens);

    Ok(())
}

/// Non-fatal issues worth pointing out.
fn warnings(config: &AppConfig) -> Vec<&'static str> {
    let mut warnings = Vec::new();

    if !config.has_api_key() {
        warnings.push("No API key set (set CARCARE_API_KEY or GOOGLE_API_KEY); only offline answers are available");
    }

    if !config.provider.api_url.starts_with("https://") {
        warnings.push("Endpoint is not HTTPS; the API key travels in the query string");
    }

    let worst_case = config.resolver.max_retries as u64
        * (config.resolver.request_timeout_secs + config.resolver.retry_delay_secs);
    if worst_case > 300 {
        warnings.push("Worst-case answer latency exceeds 5 minutes");
    }

    warnings
}

pub async fn show() -> Result<(), Box<dyn std::error::Error>> {
    let mut config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;
    if config.api_key.is_some() {
        config.api_key = Some("[REDACTED]".into());
    }
    let toml_str = toml::to_string_pretty(&config)?;
    println!("{toml_str}");
    Ok(())
}

pub async fn path() -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", AppConfig::config_path().display());
    Ok(())
}
