//! `carcare doctor` — Diagnose configuration and connectivity.

use carcare_config::AppConfig;

pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    println!("🩺 5K Car Care Assistant — Diagnostics");
    println!("======================================\n");

    let mut issues = 0;

    let config_path = AppConfig::config_path();
    if config_path.exists() {
        println!("  ✅ Config file found");
    } else {
        println!("  ⚠️  No config file — run `carcare onboard` (defaults in use)");
        issues += 1;
    }

    let config = match AppConfig::load() {
        Ok(config) => {
            println!("  ✅ Config valid");
            config
        }
        Err(e) => {
            println!("  ❌ Config invalid: {e}");
            println!("\n  ⚠️  Cannot continue without a valid config.");
            return Ok(());
        }
    };

    if config.has_api_key() {
        println!("  ✅ API key configured");
    } else {
        println!("  ⚠️  No API key — answers will come from the built-in knowledge only");
        issues += 1;
    }

    if config.has_api_key() {
        let provider = carcare_providers::build_from_config(&config)?;
        match provider.health_check().await {
            Ok(true) => println!("  ✅ Model {} reachable", config.provider.model),
            Ok(false) => {
                println!("  ❌ Endpoint answered but model {} is not available", config.provider.model);
                issues += 1;
            }
            Err(e) => {
                println!("  ❌ Endpoint unreachable: {e}");
                issues += 1;
            }
        }
    }

    println!();
    if issues == 0 {
        println!("  🎉 All checks passed!");
    } else {
        println!("  ⚠️  {issues} issue(s) found. See above for details.");
    }

    Ok(())
}
