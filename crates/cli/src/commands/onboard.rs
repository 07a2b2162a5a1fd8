//! `carcare onboard` — First-time setup.

use carcare_config::AppConfig;

pub async fn run() -> carcare_core::Result<()> {
    let config_dir = AppConfig::config_dir();
    let config_path = AppConfig::config_path();

    println!("🚗 5K Car Care Assistant — First-Time Setup");
    println!("===========================================\n");

    if !config_dir.exists() {
        std::fs::create_dir_all(&config_dir)?;
        println!("✅ Created config directory: {}", config_dir.display());
    } else {
        println!("  Config directory exists: {}", config_dir.display());
    }

    if config_path.exists() {
        println!("\n⚠️  Config already exists at: {}", config_path.display());
        println!("   Edit it manually or delete and re-run onboard.\n");
        return Ok(());
    }

    let default_toml = AppConfig::default_toml()?;
    std::fs::write(&config_path, &default_toml)?;
    println!("✅ Created config.toml at: {}", config_path.display());
    println!("\n📝 Next steps:");
    println!("   1. Add `api_key = \"...\"` to {}", config_path.display());
    println!("      (or export CARCARE_API_KEY / GOOGLE_API_KEY)");
    println!("   2. Run: carcare chat\n");

    Ok(())
}
