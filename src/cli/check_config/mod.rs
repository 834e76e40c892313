//! Check-config command - prints the configuration `serve` would use

use crate::config::AppConfig;

pub fn run() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load()?;
    println!("{}", render(&config)?);

    Ok(())
}

fn render(config: &AppConfig) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(config)?)
}
