use anyhow::{Context, Result};
use std::path::Path;
use std::time::Duration;

use vaxassist::config::Config;
use vaxassist::models::CountryStats;
use vaxassist::storage::SqliteStatsGateway;

pub fn load(config: &Config, file: &Path) -> Result<()> {
    let content = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read statistics file: {}", file.display()))?;

    let rows: Vec<CountryStats> = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse statistics file: {}", file.display()))?;

    let gateway = SqliteStatsGateway::new(
        &config.database.sqlite_path,
        Duration::from_millis(config.database.busy_timeout_ms),
    )
    .context("Failed to open statistics database")?;

    let saved = gateway
        .save_records(&rows)
        .context("Failed to save statistics")?;

    println!(
        "Loaded {saved} rows into {}",
        config.database.sqlite_path.display()
    );
    Ok(())
}
