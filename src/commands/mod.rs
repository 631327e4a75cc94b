pub mod ask;
pub mod explain;
pub mod load;

// Re-export command functions for convenience
pub use ask::{ask, chat};
pub use explain::{explain, intents};
pub use load::load;

use anyhow::{Context, Result};

use vaxassist::config::Config;
use vaxassist::dialogue::{Assistant, AssistantBuilder};
use vaxassist::storage::open_gateway;
use vaxassist::translate::create_translator;

/// Build the assistant described by `config`
pub fn build_assistant(config: &Config) -> Result<Assistant> {
    let gateway = open_gateway(&config.database).with_context(|| {
        format!(
            "Failed to open statistics database: {}",
            config.database.sqlite_path.display()
        )
    })?;

    let translator =
        create_translator(&config.translation).context("Failed to create translation client")?;

    let assistant = AssistantBuilder::from_config(config)
        .gateway(gateway)
        .translator(translator)
        .build()
        .context("Failed to build assistant")?;

    Ok(assistant)
}

/// Reply language from the flag, else the process locale
pub fn reply_language(lang: Option<&str>) -> String {
    lang.map(str::to_string)
        .unwrap_or_else(|| vaxassist::i18n::current_locale().to_string())
}
