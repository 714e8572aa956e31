// crates/adcq-cli/src/io/settings_file.rs

use anyhow::{Context, Result};
use adcq_core::config::config::Settings;
use adcq_core::config::format as settings_format;

/// Load a .adq settings file.
pub fn load_adq(path: &str) -> Result<Settings> {
    let bytes = std::fs::read(path).with_context(|| format!("read settings {path}"))?;
    let settings =
        settings_format::decode(&bytes).with_context(|| format!("decode settings {path}"))?;
    Ok(settings)
}

/// Save settings as a .adq file.
pub fn save_adq(path: &str, settings: &Settings) -> Result<()> {
    let bytes = settings_format::encode(settings);
    std::fs::write(path, bytes).with_context(|| format!("write settings {path}"))?;
    Ok(())
}
