use std::path::Path;

use anyhow::Context as _;

use crate::config::model::{MemeConfig, RawMemeConfig};
use crate::foundation::error::{MemeError, MemeResult};

/// Default configuration file name, resolved against the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "memes_config.json";

/// Read and validate a JSON array of meme records from `path`.
///
/// A missing file fails with [`MemeError::NotFound`] before anything is read. Every record is
/// validated up front, so an unknown template or a malformed record stops the batch before any
/// rendering starts.
pub fn load_config(path: &Path) -> MemeResult<Vec<MemeConfig>> {
    if !path.exists() {
        return Err(MemeError::not_found(path));
    }
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("read configuration '{}'", path.display()))?;
    let memes = parse_config_str(&text)?;
    tracing::debug!(path = %path.display(), records = memes.len(), "loaded meme configuration");
    Ok(memes)
}

/// Parse and validate a JSON array of meme records.
pub fn parse_config_str(text: &str) -> MemeResult<Vec<MemeConfig>> {
    let records: Vec<serde_json::Value> = serde_json::from_str(text)
        .map_err(|e| MemeError::serde(format!("configuration must be a JSON array: {e}")))?;

    records
        .into_iter()
        .enumerate()
        .map(|(i, value)| -> MemeResult<MemeConfig> {
            let raw: RawMemeConfig = serde_json::from_value(value)
                .map_err(|e| MemeError::config(format!("record {i}: {e}")))?;
            MemeConfig::try_from(raw).map_err(|e| match e {
                // Selector errors carry their own message.
                MemeError::UnimplementedTemplate(_) => e,
                MemeError::Validation(msg) => MemeError::validation(format!("record {i}: {msg}")),
                MemeError::Config(msg) => MemeError::config(format!("record {i}: {msg}")),
                other => other,
            })
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/config/load.rs"]
mod tests;
