//! Config show command: the effective configuration after merging.

use crate::domain::{AppError, ProvisionConfig};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Toml,
    Json,
}

/// Serialize the effective configuration. The encryption key is not part of
/// the configuration and never appears here.
pub fn execute(config: &ProvisionConfig, format: ConfigFormat) -> Result<String, AppError> {
    match format {
        ConfigFormat::Toml => toml::to_string_pretty(config)
            .map_err(|e| AppError::config_error(format!("failed to serialize config: {e}"))),
        ConfigFormat::Json => serde_json::to_string_pretty(config)
            .map_err(|e| AppError::config_error(format!("failed to serialize config: {e}"))),
    }
}
