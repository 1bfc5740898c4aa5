//! Configuration file loading.
//!
//! The configuration types live in [`sb_core::config`]; this module reads
//! them from TOML files.

use anyhow::{Context, Result};
use std::path::Path;

pub use sb_core::config::{BridgeConfig, EngineConfig, EvaluationPolicy, ScriptConfig};

/// Load configuration from a TOML file
pub fn load_config(path: &Path) -> Result<BridgeConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    let config: BridgeConfig = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;

    validate_config(&config)?;

    Ok(config)
}

/// Load config from default locations or return default config
pub fn load_config_or_default(custom_path: Option<&Path>) -> Result<BridgeConfig> {
    if let Some(path) = custom_path {
        return load_config(path);
    }

    // Try default locations
    let default_paths = [
        "./scriptbridge.toml",
        "~/.config/scriptbridge/config.toml",
        "/etc/scriptbridge/config.toml",
    ];

    for path_str in default_paths {
        let path = shellexpand::tilde(path_str);
        let path = Path::new(path.as_ref());
        if path.exists() {
            return load_config(path);
        }
    }

    Ok(BridgeConfig::default())
}

/// Validate configuration
///
/// Only problems that make every run fail are errors; the rest are logged.
fn validate_config(config: &BridgeConfig) -> Result<()> {
    if config.engine.variable.is_empty() {
        anyhow::bail!("engine.variable cannot be empty");
    }

    for warning in config.validate() {
        tracing::warn!("Config: {warning}");
    }

    Ok(())
}
