//! TOML config loading.

use crate::schema::PopupConfig;
use crate::validation;
use tabdeck_common::ConfigError;
use tracing::warn;

/// The `config.toml` shipped inside the extension bundle.
const BUNDLED_CONFIG: &str = include_str!("../config.toml");

/// Parse config from TOML text.
///
/// Missing fields take serde defaults. If validation fails, a warning is
/// logged and the default config is returned.
pub fn load_from_str(content: &str) -> Result<PopupConfig, ConfigError> {
    let config: PopupConfig = toml::from_str(content)
        .map_err(|e| ConfigError::ParseError(format!("failed to parse TOML: {e}")))?;

    if let Err(e) = validation::validate(&config) {
        warn!("config validation warning: {e}");
        warn!("falling back to default config");
        return Ok(PopupConfig::default());
    }

    Ok(config)
}

/// Load the config compiled into the extension.
pub fn load_bundled() -> Result<PopupConfig, ConfigError> {
    load_from_str(BUNDLED_CONFIG)
}
