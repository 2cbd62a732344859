//! Configuration validation.
//!
//! Collects every problem into one error so a broken file can be fixed in one pass.

use crate::schema::{PopupConfig, LOG_LEVELS, POSITION_PLACEHOLDER};
use tabdeck_common::ConfigError;

/// Run all validations on a config, collecting all errors.
pub fn validate(config: &PopupConfig) -> Result<(), ConfigError> {
    let mut errors: Vec<String> = Vec::new();

    validate_non_empty(&mut errors, "view.container_id", &config.view.container_id);
    validate_non_empty(&mut errors, "view.close_label", &config.view.close_label);
    if !config.view.header_label.contains(POSITION_PLACEHOLDER) {
        errors.push(format!(
            "view.header_label = {:?} must contain {POSITION_PLACEHOLDER}",
            config.view.header_label
        ));
    }
    validate_range(&mut errors, "view.icon_size_px", config.view.icon_size_px, 8, 64);

    let level = config.logging.level.to_ascii_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(format!(
            "logging.level = {:?} must be one of {}",
            config.logging.level,
            LOG_LEVELS.join(", ")
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::ValidationError(errors.join("; ")))
    }
}

fn validate_range(errors: &mut Vec<String>, name: &str, value: u32, min: u32, max: u32) {
    if value < min || value > max {
        errors.push(format!(
            "{name} = {value} is out of range [{min}, {max}]"
        ));
    }
}

fn validate_non_empty(errors: &mut Vec<String>, name: &str, value: &str) {
    if value.trim().is_empty() {
        errors.push(format!("{name} must not be empty"));
    }
}
