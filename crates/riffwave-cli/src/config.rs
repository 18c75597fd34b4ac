//! Parser configuration from `--config` files and flags.

use anyhow::{Context, Result};
use riffwave::{DataBounds, ParseOptions};
use std::fs;
use std::path::Path;
use tracing::debug;

/// Builds parse options from an optional JSON config file, then applies flag overrides.
///
/// # Arguments
/// * `config_path` - Optional path to a JSON file deserializing into [`ParseOptions`]
/// * `legacy_bounds` - Force [`DataBounds::Legacy`] regardless of the config file
pub fn load_parse_options(config_path: Option<&str>, legacy_bounds: bool) -> Result<ParseOptions> {
    let mut options = match config_path {
        Some(path) => {
            let text = fs::read_to_string(Path::new(path))
                .with_context(|| format!("Failed to read config file: {}", path))?;
            let options = ParseOptions::from_json(&text)
                .with_context(|| format!("Failed to parse config file: {}", path))?;
            debug!(
                path,
                data_bounds = ?options.data_bounds,
                expected_mime = %options.expected_mime,
                "loaded config file"
            );
            options
        }
        None => ParseOptions::default(),
    };

    if legacy_bounds {
        debug!("--legacy-bounds overrides data_bounds");
        options.data_bounds = DataBounds::Legacy;
    }

    Ok(options)
}
