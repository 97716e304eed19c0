//! Engine settings.
//!
//! Settings are stored externally as a JSON file whose path is given by
//! the `CAMP_CONFIG` environment variable.  Every field is optional; a
//! missing file yields [`EngineSettings::default`].

use std::path::Path;

use anyhow::{Context, Result};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::money;

pub const CONFIG_ENV: &str = "CAMP_CONFIG";
pub const BIND_ADDR_ENV: &str = "CAMP_BIND_ADDR";
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineSettings {
    /// Largest income difference still considered a match.
    pub discrepancy_tolerance: Decimal,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            discrepancy_tolerance: money::DEFAULT_TOLERANCE,
        }
    }
}

impl EngineSettings {
    fn validate(self) -> Result<Self, EngineError> {
        if self.discrepancy_tolerance.is_sign_negative() {
            return Err(EngineError::Config(
                "discrepancy_tolerance must not be negative".into(),
            ));
        }
        Ok(self)
    }
}

/// Load settings from a JSON file.  A path that does not exist yields
/// the defaults; a file that exists but does not parse is an error.
pub fn load_settings(path: &Path) -> Result<EngineSettings> {
    if !path.exists() {
        tracing::info!(path = %path.display(), "settings file not found, using defaults");
        return Ok(EngineSettings::default());
    }
    let data = std::fs::read_to_string(path)
        .with_context(|| format!("reading settings from {}", path.display()))?;
    let settings: EngineSettings = serde_json::from_str(&data)
        .with_context(|| format!("parsing settings in {}", path.display()))?;
    Ok(settings.validate()?)
}

/// Settings from the file named by `CAMP_CONFIG`, or defaults.
pub fn settings_from_env() -> Result<EngineSettings> {
    match std::env::var(CONFIG_ENV) {
        Ok(path) => load_settings(Path::new(&path)),
        Err(_) => Ok(EngineSettings::default()),
    }
}

pub fn bind_addr_from_env() -> String {
    std::env::var(BIND_ADDR_ENV).unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn settings_file(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = load_settings(&dir.path().join("camp_settings.json")).unwrap();
        assert_eq!(settings, EngineSettings::default());
        assert_eq!(settings.discrepancy_tolerance, dec!(0.01));
    }

    #[test]
    fn test_file_overrides_tolerance() {
        let file = settings_file(r#"{"discrepancy_tolerance": 5}"#);
        let settings = load_settings(file.path()).unwrap();
        assert_eq!(settings.discrepancy_tolerance, dec!(5));

        let file = settings_file("{}");
        assert_eq!(load_settings(file.path()).unwrap(), EngineSettings::default());
    }

    #[test]
    fn test_invalid_settings_are_rejected() {
        let file = settings_file(r#"{"discrepancy_tolerance": -0.5}"#);
        let err = load_settings(file.path()).unwrap_err();
        assert!(err.to_string().contains("discrepancy_tolerance"));

        let file = settings_file("not json");
        let err = load_settings(file.path()).unwrap_err();
        assert!(err.to_string().starts_with("parsing settings"));
    }
}
