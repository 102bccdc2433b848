//! Layered configuration.
//!
//! Sources, lowest to highest precedence: built-in defaults, an optional
//! TOML file, `PULSEPING_*` environment variables. Command-line flags are
//! applied on top by the binary.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Result;
use config::{Config, Environment, File};
use serde::Deserialize;

use crate::source::WindowHours;

/// Config file read when `--config` is not given (optional).
pub const DEFAULT_CONFIG_FILE: &str = "pulseping.toml";

/// Dashboard settings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Settings {
    /// Base url of the Snapshot API.
    pub api_base_url: String,
    /// Window requested on startup, in hours.
    pub default_hours: u32,
    /// Per-request timeout in seconds.
    pub request_timeout_secs: u64,
    /// Automatic refresh interval in seconds; 0 disables it.
    pub refresh_secs: u64,
    /// Directory that CSV exports are written to.
    pub export_dir: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:7071".to_string(),
            default_hours: 24,
            request_timeout_secs: 10,
            refresh_secs: 0,
            export_dir: PathBuf::from("."),
        }
    }
}

impl Settings {
    /// Load settings from `path` (or [`DEFAULT_CONFIG_FILE`]) and the
    /// environment.
    ///
    /// An explicitly given file must exist; the default file is optional.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let defaults = Settings::default();
        let file = match path {
            Some(p) => File::from(p).required(true),
            None => File::with_name(DEFAULT_CONFIG_FILE).required(false),
        };

        let settings = Config::builder()
            .set_default("api_base_url", defaults.api_base_url)?
            .set_default("default_hours", defaults.default_hours)?
            .set_default("request_timeout_secs", defaults.request_timeout_secs)?
            .set_default("refresh_secs", defaults.refresh_secs)?
            .set_default("export_dir", defaults.export_dir.to_string_lossy().into_owned())?
            .add_source(file)
            .add_source(Environment::with_prefix("PULSEPING").try_parsing(true))
            .build()?
            .try_deserialize()?;

        Ok(settings)
    }

    /// The startup window, clamped into the selectable range.
    pub fn window(&self) -> WindowHours {
        WindowHours::new(self.default_hours)
    }

    /// The request timeout.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }

    /// The auto-refresh interval, if enabled.
    pub fn refresh_interval(&self) -> Option<Duration> {
        (self.refresh_secs > 0).then(|| Duration::from_secs(self.refresh_secs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.api_base_url, "http://localhost:7071");
        assert_eq!(settings.window().get(), 24);
        assert_eq!(settings.request_timeout(), Duration::from_secs(10));
        assert!(settings.refresh_interval().is_none());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
api_base_url = "https://status.example.com"
default_hours = 6
refresh_secs = 30
"#
        )
        .unwrap();

        let settings = Settings::load(Some(file.path())).unwrap();
        assert_eq!(settings.api_base_url, "https://status.example.com");
        assert_eq!(settings.default_hours, 6);
        assert_eq!(settings.refresh_interval(), Some(Duration::from_secs(30)));
        // Unset keys keep their defaults
        assert_eq!(settings.request_timeout_secs, 10);
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        assert!(Settings::load(Some(Path::new("/nonexistent/pulseping.toml"))).is_err());
    }

    #[test]
    fn test_window_is_clamped() {
        let settings = Settings {
            default_hours: 500,
            ..Settings::default()
        };
        assert_eq!(settings.window().get(), WindowHours::MAX);
    }
}
