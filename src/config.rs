use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

/// Debounce window for change notifications.
const DEFAULT_DEBOUNCE_MS: u64 = 75;

/// Window title when the root document carries no `<title>` tag.
const DEFAULT_FALLBACK_TITLE: &str = "HTML Renderer";

/// Configuration loaded from `htmlwatch.toml` next to the root document.
#[derive(Debug, Deserialize, Default)]
pub struct PreviewConfig {
    /// Debounce window for file-change notifications, in milliseconds.
    pub debounce_ms: Option<u64>,
    /// Title to display when the root document has no `<title>` tag.
    pub fallback_title: Option<String>,
}

impl PreviewConfig {
    /// Load configuration from `htmlwatch.toml` in the given directory.
    ///
    /// Returns a default (empty) configuration if the file does not exist or
    /// cannot be parsed — a broken config file must never stop the preview.
    pub fn load(dir: &Path) -> Self {
        let config_path = dir.join("htmlwatch.toml");

        if !config_path.exists() {
            return Self::default();
        }

        match std::fs::read_to_string(&config_path) {
            Ok(contents) => match toml::from_str::<Self>(&contents) {
                Ok(config) => config,
                Err(err) => {
                    eprintln!("warning: failed to parse htmlwatch.toml: {err}. Using defaults.");
                    Self::default()
                }
            },
            Err(err) => {
                eprintln!("warning: failed to read htmlwatch.toml: {err}. Using defaults.");
                Self::default()
            }
        }
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms.unwrap_or(DEFAULT_DEBOUNCE_MS))
    }

    pub fn fallback_title(&self) -> &str {
        self.fallback_title.as_deref().unwrap_or(DEFAULT_FALLBACK_TITLE)
    }
}
