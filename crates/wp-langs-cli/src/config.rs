use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use wp_langs_api::HttpSettings;

/// Per-machine settings for the HTTP clients.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct UserConfig {
    /// Alternative translation API host, e.g. a local mirror.
    #[serde(default)]
    pub api_base_url: Option<String>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    60
}

impl Default for UserConfig {
    fn default() -> Self {
        Self {
            api_base_url: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl UserConfig {
    pub fn http_settings(&self) -> HttpSettings {
        HttpSettings {
            api_base_url: self.api_base_url.clone(),
            timeout: Duration::from_secs(self.timeout_secs),
            ..HttpSettings::default()
        }
    }
}

/// Config file path: `~/.config/wp-langs/config.toml`
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("wp-langs").join("config.toml"))
}

/// Load config from the default location, falling back to defaults if
/// missing.
pub fn load_config() -> UserConfig {
    match config_path() {
        Some(path) => load_config_from(&path),
        None => UserConfig::default(),
    }
}

/// Load config from `path`. A missing file gives defaults; an unparsable one
/// gives defaults and a warning on stderr.
pub fn load_config_from(path: &Path) -> UserConfig {
    if let Ok(contents) = std::fs::read_to_string(path) {
        if let Ok(config) = toml::from_str::<UserConfig>(&contents) {
            return config;
        }
        eprintln!(
            "warning: failed to parse config at {}, using defaults",
            path.display()
        );
    }

    UserConfig::default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_uses_default_timeout() {
        let config: UserConfig = toml::from_str("").unwrap();
        assert_eq!(config, UserConfig::default());
        assert_eq!(config.timeout_secs, 60);
    }

    #[test]
    fn parses_mirror_and_timeout() {
        let config: UserConfig = toml::from_str(
            r#"
api_base_url = "http://mirror.local"
timeout_secs = 5
"#,
        )
        .unwrap();
        assert_eq!(config.api_base_url.as_deref(), Some("http://mirror.local"));

        let settings = config.http_settings();
        assert_eq!(settings.api_base(), "http://mirror.local");
        assert_eq!(settings.timeout, Duration::from_secs(5));
    }

    #[test]
    fn missing_file_uses_defaults() {
        let tmp = tempfile::tempdir().unwrap();
        let config = load_config_from(&tmp.path().join("config.toml"));
        assert_eq!(config, UserConfig::default());
    }

    #[test]
    fn unparsable_file_uses_defaults() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("config.toml");
        std::fs::write(&path, "timeout_secs = \"soon\"").unwrap();
        assert_eq!(load_config_from(&path), UserConfig::default());
    }
}
