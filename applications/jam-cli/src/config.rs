/// CLI configuration
use config::ConfigError;
use jam_playback::PlaybackConfig;
use jam_server_client::DEFAULT_API_URL;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CliConfig {
    #[serde(default = "default_api")]
    pub api: ApiSettings,

    #[serde(default)]
    pub playback: PlaybackConfig,

    #[serde(default = "default_logging")]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiSettings {
    #[serde(default = "default_api_url")]
    pub url: String,

    /// Bearer token of the signed-in user
    #[serde(default)]
    pub token: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingSettings {
    /// `EnvFilter` directive used when `RUST_LOG` is unset
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

impl CliConfig {
    /// Load configuration from file and environment.
    ///
    /// An explicit `path` must exist; otherwise `jam.toml` in the working
    /// directory is used when present.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        Self::load_with_env(path, None)
    }

    fn load_with_env(
        path: Option<&Path>,
        env: Option<config::Map<String, String>>,
    ) -> Result<Self, ConfigError> {
        let mut settings = config::Config::builder();

        match path {
            Some(path) => {
                settings = settings.add_source(config::File::from(path).required(true));
            }
            None => {
                let default_path = PathBuf::from("jam.toml");
                if default_path.exists() {
                    settings = settings.add_source(config::File::from(default_path));
                }
            }
        }

        // Override with environment variables (prefixed with JAM_)
        settings = settings.add_source(
            config::Environment::with_prefix("JAM")
                .separator("_")
                .try_parsing(true)
                .source(env),
        );

        let config: Self = settings.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api.url.trim().is_empty() {
            return Err(ConfigError::Message(
                "API URL is required (set JAM_API_URL)".to_string(),
            ));
        }

        if !(0.0..=1.0).contains(&self.playback.volume) {
            return Err(ConfigError::Message(format!(
                "playback volume must be within 0.0-1.0, got {}",
                self.playback.volume
            )));
        }

        Ok(())
    }
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            api: default_api(),
            playback: PlaybackConfig::default(),
            logging: default_logging(),
        }
    }
}

// Default values
fn default_api() -> ApiSettings {
    ApiSettings {
        url: default_api_url(),
        token: None,
    }
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_logging() -> LoggingSettings {
    LoggingSettings {
        filter: default_log_filter(),
    }
}

fn default_log_filter() -> String {
    "jam_cli=info,jam_playback=info,jam_server_client=info".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn env(pairs: &[(&str, &str)]) -> Option<config::Map<String, String>> {
        let mut map = config::Map::new();
        for (key, value) in pairs {
            map.insert((*key).to_string(), (*value).to_string());
        }
        Some(map)
    }

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn defaults_without_sources() {
        let config = CliConfig::load_with_env(None, env(&[])).unwrap();

        assert_eq!(config.api.url, DEFAULT_API_URL);
        assert!(config.api.token.is_none());
        assert_eq!(config.playback.volume, 1.0);
        assert!(!config.playback.muted);
        assert!(config.logging.filter.contains("jam_playback=info"));
    }

    #[test]
    fn file_values_are_read() {
        let file = write_config(
            r#"
            [api]
            url = "https://jam.example.com/api/v1"
            token = "from-file"

            [playback]
            volume = 0.3
            "#,
        );

        let config = CliConfig::load_with_env(Some(file.path()), env(&[])).unwrap();

        assert_eq!(config.api.url, "https://jam.example.com/api/v1");
        assert_eq!(config.api.token.as_deref(), Some("from-file"));
        assert_eq!(config.playback.volume, 0.3);
    }

    #[test]
    fn environment_overrides_file() {
        let file = write_config(
            r#"
            [api]
            token = "from-file"
            "#,
        );

        let config = CliConfig::load_with_env(
            Some(file.path()),
            env(&[("JAM_API_TOKEN", "from-env"), ("JAM_PLAYBACK_MUTED", "true")]),
        )
        .unwrap();

        assert_eq!(config.api.token.as_deref(), Some("from-env"));
        assert!(config.playback.muted);
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let result =
            CliConfig::load_with_env(Some(Path::new("/nonexistent/jam.toml")), env(&[]));
        assert!(result.is_err());
    }

    #[test]
    fn out_of_range_volume_is_rejected() {
        let result = CliConfig::load_with_env(None, env(&[("JAM_PLAYBACK_VOLUME", "1.5")]));
        assert!(result.is_err());
    }
}
