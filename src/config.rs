use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::llm::providers::{find_provider_meta, ProviderConfig};
use crate::core::llm::DEFAULT_MAX_NEW_TOKENS;

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub model: ModelConfig,
    pub styles: StylesConfig,
    pub export: ExportConfig,
    pub server: ServerConfig,
    pub logging: LoggingConfig,
}

/// Model provider configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    /// `huggingface`, `ollama` or `disabled`.
    pub provider: String,
    /// Model identifier. Defaults to the provider's default model.
    pub model_id: Option<String>,
    /// Override the provider endpoint.
    pub api_base: Option<String>,
    /// Access token, if the provider takes one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_token: Option<String>,
    pub max_new_tokens: u32,
    pub request_timeout_secs: u64,
}

/// Style data configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StylesConfig {
    /// JSON or YAML style file. The bundled styles are used when unset.
    pub path: Option<PathBuf>,
}

/// Export configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    pub dir: PathBuf,
}

/// REST server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive used when `RUST_LOG` is unset.
    pub level: String,
    /// Also write JSON logs to a daily-rolling file.
    pub file_logging: bool,
    /// Override the log directory.
    pub log_dir: Option<PathBuf>,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            provider: "huggingface".to_string(),
            model_id: None,
            api_base: None,
            api_token: None,
            max_new_tokens: DEFAULT_MAX_NEW_TOKENS,
            request_timeout_secs: 120,
        }
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("exports"),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file_logging: false,
            log_dir: None,
        }
    }
}

/// Errors from explicit configuration loading.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config '{path}': {message}")]
    Parse { path: String, message: String },
}

impl ModelConfig {
    /// Translate into a provider factory configuration.
    pub fn provider_config(&self) -> ProviderConfig {
        let provider = self.provider.trim().to_lowercase();
        let default_model = |id: &str| {
            find_provider_meta(id)
                .map(|m| m.default_model.to_string())
                .unwrap_or_default()
        };
        let default_base = |id: &str| {
            find_provider_meta(id)
                .map(|m| m.default_base.to_string())
                .unwrap_or_default()
        };

        match provider.as_str() {
            "huggingface" | "hf" => ProviderConfig::HuggingFace {
                model: self
                    .model_id
                    .clone()
                    .unwrap_or_else(|| default_model("huggingface")),
                api_base: self
                    .api_base
                    .clone()
                    .unwrap_or_else(|| default_base("huggingface")),
                token: self.api_token.clone(),
                timeout_secs: self.request_timeout_secs,
            },
            "ollama" => ProviderConfig::Ollama {
                host: self
                    .api_base
                    .clone()
                    .unwrap_or_else(|| default_base("ollama")),
                model: self
                    .model_id
                    .clone()
                    .unwrap_or_else(|| default_model("ollama")),
                timeout_secs: self.request_timeout_secs,
            },
            "disabled" | "none" | "" => ProviderConfig::Disabled,
            other => {
                log::warn!("Unknown model provider '{other}', model generation disabled");
                ProviderConfig::Disabled
            }
        }
    }
}

impl AppConfig {
    /// Load configuration from `~/.config/gallows/config.toml`, then apply
    /// environment overrides. Returns defaults if the file is missing or
    /// unparseable.
    pub fn load() -> Self {
        Self::load_or_default(&Self::config_path())
    }

    /// Like [`AppConfig::load`] but for an explicit path.
    pub fn load_or_default(path: &Path) -> Self {
        let mut config = match Self::load_from(path) {
            Ok(config) => {
                log::info!("Loaded config from {}", path.display());
                config
            }
            Err(ConfigError::Io { .. }) => {
                log::debug!("No config file at {}, using defaults", path.display());
                Self::default()
            }
            Err(e) => {
                log::warn!("{e}, using defaults");
                Self::default()
            }
        };
        config.apply_env_overrides();
        config
    }

    /// Read and parse a config file without falling back.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        toml::from_str(&contents).map_err(|e| ConfigError::Parse {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }

    /// Apply `HF_TOKEN`, `HF_MODEL`, `GALLOWS_PROVIDER` and `PORT`.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(token) = non_empty("HF_TOKEN") {
            self.model.api_token = Some(token);
        }
        if let Some(model) = non_empty("HF_MODEL") {
            self.model.model_id = Some(model);
        }
        if let Some(provider) = non_empty("GALLOWS_PROVIDER") {
            self.model.provider = provider;
        }
        if let Some(port) = non_empty("PORT") {
            match port.trim().parse() {
                Ok(port) => self.server.port = port,
                Err(_) => log::warn!("Ignoring invalid PORT value '{port}'"),
            }
        }
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .map(|d| d.join("gallows").join("config.toml"))
            .unwrap_or_else(|| PathBuf::from("config.toml"))
    }
}
