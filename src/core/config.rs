// src/core/config.rs
use crate::core::constants::{
    DEFAULT_BACKEND_URL, DEFAULT_LANGUAGES, DEFAULT_STORAGE_PATH, DEFAULT_TIMEOUT_SECS,
};
use crate::core::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

// TOML Configuration Structure
#[derive(Debug, Serialize, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    general: GeneralConfigToml,
    #[serde(default)]
    backend: BackendConfigToml,
    #[serde(default)]
    language: LanguageConfigToml,
    #[serde(default)]
    storage: StorageConfigToml,
}

#[derive(Debug, Serialize, Deserialize)]
struct GeneralConfigToml {
    #[serde(default = "default_log_level")]
    log_level: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct BackendConfigToml {
    #[serde(default = "default_base_url")]
    base_url: String,
    #[serde(default = "default_timeout")]
    timeout_secs: u64,
}

#[derive(Debug, Serialize, Deserialize)]
struct LanguageConfigToml {
    #[serde(default = "default_language")]
    default: String,
    #[serde(default = "default_available")]
    available: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
struct StorageConfigToml {
    #[serde(default = "default_storage_path")]
    path: String,
}

// Default Functions
fn default_log_level() -> String {
    "info".into()
}
fn default_base_url() -> String {
    DEFAULT_BACKEND_URL.into()
}
fn default_timeout() -> u64 {
    DEFAULT_TIMEOUT_SECS
}
fn default_language() -> String {
    DEFAULT_LANGUAGE.into()
}
fn default_available() -> Vec<String> {
    DEFAULT_LANGUAGES.iter().map(|l| l.to_string()).collect()
}
fn default_storage_path() -> String {
    DEFAULT_STORAGE_PATH.into()
}

impl Default for GeneralConfigToml {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

impl Default for BackendConfigToml {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
        }
    }
}

impl Default for LanguageConfigToml {
    fn default() -> Self {
        Self {
            default: default_language(),
            available: default_available(),
        }
    }
}

impl Default for StorageConfigToml {
    fn default() -> Self {
        Self {
            path: default_storage_path(),
        }
    }
}

// Main Configuration Structures
#[derive(Debug, Clone)]
pub struct Config {
    config_path: Option<String>,
    pub log_level: String,
    pub backend: BackendConfig,
    pub language: LanguageConfig,
    pub storage_path: PathBuf,
}

#[derive(Debug, Clone)]
pub struct BackendConfig {
    pub base_url: String,
    pub timeout: Duration,
}

#[derive(Debug, Clone)]
pub struct LanguageConfig {
    pub default: String,
    pub available: Vec<String>,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BACKEND_URL.into(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl Default for LanguageConfig {
    fn default() -> Self {
        Self {
            default: DEFAULT_LANGUAGE.into(),
            available: default_available(),
        }
    }
}

impl LanguageConfig {
    pub fn is_available(&self, code: &str) -> bool {
        self.available.iter().any(|l| l.eq_ignore_ascii_case(code))
    }
}

impl Config {
    pub async fn load() -> Result<Self> {
        Self::load_with_messages(true).await
    }

    pub async fn load_with_messages(show_messages: bool) -> Result<Self> {
        // Try existing configs
        for path in crate::setup::setup_toml::get_config_paths() {
            if path.exists() {
                match Self::from_file(&path).await {
                    Ok(config) => {
                        if show_messages {
                            config.log_summary();
                        }
                        return Ok(config);
                    }
                    Err(e) => log::warn!("Skipping config {}: {}", path.display(), e),
                }
            }
        }

        // Create new config
        let path = crate::setup::setup_toml::ensure_config_exists().await?;
        let config = Self::from_file(&path).await?;

        if show_messages {
            log::info!("New config: {}", path.display());
            config.log_summary();
        }

        Ok(config)
    }

    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = tokio::fs::read_to_string(&path).await?;
        let mut config = Self::from_toml_str(&content)?;
        config.config_path = Some(path.as_ref().to_string_lossy().into_owned());

        // Auto-save corrected values
        if config.language.default != Self::raw_default_language(&content) {
            let _ = config.save().await;
        }

        Ok(config)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let file: ConfigFile =
            toml::from_str(content).map_err(|e| AppError::Validation(format!("TOML: {}", e)))?;

        let timeout = Self::clamp(file.backend.timeout_secs, 1, 300, DEFAULT_TIMEOUT_SECS);

        let mut available: Vec<String> = file
            .language
            .available
            .iter()
            .map(|l| l.trim().to_lowercase())
            .filter(|l| !l.is_empty())
            .collect();
        if available.is_empty() {
            available = default_available();
        }

        let mut default = file.language.default.trim().to_lowercase();
        if !available.contains(&default) {
            log::warn!(
                "Default language '{}' not in available set, using '{}'",
                default,
                DEFAULT_LANGUAGE
            );
            default = DEFAULT_LANGUAGE.into();
            if !available.contains(&default) {
                available.insert(0, default.clone());
            }
        }

        Ok(Self {
            config_path: None,
            log_level: file.general.log_level,
            backend: BackendConfig {
                base_url: file.backend.base_url.trim_end_matches('/').to_string(),
                timeout: Duration::from_secs(timeout),
            },
            language: LanguageConfig { default, available },
            storage_path: PathBuf::from(file.storage.path),
        })
    }

    pub async fn save(&self) -> Result<()> {
        let Some(path) = &self.config_path else {
            return Ok(());
        };

        let file = ConfigFile {
            general: GeneralConfigToml {
                log_level: self.log_level.clone(),
            },
            backend: BackendConfigToml {
                base_url: self.backend.base_url.clone(),
                timeout_secs: self.backend.timeout.as_secs(),
            },
            language: LanguageConfigToml {
                default: self.language.default.clone(),
                available: self.language.available.clone(),
            },
            storage: StorageConfigToml {
                path: self.storage_path.to_string_lossy().into_owned(),
            },
        };

        let content = toml::to_string_pretty(&file)
            .map_err(|e| AppError::Validation(format!("TOML: {}", e)))?;

        // Ensure dir exists
        if let Some(parent) = PathBuf::from(path).parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        tokio::fs::write(path, content).await.map_err(AppError::Io)
    }

    pub fn config_path(&self) -> Option<&str> {
        self.config_path.as_deref()
    }

    /// Storage file resolved against the config file's directory when relative.
    pub fn resolved_storage_path(&self) -> PathBuf {
        if self.storage_path.is_absolute() {
            return self.storage_path.clone();
        }
        self.config_path
            .as_deref()
            .and_then(|p| Path::new(p).parent())
            .map(|dir| dir.join(&self.storage_path))
            .unwrap_or_else(|| self.storage_path.clone())
    }

    // Helper methods
    fn clamp(value: u64, min: u64, max: u64, default: u64) -> u64 {
        if value < min || value > max {
            default
        } else {
            value
        }
    }

    fn raw_default_language(content: &str) -> String {
        toml::from_str::<ConfigFile>(content)
            .map(|f| f.language.default.trim().to_lowercase())
            .unwrap_or_default()
    }

    pub fn log_summary(&self) {
        log::info!("Agri360 Portal v{}", crate::core::constants::VERSION);
        log::info!(
            "Backend: {} (timeout {}s), languages: {}",
            self.backend.base_url,
            self.backend.timeout.as_secs(),
            self.language.available.join(", ")
        );
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            config_path: None,
            log_level: "info".into(),
            backend: BackendConfig::default(),
            language: LanguageConfig::default(),
            storage_path: PathBuf::from(DEFAULT_STORAGE_PATH),
        }
    }
}
