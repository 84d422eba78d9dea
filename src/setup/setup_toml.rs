// =====================================================
// FILE: src/setup/setup_toml.rs - DEFAULT CONFIG
// =====================================================

use crate::core::prelude::*;
use std::path::PathBuf;
use tokio::fs;

const DEFAULT_CONFIG: &str = r#"[general]
# error | warn | info | debug | trace (RUST_LOG overrides)
log_level = "info"

[backend]
base_url = "http://127.0.0.1:5000"
# Request timeout in seconds (1-300)
timeout_secs = 15

[language]
default = "en"
available = ["en", "hi", "ta", "kn", "ml"]

[storage]
# Relative paths resolve against this file's directory
path = "storage.json"
"#;

pub async fn ensure_config_exists() -> Result<PathBuf> {
    let exe_path = std::env::current_exe().map_err(AppError::Io)?;
    let base_dir = exe_path.parent().ok_or_else(|| {
        AppError::Validation("Could not determine executable directory".to_string())
    })?;

    let config_dir = base_dir.join(".agri");
    if !config_dir.exists() {
        fs::create_dir_all(&config_dir).await?;
        log::debug!("Config directory created: {}", config_dir.display());
    }

    let config_path = config_dir.join("agri.toml");
    if !config_path.exists() {
        fs::write(&config_path, DEFAULT_CONFIG).await?;
        log::info!("Config file created: {}", config_path.display());
    }

    Ok(config_path)
}

pub fn get_config_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();
    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(base_dir) = exe_path.parent() {
            paths.push(base_dir.join(".agri/agri.toml"));
            paths.push(base_dir.join("agri.toml"));
            paths.push(base_dir.join("config/agri.toml"));
        }
    }
    #[cfg(debug_assertions)]
    {
        paths.push(PathBuf::from("agri.toml"));
        paths.push(PathBuf::from(".agri/agri.toml"));
    }
    paths
}
