mod settings;

pub use settings::{Config, ServerSettings, StorageSettings};

use crate::error::{ClienteError, Result};
use directories::ProjectDirs;
use std::fs;
use std::path::{Path, PathBuf};

/// Get the config directory path (XDG config dir or ~/.clientes/)
pub fn config_dir() -> Result<PathBuf> {
    if let Some(proj_dirs) = ProjectDirs::from("", "", "clientes") {
        return Ok(proj_dirs.config_dir().to_path_buf());
    }

    let home = dirs_home().ok_or_else(|| {
        ClienteError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "Could not determine home directory",
        ))
    })?;

    Ok(home.join(".clientes"))
}

fn dirs_home() -> Option<PathBuf> {
    std::env::var_os("HOME").map(PathBuf::from)
}

/// Expand ~ in paths
pub fn expand_path(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs_home() {
            return home.join(rest);
        }
    }
    PathBuf::from(path)
}

/// Resolve the data file from config; relative paths live under the config dir
pub fn resolve_data_file(data_file: &str, cfg_dir: &Path) -> PathBuf {
    let expanded = expand_path(data_file);
    if expanded.is_absolute() {
        expanded
    } else {
        cfg_dir.join(expanded)
    }
}

/// Load config.toml, applying the PORT environment override
pub fn load_config(cfg_dir: &Path) -> Result<Config> {
    if !cfg_dir.exists() {
        return Err(ClienteError::ConfigNotFound(cfg_dir.to_path_buf()));
    }

    let path = cfg_dir.join("config.toml");
    if !path.exists() {
        return Err(ClienteError::ConfigFileNotFound(path));
    }
    let content = fs::read_to_string(&path)?;
    let mut config: Config =
        toml::from_str(&content).map_err(|e| ClienteError::ConfigParse { path, source: e })?;

    if let Some(port) = std::env::var("PORT").ok().and_then(|p| p.parse().ok()) {
        config.server.port = port;
    }

    Ok(config)
}

/// Create the config directory with a template config.toml and an empty data file
pub fn init_config_dir(cfg_dir: &Path) -> Result<PathBuf> {
    if cfg_dir.exists() {
        return Err(ClienteError::AlreadyInitialized(cfg_dir.to_path_buf()));
    }

    fs::create_dir_all(cfg_dir)?;
    fs::write(cfg_dir.join("config.toml"), CONFIG_TEMPLATE)?;

    let data_file = resolve_data_file(&StorageSettings::default().data_file, cfg_dir);
    if let Some(parent) = data_file.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&data_file, "[]")?;

    Ok(data_file)
}

/// Template content for config.toml
pub const CONFIG_TEMPLATE: &str = r#"[server]
host = "127.0.0.1"
port = 3000   # PORT environment variable takes precedence

[storage]
# Relative paths are resolved against this config directory
data_file = "data/clientes.json"
"#;
