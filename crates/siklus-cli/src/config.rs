//! Configuration file management for siklus.
//!
//! Provides a TOML-based config file at `~/.config/siklus/config.toml` and
//! a resolution chain for the data directory:
//! CLI flag > env var > config file > default.

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

use siklus_store::config as store_config;

// -----------------------------------------------------------------------
// Config file types
// -----------------------------------------------------------------------

#[derive(Debug, Serialize, Deserialize)]
pub struct ConfigFile {
    pub data: DataSection,
    /// Path to a catalog TOML overriding the built-in tobacco catalog.
    #[serde(default)]
    pub catalog: Option<CatalogSection>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DataSection {
    pub dir: PathBuf,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CatalogSection {
    pub path: PathBuf,
}

// -----------------------------------------------------------------------
// Paths
// -----------------------------------------------------------------------

/// Return the siklus config directory.
///
/// Always uses XDG layout: `$XDG_CONFIG_HOME/siklus` or `~/.config/siklus`,
/// ignoring the platform-specific `dirs::config_dir()`.
pub fn config_dir() -> PathBuf {
    if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
        return PathBuf::from(xdg).join("siklus");
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config")
        .join("siklus")
}

/// Return the path to the siklus config file.
pub fn config_path() -> PathBuf {
    config_dir().join("config.toml")
}

// -----------------------------------------------------------------------
// Read / write
// -----------------------------------------------------------------------

/// Load and parse the config file if it exists.
pub fn load_config() -> Result<Option<ConfigFile>> {
    let path = config_path();
    if !path.exists() {
        return Ok(None);
    }
    let contents = std::fs::read_to_string(&path)
        .with_context(|| format!("failed to read config file at {}", path.display()))?;
    let config: ConfigFile = toml::from_str(&contents).context("failed to parse config file")?;
    Ok(Some(config))
}

/// Serialize and write the config file, creating parent dirs as needed.
pub fn save_config(config: &ConfigFile, force: bool) -> Result<PathBuf> {
    let path = config_path();
    if path.exists() && !force {
        bail!(
            "config file already exists at {} (use --force to overwrite)",
            path.display()
        );
    }
    let dir = config_dir();
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("failed to create config directory {}", dir.display()))?;

    let contents = toml::to_string_pretty(config).context("failed to serialize config")?;
    std::fs::write(&path, contents)
        .with_context(|| format!("failed to write config file at {}", path.display()))?;
    Ok(path)
}

// -----------------------------------------------------------------------
// Resolution
// -----------------------------------------------------------------------

/// Resolve the data directory: `--data-dir` flag, then `SIKLUS_DATA_DIR`,
/// then the config file, then the XDG default.
pub fn resolve_data_dir(flag: Option<PathBuf>) -> Result<PathBuf> {
    if flag.is_some() || std::env::var(store_config::DATA_DIR_ENV).is_ok() {
        return Ok(store_config::resolve_data_dir(flag));
    }
    if let Some(config) = load_config()? {
        return Ok(config.data.dir);
    }
    Ok(store_config::default_data_dir())
}

/// Resolve the catalog: explicit `--catalog` flag, then the config file,
/// then the embedded tobacco catalog.
pub fn resolve_catalog(flag: Option<PathBuf>) -> Result<siklus_core::catalog::PhaseCatalog> {
    let path = match flag {
        Some(path) => Some(path),
        None => load_config()?.and_then(|c| c.catalog).map(|c| c.path),
    };
    match path {
        Some(path) => {
            let contents = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read catalog file {}", path.display()))?;
            siklus_core::catalog::toml_format::parse_catalog_toml(&contents)
                .with_context(|| format!("invalid catalog file {}", path.display()))
        }
        None => Ok(siklus_core::catalog::PhaseCatalog::builtin_tobacco()),
    }
}
