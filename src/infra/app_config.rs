use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const DEFAULT_DATABASE_NAME: &str = "ChartDatabase";

/// Where and how the chart database is opened.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct StoreConfig {
    /// File stem of the database; the file is `<database_name>.sqlite`.
    pub database_name: String,
    /// Directory holding the database. Defaults to the platform data directory.
    pub data_dir: Option<PathBuf>,
    /// Keep everything in a private in-memory database.
    pub in_memory: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            database_name: DEFAULT_DATABASE_NAME.to_string(),
            data_dir: None,
            in_memory: false,
        }
    }
}

impl StoreConfig {
    pub fn in_memory() -> Self {
        Self {
            in_memory: true,
            ..Self::default()
        }
    }

    pub fn at_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: Some(dir.into()),
            ..Self::default()
        }
    }

    /// Full path of the database file.
    pub fn database_path(&self) -> PathBuf {
        let dir = self.data_dir.clone().unwrap_or_else(app_data_dir);
        dir.join(format!("{}.sqlite", self.database_name))
    }
}

/// Read a TOML config file. A missing file yields the defaults.
pub fn load_config(path: &Path) -> Result<StoreConfig> {
    if !path.exists() {
        return Ok(StoreConfig::default());
    }
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config at {}", path.display()))?;
    toml::from_str(&contents)
        .with_context(|| format!("Invalid chart store config at {}", path.display()))
}

fn app_data_dir() -> PathBuf {
    #[cfg(target_os = "macos")]
    {
        if let Some(home) = home::home_dir() {
            return home
                .join("Library")
                .join("Application Support")
                .join("ChartStore");
        }
    }

    #[cfg(target_os = "windows")]
    {
        if let Some(appdata) = std::env::var_os("APPDATA") {
            return PathBuf::from(appdata).join("ChartStore");
        }
    }

    #[cfg(target_os = "linux")]
    {
        if let Some(xdg) = std::env::var_os("XDG_DATA_HOME") {
            return PathBuf::from(xdg).join("chart-store");
        }
        if let Some(home) = home::home_dir() {
            return home.join(".local").join("share").join("chart-store");
        }
    }

    std::env::current_dir()
        .unwrap_or_else(|_| PathBuf::from("."))
        .join(".chart-store")
}
