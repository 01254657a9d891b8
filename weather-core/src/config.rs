use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

pub const DEFAULT_AREA_URL: &str = "https://www.jma.go.jp/bosai/common/const/area.json";
pub const DEFAULT_FORECAST_URL: &str =
    "https://www.jma.go.jp/bosai/forecast/data/forecast/{code}.json";

const CODE_PLACEHOLDER: &str = "{code}";
const DATABASE_FILE: &str = "weather.db";

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// timeout_secs = 10
/// default_area = "130000"
/// database_path = "/home/me/weather.db"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Index of forecast offices.
    #[serde(default = "default_area_url")]
    pub area_url: String,

    /// Forecast endpoint; `{code}` is replaced by the office code.
    #[serde(default = "default_forecast_url")]
    pub forecast_url: String,

    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Forecast cache location; the platform data directory when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database_path: Option<PathBuf>,

    /// Office code used when none is given on the command line.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_area: Option<String>,
}

fn default_area_url() -> String {
    DEFAULT_AREA_URL.to_string()
}

fn default_forecast_url() -> String {
    DEFAULT_FORECAST_URL.to_string()
}

const fn default_timeout() -> u64 {
    10
}

impl Default for Config {
    fn default() -> Self {
        Self {
            area_url: default_area_url(),
            forecast_url: default_forecast_url(),
            timeout_secs: default_timeout(),
            database_path: None,
            default_area: None,
        }
    }
}

impl Config {
    /// Load config from disk, or return the defaults if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            // First run: no config file, return defaults.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::config_file_path()?;
        self.save_to(&path)?;
        Ok(path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        Ok(project_dirs()?.config_dir().join("config.toml"))
    }

    /// Forecast URL for a single office.
    pub fn forecast_url_for(&self, area_code: &str) -> String {
        self.forecast_url.replace(CODE_PLACEHOLDER, area_code)
    }

    /// Configured cache location, or `weather.db` in the platform data directory.
    pub fn database_path(&self) -> Result<PathBuf> {
        match &self.database_path {
            Some(path) => Ok(path.clone()),
            None => Ok(project_dirs()?.data_dir().join(DATABASE_FILE)),
        }
    }

    /// Return the default area code, with a hint when none is configured.
    pub fn default_area_code(&self) -> Result<&str> {
        self.default_area.as_deref().ok_or_else(|| {
            anyhow!(
                "No area given and no default area configured.\n\
                 Hint: run `weather areas` to find a code, then `weather configure`."
            )
        })
    }

    pub fn set_default_area(&mut self, area_code: impl Into<String>) {
        self.default_area = Some(area_code.into());
    }
}

fn project_dirs() -> Result<ProjectDirs> {
    ProjectDirs::from("dev", "desk-tools", "weather-cli")
        .ok_or_else(|| anyhow!("Could not determine platform config directory"))
}
