//! Configuration management for `itr`.
//!
//! Values are resolved in layers, lowest precedence first:
//! - Built-in defaults (reference date 2019-05-01, data dir `data/`)
//! - YAML file (`--config <path>`, else `.issue-tracker/config.yaml` if present)
//! - Environment variables (`ITR_REFERENCE_DATE`, `ITR_DATA_DIR`)
//! - Command-line flags (`--reference-date`, `--data-dir`)

use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;
use tracker_lib::util::{ISO_DATE_FORMAT, default_reference_date, parse_iso_date};

use crate::error::{AppError, Result};

pub const DEFAULT_CONFIG_PATH: &str = ".issue-tracker/config.yaml";
pub const DEFAULT_DATA_DIR: &str = "data";
pub const DEFAULT_EMPLOYEES_FILE: &str = "employees.csv";
pub const DEFAULT_ISSUES_FILE: &str = "issues.csv";

pub const ENV_REFERENCE_DATE: &str = "ITR_REFERENCE_DATE";
pub const ENV_DATA_DIR: &str = "ITR_DATA_DIR";

/// On-disk config file shape. Every key is optional.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigFile {
    pub reference_date: Option<String>,
    pub data_dir: Option<PathBuf>,
    pub employees_file: Option<String>,
    pub issues_file: Option<String>,
}

impl ConfigFile {
    /// Parse a YAML config file.
    ///
    /// # Errors
    ///
    /// Returns `Io` if the file cannot be read or `Yaml` if it is invalid.
    pub fn from_path(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Self::from_yaml(&text)
    }

    /// Parse YAML text. An empty document yields the defaults.
    ///
    /// # Errors
    ///
    /// Returns `Yaml` if the text is invalid or has unknown keys.
    pub fn from_yaml(text: &str) -> Result<Self> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(text)?)
    }
}

/// Values taken from the process environment.
#[derive(Debug, Clone, Default)]
pub struct EnvOverrides {
    pub reference_date: Option<String>,
    pub data_dir: Option<PathBuf>,
}

impl EnvOverrides {
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            reference_date: std::env::var(ENV_REFERENCE_DATE).ok(),
            data_dir: std::env::var_os(ENV_DATA_DIR).map(PathBuf::from),
        }
    }
}

/// Values taken from global CLI flags.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub config_path: Option<PathBuf>,
    pub data_dir: Option<PathBuf>,
    pub reference_date: Option<String>,
}

/// Fully resolved configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Config {
    pub reference_date: NaiveDate,
    pub data_dir: PathBuf,
    pub employees_file: String,
    pub issues_file: String,
    /// Config file that contributed values, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            reference_date: default_reference_date(),
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            employees_file: DEFAULT_EMPLOYEES_FILE.to_string(),
            issues_file: DEFAULT_ISSUES_FILE.to_string(),
            source: None,
        }
    }
}

impl Config {
    /// Load configuration from file, environment and CLI flags.
    ///
    /// # Errors
    ///
    /// Returns an error if an explicit `--config` file is missing, a config
    /// file is invalid, or a reference date cannot be parsed.
    pub fn load(cli: &CliOverrides) -> Result<Self> {
        let (file, source) = match &cli.config_path {
            Some(path) => {
                if !path.exists() {
                    return Err(AppError::Config(format!(
                        "config file not found: {}",
                        path.display()
                    )));
                }
                (ConfigFile::from_path(path)?, Some(path.clone()))
            }
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_PATH);
                if default_path.is_file() {
                    (
                        ConfigFile::from_path(default_path)?,
                        Some(default_path.to_path_buf()),
                    )
                } else {
                    (ConfigFile::default(), None)
                }
            }
        };

        let mut config = Self::resolve(file, &EnvOverrides::from_env(), cli)?;
        config.source = source;
        debug!(?config, "Configuration resolved");
        Ok(config)
    }

    /// Apply the layers on top of the defaults.
    ///
    /// # Errors
    ///
    /// Returns `Config` if any layer supplies an unparseable reference date.
    pub fn resolve(file: ConfigFile, env: &EnvOverrides, cli: &CliOverrides) -> Result<Self> {
        let mut config = Self::default();

        if let Some(date) = file.reference_date.as_deref() {
            config.reference_date = parse_reference_date(date, "config file")?;
        }
        if let Some(dir) = file.data_dir {
            config.data_dir = dir;
        }
        if let Some(name) = file.employees_file {
            config.employees_file = name;
        }
        if let Some(name) = file.issues_file {
            config.issues_file = name;
        }

        if let Some(date) = env.reference_date.as_deref() {
            config.reference_date = parse_reference_date(date, ENV_REFERENCE_DATE)?;
        }
        if let Some(dir) = &env.data_dir {
            config.data_dir.clone_from(dir);
        }

        if let Some(date) = cli.reference_date.as_deref() {
            config.reference_date = parse_reference_date(date, "--reference-date")?;
        }
        if let Some(dir) = &cli.data_dir {
            config.data_dir.clone_from(dir);
        }

        Ok(config)
    }

    #[must_use]
    pub fn employees_path(&self) -> PathBuf {
        self.data_dir.join(&self.employees_file)
    }

    #[must_use]
    pub fn issues_path(&self) -> PathBuf {
        self.data_dir.join(&self.issues_file)
    }

    /// Reference date rendered as `yyyy-mm-dd`.
    #[must_use]
    pub fn reference_date_string(&self) -> String {
        self.reference_date.format(ISO_DATE_FORMAT).to_string()
    }
}

fn parse_reference_date(value: &str, origin: &str) -> Result<NaiveDate> {
    parse_iso_date(value).map_err(|e| AppError::Config(format!("{origin}: {e}")))
}
