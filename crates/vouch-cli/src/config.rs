//! Configuration management for the CLI.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;
use vouch_domain::Vocabulary;
use vouch_gatekeeper::ValidationConfig;
use vouch_intake::FileStage;
use vouch_report::ReportMeta;
use vouch_tally::TallyConfig;

use crate::error::{CliError, Result};

/// File name looked up in the working directory.
pub const LOCAL_CONFIG: &str = "vouch.toml";

/// CLI configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Ledger metadata copied into reports
    #[serde(default)]
    pub ledger: ReportMeta,

    /// Stage files, merged in order
    #[serde(default)]
    pub stages: Vec<FileStage>,

    /// Axioms and known externals
    #[serde(default)]
    pub vocabulary: Vocabulary,

    /// Gatekeeper settings
    #[serde(default)]
    pub validation: ValidationConfig,

    /// Tiers, sectors and gap registry
    #[serde(default)]
    pub tally: TallyConfig,

    /// Global settings
    #[serde(default)]
    pub settings: Settings,

    /// File the configuration was read from
    #[serde(skip)]
    pub source: Option<PathBuf>,
}

/// Global CLI settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Enable colored output
    #[serde(default = "default_true")]
    pub color: bool,

    /// Default output format
    #[serde(default = "default_format")]
    pub format: OutputFormat,
}

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Table format
    Table,
    /// JSON format
    Json,
}

impl Config {
    /// Path of the per-user configuration file.
    pub fn global_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| CliError::Config("Could not find home directory".into()))?;
        Ok(home.join(".vouch").join("config.toml"))
    }

    /// Find the configuration file to use.
    ///
    /// An explicit path must exist. Otherwise `./vouch.toml`, then the
    /// per-user file; `None` when neither exists.
    pub fn locate(explicit: Option<&Path>) -> Result<Option<PathBuf>> {
        if let Some(path) = explicit {
            if !path.exists() {
                return Err(CliError::Config(format!(
                    "Config file {} does not exist",
                    path.display()
                )));
            }
            return Ok(Some(path.to_path_buf()));
        }

        let local = PathBuf::from(LOCAL_CONFIG);
        if local.exists() {
            return Ok(Some(local));
        }

        // No home directory just means no per-user file
        if let Ok(global) = Self::global_path() {
            if global.exists() {
                return Ok(Some(global));
            }
        }
        Ok(None)
    }

    /// Load the effective configuration, falling back to defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        match Self::locate(explicit)? {
            Some(path) => Self::load_from(&path),
            None => {
                debug!("No configuration file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Load and validate configuration from a file.
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let mut config: Config = toml::from_str(&contents)?;
        config.source = Some(path.to_path_buf());
        config.validate()?;
        debug!(path = %path.display(), stages = config.stages.len(), "Loaded configuration");
        Ok(config)
    }

    /// Save configuration to a file.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Create parent directory if it doesn't exist
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(path, self.to_toml()?)?;
        Ok(())
    }

    /// Render as TOML.
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Check every section.
    pub fn validate(&self) -> Result<()> {
        self.validation.validate()?;
        self.tally.validate()?;
        for stage in &self.stages {
            if stage.name.trim().is_empty() {
                return Err(CliError::Config("Stage name must not be empty".into()));
            }
        }
        Ok(())
    }

    /// Directory relative stage paths resolve against.
    pub fn base_dir(&self) -> PathBuf {
        self.source
            .as_deref()
            .and_then(Path::parent)
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."))
    }

    /// Stages to load.
    ///
    /// Files given on the command line replace the configured stages and
    /// are all required.
    pub fn resolved_stages(&self, overrides: &[PathBuf]) -> Vec<FileStage> {
        if !overrides.is_empty() {
            return overrides.iter().cloned().map(FileStage::from_path).collect();
        }
        let base = self.base_dir();
        self.stages
            .iter()
            .cloned()
            .map(|stage| stage.resolved_against(&base))
            .collect()
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            color: true,
            format: OutputFormat::Table,
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_format() -> OutputFormat {
    OutputFormat::Table
}
