//! QRSNAP runtime configuration handling

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Folder name used under the user's pictures (or home) directory
const DEFAULT_FOLDER_NAME: &str = "QR codes";

/// Top-level configuration structure persisted to disk or environment
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct QrSnapConfig {
    /// Where and how QR images are written
    pub output: OutputOptions,
    /// Logging configuration
    pub logging: LoggingOptions,
}

/// Source of environment-style overrides, keyed by variable name
pub(crate) type EnvLookup<'a> = &'a dyn Fn(&str) -> Option<String>;

fn process_env(key: &str) -> Option<String> {
    env::var(key).ok()
}

impl QrSnapConfig {
    /// Load configuration from an explicit path or fall back to discovered defaults.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        let cwd =
            env::current_dir().map_err(|e| Error::Config(format!("Failed to read cwd: {e}")))?;
        Self::load_from(explicit_path, &cwd, &process_env)
    }

    fn load_from(explicit_path: Option<&Path>, cwd: &Path, lookup: EnvLookup<'_>) -> Result<Self> {
        let xdg_config = lookup("XDG_CONFIG_HOME").map(PathBuf::from);

        let mut config = if let Some(path) = explicit_path {
            Self::from_file(path)?
        } else if let Some(path) = Self::discover_file(cwd, xdg_config.as_deref()) {
            tracing::info!("Using configuration file: {}", path.display());
            Self::from_file(&path)?
        } else {
            tracing::debug!("No qrsnap.toml / qrsnap.yaml found, using defaults");
            Self::default()
        };

        config.output.apply_overrides(lookup);
        config.logging.apply_overrides(lookup);
        Ok(config)
    }

    /// Look in `cwd` first, then `<xdg_config>/qrsnap/`.
    fn discover_file(cwd: &Path, xdg_config: Option<&Path>) -> Option<PathBuf> {
        let local = ["qrsnap.toml", "qrsnap.yaml", "qrsnap.yml"]
            .into_iter()
            .map(|candidate| cwd.join(candidate));
        let xdg = xdg_config.into_iter().flat_map(|base| {
            ["config.toml", "config.yaml"]
                .into_iter()
                .map(move |candidate| base.join("qrsnap").join(candidate))
        });

        local.chain(xdg).find(|path| path.exists())
    }

    /// Read configuration from a concrete file path.
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Failed to read {}: {e}", path.display())))?;

        match path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or("")
            .to_ascii_lowercase()
            .as_str()
        {
            "toml" => toml::from_str(&contents).map_err(|e| {
                Error::Config(format!("Failed to parse TOML {}: {e}", path.display()))
            }),
            "yaml" | "yml" => serde_yaml::from_str(&contents).map_err(|e| {
                Error::Config(format!("Failed to parse YAML {}: {e}", path.display()))
            }),
            other => Err(Error::Config(format!(
                "Unsupported config format '{}', expected toml/yaml",
                other
            ))),
        }
    }
}

fn parse_switch(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "on" => Some(true),
        "0" | "false" | "off" => Some(false),
        _ => None,
    }
}

/// Output destination settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputOptions {
    /// Folder used when the form's folder field is left empty
    pub default_folder: PathBuf,
    /// Decode each saved PNG and check it matches the input text
    pub verify_after_save: bool,
}

impl Default for OutputOptions {
    fn default() -> Self {
        Self {
            default_folder: default_save_folder(),
            verify_after_save: false,
        }
    }
}

impl OutputOptions {
    /// Options rooted at an explicit default folder.
    pub fn with_default_folder(folder: impl Into<PathBuf>) -> Self {
        Self {
            default_folder: folder.into(),
            ..Self::default()
        }
    }

    pub(crate) fn apply_overrides(&mut self, lookup: EnvLookup<'_>) {
        if let Some(folder) = lookup("QRSNAP_DEFAULT_FOLDER") {
            if !folder.trim().is_empty() {
                self.default_folder = PathBuf::from(folder);
            }
        }
        if let Some(verify) = lookup("QRSNAP_VERIFY").as_deref().and_then(parse_switch) {
            self.verify_after_save = verify;
        }
    }

    /// Create the default folder (and parents) if it does not exist yet.
    pub fn ensure_default_folder(&self) -> Result<()> {
        fs::create_dir_all(&self.default_folder).map_err(|source| Error::FolderCreation {
            folder: self.default_folder.clone(),
            source,
        })
    }
}

fn default_save_folder() -> PathBuf {
    dirs::picture_dir()
        .or_else(dirs::home_dir)
        .map(|base| base.join(DEFAULT_FOLDER_NAME))
        .unwrap_or_else(|| PathBuf::from("saved-qr-codes"))
}

/// Structured logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingOptions {
    /// Default log level (overridable via `QRSNAP_LOG_LEVEL`)
    pub level: String,
    /// Optional log file path for teeing structured logs
    pub file: Option<PathBuf>,
    /// Force ANSI colors in console logging
    pub color: bool,
    /// Optional log rotation strategy applied to `file`
    pub rotation: Option<LogRotation>,
}

impl Default for LoggingOptions {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
            color: true,
            rotation: None,
        }
    }
}

impl LoggingOptions {
    pub(crate) fn apply_overrides(&mut self, lookup: EnvLookup<'_>) {
        if let Some(level) = lookup("QRSNAP_LOG_LEVEL") {
            self.level = level;
        }
        if let Some(file) = lookup("QRSNAP_LOG_FILE") {
            self.file = Some(PathBuf::from(file));
        }
        if let Some(color) = lookup("QRSNAP_LOG_COLOR").as_deref().and_then(parse_switch) {
            self.color = color;
        }
        if let Some(rotation) = lookup("QRSNAP_LOG_ROTATION").as_deref().and_then(LogRotation::parse) {
            self.rotation = Some(rotation);
        }
    }
}

/// Supported log rotation policies for file sinks
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogRotation {
    /// Rotate log files once per hour
    Hourly,
    /// Rotate log files once per day
    Daily,
}

impl LogRotation {
    fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "hourly" => Some(Self::Hourly),
            "daily" => Some(Self::Daily),
            _ => None,
        }
    }
}
