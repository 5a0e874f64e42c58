use crate::args::DEFAULT_DEBUG_WAIT_FLAG;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV_VAR: &str = "REPLAYER_CONFIG";
/// Config file picked up from the working directory when present.
pub const DEFAULT_CONFIG_FILE: &str = "replayer.toml";

#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum SummaryFormat {
    #[default]
    Text,
    Json,
}

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
#[serde(deny_unknown_fields)]
pub struct ReplayConfig {
    #[serde(default = "default_debug_wait_flag")]
    pub debug_wait_flag: String,
    #[serde(default)]
    pub summary_format: SummaryFormat,
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
}

fn default_debug_wait_flag() -> String {
    DEFAULT_DEBUG_WAIT_FLAG.to_string()
}

pub fn default_log_filter() -> String {
    "info".to_string()
}

impl Default for ReplayConfig {
    fn default() -> Self {
        Self {
            debug_wait_flag: default_debug_wait_flag(),
            summary_format: SummaryFormat::default(),
            log_filter: default_log_filter(),
        }
    }
}

impl ReplayConfig {
    pub fn load_from_file(path: &Path) -> Result<Self, anyhow::Error> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Failed to read config file at {:?}: {}", path, e))?;

        Self::from_toml_str(&content).map_err(|e| {
            anyhow::anyhow!("Failed to parse TOML from config file {:?}: {}", path, e)
        })
    }

    pub fn from_toml_str(content: &str) -> Result<Self, anyhow::Error> {
        let config: ReplayConfig = toml::from_str(content)?;
        if config.debug_wait_flag.is_empty() {
            anyhow::bail!("debug-wait-flag must not be empty");
        }
        Ok(config)
    }

    /// Picks the config file to use: `$REPLAYER_CONFIG` if set, otherwise
    /// `replayer.toml` in the working directory if it exists.
    pub fn locate() -> Option<PathBuf> {
        Self::locate_with(std::env::var_os(CONFIG_ENV_VAR).map(PathBuf::from), Path::new("."))
    }

    fn locate_with(explicit: Option<PathBuf>, working_dir: &Path) -> Option<PathBuf> {
        if let Some(path) = explicit {
            return Some(path);
        }
        let default_path = working_dir.join(DEFAULT_CONFIG_FILE);
        default_path.exists().then_some(default_path)
    }

    /// Loads the located config file, or the built-in defaults when there is none.
    pub fn discover() -> Result<Self, anyhow::Error> {
        match Self::locate() {
            Some(path) => Self::load_from_file(&path),
            None => Ok(Self::default()),
        }
    }
}
