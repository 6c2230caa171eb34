//! Search settings resolution: built-in defaults, then the RON file, then CLI/env.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use engine_logging::engine_info;
use pharma_engine::SearchSettings;
use serde::Deserialize;

use crate::cli::Cli;

pub const DEFAULT_SETTINGS_FILE: &str = "pharma.ron";

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("failed to read settings from {path:?}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse settings in {path:?}: {source}")]
    Parse {
        path: PathBuf,
        source: ron::error::SpannedError,
    },
    #[error("{field} must be greater than zero")]
    Zero { field: &'static str },
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct FileSettings {
    base_url: Option<String>,
    timeout_secs: Option<u64>,
    connect_timeout_secs: Option<u64>,
    max_bytes: Option<u64>,
}

/// Overrides taken from the command line or environment.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub config: Option<PathBuf>,
    pub base_url: Option<String>,
    pub timeout_secs: Option<u64>,
}

impl From<&Cli> for Overrides {
    fn from(cli: &Cli) -> Self {
        Self {
            config: cli.config.clone(),
            base_url: cli.base_url.clone(),
            timeout_secs: cli.timeout_secs,
        }
    }
}

pub fn load(overrides: &Overrides) -> Result<SearchSettings, SettingsError> {
    load_from(overrides, Path::new("."))
}

/// Like [`load`], resolving the default settings file inside `dir`.
pub fn load_from(overrides: &Overrides, dir: &Path) -> Result<SearchSettings, SettingsError> {
    let file = match &overrides.config {
        // An explicit path must exist.
        Some(path) => read_file(path)?,
        None => {
            let path = dir.join(DEFAULT_SETTINGS_FILE);
            if path.is_file() {
                read_file(&path)?
            } else {
                FileSettings::default()
            }
        }
    };

    let mut settings = SearchSettings::default();
    if let Some(base_url) = overrides.base_url.clone().or(file.base_url) {
        settings.base_url = base_url;
    }
    if let Some(secs) = overrides.timeout_secs.or(file.timeout_secs) {
        settings.request_timeout = positive_secs(secs, "timeout_secs")?;
    }
    if let Some(secs) = file.connect_timeout_secs {
        settings.connect_timeout = positive_secs(secs, "connect_timeout_secs")?;
    }
    if let Some(max_bytes) = file.max_bytes {
        if max_bytes == 0 {
            return Err(SettingsError::Zero { field: "max_bytes" });
        }
        settings.max_bytes = max_bytes;
    }
    Ok(settings)
}

fn read_file(path: &Path) -> Result<FileSettings, SettingsError> {
    let content = fs::read_to_string(path).map_err(|source| SettingsError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let settings = ron::from_str(&content).map_err(|source| SettingsError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    engine_info!("Loaded settings from {:?}", path);
    Ok(settings)
}

fn positive_secs(secs: u64, field: &'static str) -> Result<Duration, SettingsError> {
    if secs == 0 {
        return Err(SettingsError::Zero { field });
    }
    Ok(Duration::from_secs(secs))
}
