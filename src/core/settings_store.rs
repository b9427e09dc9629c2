use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::Context;

use super::models::EngineSettings;

pub const SETTINGS_PATH_ENV: &str = "RESUME_MATCHER_SETTINGS";
const SETTINGS_FILE_NAME: &str = "engine-settings.json";
const APP_DIR_NAME: &str = "ResumeMatcher";

pub struct SettingsStore {
    file_path: PathBuf,
}

impl Default for SettingsStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SettingsStore {
    /// Uses `RESUME_MATCHER_SETTINGS` when set, otherwise the per-user data
    /// directory.
    pub fn new() -> Self {
        Self::new_with_path(resolve_settings_path(
            std::env::var(SETTINGS_PATH_ENV).ok().as_deref(),
        ))
    }

    pub fn new_with_path(file_path: PathBuf) -> Self {
        Self { file_path }
    }

    pub fn path(&self) -> &Path {
        &self.file_path
    }

    /// A missing file yields the defaults.
    pub async fn load(&self) -> anyhow::Result<EngineSettings> {
        let content = match tokio::fs::read_to_string(&self.file_path).await {
            Ok(content) => content,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(EngineSettings::default()),
            Err(err) => {
                return Err(err).with_context(|| {
                    format!("failed to read settings file {}", self.file_path.display())
                })
            }
        };

        let settings: EngineSettings = serde_json::from_str(&content).with_context(|| {
            format!("invalid JSON in settings file {}", self.file_path.display())
        })?;
        Ok(settings.sanitized())
    }

    pub async fn save(&self, settings: &EngineSettings) -> anyhow::Result<()> {
        if let Some(parent) = self.file_path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }

        let json = serde_json::to_vec_pretty(&settings.clone().sanitized())?;
        tokio::fs::write(&self.file_path, json)
            .await
            .with_context(|| {
                format!("failed to write settings file {}", self.file_path.display())
            })
    }
}

fn resolve_settings_path(override_path: Option<&str>) -> PathBuf {
    override_path
        .map(str::trim)
        .filter(|path| !path.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| app_data_root().join(SETTINGS_FILE_NAME))
}

/// Per-user data directory for the engine (`%LOCALAPPDATA%`,
/// `~/Library/Application Support` or `$XDG_DATA_HOME`), falling back to the
/// working directory.
pub fn app_data_root() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR_NAME)
}
