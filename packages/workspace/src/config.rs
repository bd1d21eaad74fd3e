use crate::error::{WorkspaceError, WorkspaceResult};
use crate::proto::Theme;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_NAME: &str = "lipd-editor.config.json";

/// Editor configuration file format
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkspaceConfig {
    /// Leading path segment naming the dataset itself
    #[serde(default = "default_root_label")]
    pub root_label: String,

    /// Maximum undo depth per document (0 = unlimited)
    #[serde(default)]
    pub history_limit: usize,

    /// Where staged writes are prepared before being moved into place
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scratch_dir: Option<PathBuf>,

    #[serde(default)]
    pub theme: Theme,

    #[serde(default = "default_pretty_json")]
    pub pretty_json: bool,
}

fn default_root_label() -> String {
    lipd_editor::ROOT_LABEL.to_string()
}

fn default_pretty_json() -> bool {
    true
}

impl WorkspaceConfig {
    /// Load config from a directory
    pub fn load(dir: &Path) -> WorkspaceResult<Self> {
        let config_path = dir.join(DEFAULT_CONFIG_NAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&config_path)?;
        let mut config: WorkspaceConfig =
            serde_json::from_str(&content).map_err(|e| WorkspaceError::Config {
                path: config_path.clone(),
                message: e.to_string(),
            })?;

        if let Some(scratch) = config.scratch_dir.take() {
            config.scratch_dir = Some(if scratch.is_relative() {
                dir.join(scratch)
            } else {
                scratch
            });
        }

        tracing::debug!("Loaded config from {}", config_path.display());
        Ok(config)
    }

    /// Scratch directory for staged writes
    pub fn scratch_dir(&self) -> PathBuf {
        self.scratch_dir
            .clone()
            .unwrap_or_else(|| std::env::temp_dir().join("lipd-editor"))
    }
}

impl Default for WorkspaceConfig {
    fn default() -> Self {
        Self {
            root_label: default_root_label(),
            history_limit: 0,
            scratch_dir: None,
            theme: Theme::default(),
            pretty_json: default_pretty_json(),
        }
    }
}
