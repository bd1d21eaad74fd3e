use anyhow::Result;
use lipd_editor::Path;
use lipd_model::SchemaRegistry;
use lipd_workspace::{DocumentProvider, WorkspaceConfig};
use std::path::PathBuf;
use std::sync::Arc;

/// Configuration and services for one CLI invocation
pub struct Context {
    pub cwd: PathBuf,
    pub config: WorkspaceConfig,
    pub provider: DocumentProvider,
}

impl Context {
    /// Load `lipd-editor.config.json` from `cwd`, falling back to defaults
    pub fn load(cwd: &str) -> Result<Self> {
        let cwd = PathBuf::from(cwd);
        let config = WorkspaceConfig::load(&cwd)?;
        let provider = DocumentProvider::from_config(&config, Arc::new(SchemaRegistry::lipd()));

        Ok(Self {
            cwd,
            config,
            provider,
        })
    }

    /// Dataset file path relative to the working directory
    pub fn file(&self, file: &str) -> PathBuf {
        self.cwd.join(file)
    }

    /// Parse a data path using the configured root label
    pub fn path(&self, raw: &str) -> Path {
        Path::parse_with_root(raw, &self.config.root_label)
    }
}

/// Interpret a command-line value as JSON, falling back to a plain string
pub fn parse_value(raw: &str) -> Option<lipd_model::Value> {
    match serde_json::from_str::<serde_json::Value>(raw) {
        Ok(serde_json::Value::Null) => None,
        Ok(json) => Some(json.into()),
        Err(_) => Some(raw.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lipd_model::Value;

    #[test]
    fn test_parse_value() {
        assert_eq!(parse_value("-41.5"), Some(Value::Number(-41.5)));
        assert_eq!(parse_value("true"), Some(Value::Bool(true)));
        assert_eq!(parse_value("\"12\""), Some(Value::from("12")));
        assert_eq!(parse_value("Marine sediment"), Some(Value::from("Marine sediment")));
        assert_eq!(parse_value("null"), None);
    }

    #[test]
    fn test_context_uses_configured_root_label() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(lipd_workspace::DEFAULT_CONFIG_NAME),
            r#"{ "rootLabel": "lipd" }"#,
        )
        .unwrap();

        let context = Context::load(&dir.path().display().to_string()).unwrap();
        assert_eq!(context.path("lipd.name").to_string(), "name");
        assert_eq!(context.path("dataset.name").to_string(), "dataset.name");
    }
}
