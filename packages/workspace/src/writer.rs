//! # Two-Tier Writes
//!
//! Datasets are written through a [`FallbackWriter`]: a primary strategy is
//! tried first and a fallback runs only if it fails. Only the fallback's
//! failure reaches the caller.
//!
//! The default pairing is [`StagedWrite`] (prepare the bytes in a scratch
//! directory, then move them over the target) with [`DirectWrite`].

use crate::error::{WorkspaceError, WorkspaceResult};
use chrono::Utc;
use std::path::{Path, PathBuf};

/// One way of putting bytes at a path
pub trait WriteStrategy: Send + Sync {
    fn name(&self) -> &'static str;

    fn write(&self, path: &Path, bytes: &[u8]) -> std::io::Result<()>;
}

/// Write to a scratch file, then rename it over the target
#[derive(Debug, Clone)]
pub struct StagedWrite {
    scratch_dir: PathBuf,
}

impl StagedWrite {
    pub fn new(scratch_dir: impl Into<PathBuf>) -> Self {
        Self {
            scratch_dir: scratch_dir.into(),
        }
    }

    fn staging_path(&self, target: &Path) -> PathBuf {
        let file_name = target
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "dataset".to_string());

        self.scratch_dir.join(format!(
            "{}.{}.staged",
            file_name,
            Utc::now().timestamp_nanos_opt().unwrap_or_default()
        ))
    }
}

impl WriteStrategy for StagedWrite {
    fn name(&self) -> &'static str {
        "staged"
    }

    fn write(&self, path: &Path, bytes: &[u8]) -> std::io::Result<()> {
        std::fs::create_dir_all(&self.scratch_dir)?;
        let staged = self.staging_path(path);
        std::fs::write(&staged, bytes)?;

        if let Err(e) = std::fs::rename(&staged, path) {
            let _ = std::fs::remove_file(&staged);
            return Err(e);
        }
        Ok(())
    }
}

/// Write straight to the target
#[derive(Debug, Clone, Copy, Default)]
pub struct DirectWrite;

impl WriteStrategy for DirectWrite {
    fn name(&self) -> &'static str {
        "direct"
    }

    fn write(&self, path: &Path, bytes: &[u8]) -> std::io::Result<()> {
        std::fs::write(path, bytes)
    }
}

pub struct FallbackWriter {
    primary: Box<dyn WriteStrategy>,
    fallback: Box<dyn WriteStrategy>,
}

impl FallbackWriter {
    pub fn new(primary: Box<dyn WriteStrategy>, fallback: Box<dyn WriteStrategy>) -> Self {
        Self { primary, fallback }
    }

    /// Staged write through `scratch_dir`, falling back to a direct write
    pub fn staged(scratch_dir: impl Into<PathBuf>) -> Self {
        Self::new(Box::new(StagedWrite::new(scratch_dir)), Box::new(DirectWrite))
    }

    pub fn write(&self, path: &Path, bytes: &[u8]) -> WorkspaceResult<()> {
        match self.primary.write(path, bytes) {
            Ok(()) => return Ok(()),
            Err(e) => tracing::warn!(
                "{} write to {} failed, trying {}: {}",
                self.primary.name(),
                path.display(),
                self.fallback.name(),
                e
            ),
        }

        self.fallback
            .write(path, bytes)
            .map_err(|e| WorkspaceError::Write {
                path: path.to_path_buf(),
                message: e.to_string(),
            })
    }
}

impl std::fmt::Debug for FallbackWriter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FallbackWriter")
            .field("primary", &self.primary.name())
            .field("fallback", &self.fallback.name())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Error, ErrorKind};

    struct Refuse(&'static str);

    impl WriteStrategy for Refuse {
        fn name(&self) -> &'static str {
            "refuse"
        }

        fn write(&self, _path: &Path, _bytes: &[u8]) -> std::io::Result<()> {
            Err(Error::new(ErrorKind::PermissionDenied, self.0))
        }
    }

    #[test]
    fn test_staged_write_leaves_no_scratch_files() {
        let dir = tempfile::tempdir().unwrap();
        let scratch = dir.path().join("scratch");
        let target = dir.path().join("core.lipd");

        StagedWrite::new(&scratch).write(&target, b"{}").unwrap();

        assert_eq!(std::fs::read(&target).unwrap(), b"{}");
        assert_eq!(std::fs::read_dir(&scratch).unwrap().count(), 0);
    }

    #[test]
    fn test_fallback_used_when_primary_fails() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("core.lipd");

        let writer = FallbackWriter::new(Box::new(Refuse("primary")), Box::new(DirectWrite));
        writer.write(&target, b"{\"name\":\"core\"}").unwrap();

        assert_eq!(std::fs::read(&target).unwrap(), b"{\"name\":\"core\"}");
    }

    #[test]
    fn test_only_fallback_error_surfaces() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("core.lipd");

        let writer = FallbackWriter::new(Box::new(Refuse("primary")), Box::new(Refuse("fallback")));
        let err = writer.write(&target, b"{}").unwrap_err();

        match err {
            WorkspaceError::Write { path, message } => {
                assert_eq!(path, target);
                assert!(message.contains("fallback"));
                assert!(!message.contains("primary"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
