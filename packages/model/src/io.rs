//! # Dataset Reading and Writing
//!
//! [`DatasetIo`] is the seam between the editor and the file format. The
//! editor never parses files itself; it asks an implementation to read a
//! whole dataset or to encode one. Getting the bytes onto disk is the
//! caller's business.
//!
//! [`JsonDatasetIo`] stores the dataset metadata as a JSON document.

use crate::dataset::Dataset;
use crate::error::{ReadError, WriteError};
use crate::schema::SchemaRegistry;
use std::io::ErrorKind;
use std::path::Path;
use std::sync::Arc;

pub trait DatasetIo: Send + Sync {
    fn read(&self, path: &Path) -> Result<Dataset, ReadError>;

    /// Serialized form of a dataset, as [`DatasetIo::read`] expects it
    fn encode(&self, dataset: &Dataset) -> Result<Vec<u8>, WriteError>;
}

/// JSON metadata files
#[derive(Debug, Clone)]
pub struct JsonDatasetIo {
    registry: Arc<SchemaRegistry>,
    pretty: bool,
}

impl JsonDatasetIo {
    pub fn new(registry: Arc<SchemaRegistry>) -> Self {
        Self {
            registry,
            pretty: true,
        }
    }

    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    pub fn registry(&self) -> &SchemaRegistry {
        &self.registry
    }
}

impl DatasetIo for JsonDatasetIo {
    fn read(&self, path: &Path) -> Result<Dataset, ReadError> {
        let source = std::fs::read_to_string(path).map_err(|source| match source.kind() {
            ErrorKind::NotFound => ReadError::NotFound(path.to_path_buf()),
            ErrorKind::InvalidData => ReadError::Parse {
                path: path.to_path_buf(),
                message: source.to_string(),
            },
            _ => ReadError::Io {
                path: path.to_path_buf(),
                source,
            },
        })?;

        if source.trim().is_empty() {
            return Err(ReadError::Empty(path.to_path_buf()));
        }

        let dataset = Dataset::parse(&self.registry, &source).map_err(|e| ReadError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        tracing::debug!("Read dataset {:?} from {}", dataset.name(), path.display());
        Ok(dataset)
    }

    fn encode(&self, dataset: &Dataset) -> Result<Vec<u8>, WriteError> {
        let mut bytes = if self.pretty {
            serde_json::to_vec_pretty(dataset)?
        } else {
            serde_json::to_vec(dataset)?
        };
        bytes.push(b'\n');
        Ok(bytes)
    }
}
