//! # Dataset
//!
//! Root of a LiPD object tree. A dataset is an owned value: cloning it makes
//! an independent copy, which is what lets edit history keep snapshots that
//! later edits cannot reach.

use crate::error::ModelError;
use crate::kind::NodeKind;
use crate::schema::SchemaRegistry;
use crate::value::{Node, Value};
use serde::{Serialize, Serializer};

#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    root: Value,
}

/// Counts of the main collections in a dataset
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DatasetSummary {
    pub publications: usize,
    pub paleo_data: usize,
    pub chron_data: usize,
    pub tables: usize,
    pub variables: usize,
}

impl Dataset {
    pub const NAME_FIELD: &'static str = "name";

    pub fn new(root: Node) -> Self {
        Self {
            root: Value::Object(root),
        }
    }

    /// Fresh dataset from the registry's factory, with the given name
    pub fn empty(registry: &SchemaRegistry, name: &str) -> Self {
        let mut root = registry.instantiate(NodeKind::Dataset);
        root.insert(Self::NAME_FIELD, Value::String(name.to_string()));
        Self::new(root)
    }

    /// Typed dataset from a decoded dictionary
    pub fn from_json(registry: &SchemaRegistry, json: serde_json::Value) -> Result<Self, ModelError> {
        if !json.is_object() {
            return Err(ModelError::NotAnObject(Value::from(json).type_name()));
        }

        Ok(Self {
            root: registry.decode(NodeKind::Dataset, json),
        })
    }

    pub fn parse(registry: &SchemaRegistry, source: &str) -> Result<Self, ModelError> {
        let json: serde_json::Value = serde_json::from_str(source)?;
        Self::from_json(registry, json)
    }

    pub fn to_json(&self) -> serde_json::Value {
        self.root.to_json()
    }

    pub fn name(&self) -> Option<&str> {
        self.root
            .as_object()
            .and_then(|root| root.str_field(Self::NAME_FIELD))
    }

    pub fn root(&self) -> &Value {
        &self.root
    }

    pub fn root_mut(&mut self) -> &mut Value {
        &mut self.root
    }

    pub fn into_root(self) -> Value {
        self.root
    }

    pub fn summary(&self) -> DatasetSummary {
        let mut summary = DatasetSummary::default();
        let Some(root) = self.root.as_object() else {
            return summary;
        };

        summary.publications = list(root, "publications").len();

        for (field, count) in [
            ("paleoData", &mut summary.paleo_data),
            ("chronData", &mut summary.chron_data),
        ] {
            let entries = list(root, field);
            *count = entries.len();

            for entry in entries.iter().filter_map(Value::as_object) {
                for table in list(entry, "measurementTables")
                    .iter()
                    .filter_map(Value::as_object)
                {
                    summary.tables += 1;
                    summary.variables += list(table, "variables").len();
                }
            }
        }

        summary
    }
}

fn list<'a>(node: &'a Node, field: &str) -> &'a [Value] {
    node.get(field)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

impl From<Value> for Dataset {
    fn from(root: Value) -> Self {
        Self { root }
    }
}

impl Serialize for Dataset {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.root.serialize(serializer)
    }
}
