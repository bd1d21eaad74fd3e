//! # Field Schema and Type Registry
//!
//! Declares, for each [`NodeKind`], which fields it has and what kind of value
//! each field holds. The schema is plain data; construction of default
//! instances goes through a separate table of zero-argument factories keyed
//! by kind tag.
//!
//! ## Defaults
//!
//! ```text
//! String  → ""
//! Number  → 0
//! Boolean → false
//! Array   → []
//! Object  → factory output for the declared kind
//! Enum    → null
//! Any     → null
//! ```
//!
//! Factories are derived from the schemas when the registry is built, so a
//! default `Dataset` already contains a default `Location`, and so on. Kinds
//! that (directly or indirectly) contain themselves through object fields get
//! `null` at the point of recursion.

use crate::kind::NodeKind;
use crate::value::{Node, Value};
use indexmap::IndexMap;
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::Arc;

/// Kind of value a field holds
#[derive(Debug, Clone, PartialEq)]
pub enum FieldKind {
    String,
    Number,
    Boolean,
    Enum(Vec<String>),
    Array(Box<FieldKind>),
    Object(NodeKind),
    Any,
}

impl FieldKind {
    pub fn array_of(item: FieldKind) -> Self {
        FieldKind::Array(Box::new(item))
    }

    pub fn list_of(kind: NodeKind) -> Self {
        FieldKind::Array(Box::new(FieldKind::Object(kind)))
    }

    pub fn one_of(values: &[&str]) -> Self {
        FieldKind::Enum(values.iter().map(|v| v.to_string()).collect())
    }

    /// Item kind of an array field
    pub fn item(&self) -> Option<&FieldKind> {
        match self {
            FieldKind::Array(item) => Some(item),
            _ => None,
        }
    }

    /// Node kind of an object field, or of the items of an array of objects
    pub fn node_kind(&self) -> Option<NodeKind> {
        match self {
            FieldKind::Object(kind) => Some(*kind),
            FieldKind::Array(item) => item.node_kind(),
            _ => None,
        }
    }
}

/// Field declarations for one node kind
#[derive(Debug, Clone)]
pub struct NodeSchema {
    kind: NodeKind,
    fields: IndexMap<String, FieldKind>,
}

impl NodeSchema {
    pub fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            fields: IndexMap::new(),
        }
    }

    pub fn field(mut self, name: impl Into<String>, kind: FieldKind) -> Self {
        self.fields.insert(name.into(), kind);
        self
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    pub fn get(&self, name: &str) -> Option<&FieldKind> {
        self.fields.get(name)
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &FieldKind)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }
}

/// Zero-argument constructor for a node kind
pub type Factory = Arc<dyn Fn() -> Node + Send + Sync>;

/// Schemas plus one factory per kind
#[derive(Clone)]
pub struct SchemaRegistry {
    schemas: HashMap<NodeKind, NodeSchema>,
    factories: HashMap<NodeKind, Factory>,
}

impl fmt::Debug for SchemaRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut kinds: Vec<_> = self.schemas.keys().collect();
        kinds.sort();
        f.debug_struct("SchemaRegistry")
            .field("kinds", &kinds)
            .finish()
    }
}

impl SchemaRegistry {
    pub fn builder() -> SchemaRegistryBuilder {
        SchemaRegistryBuilder::default()
    }

    /// Registry with no schemas; every object it fabricates is generic
    pub fn empty() -> Self {
        Self::builder().build()
    }

    /// Registry describing the LiPD object model
    pub fn lipd() -> Self {
        crate::lipd::registry()
    }

    pub fn schema(&self, kind: NodeKind) -> Option<&NodeSchema> {
        self.schemas.get(&kind)
    }

    /// Declared kind of `name` on nodes of `kind`
    pub fn field(&self, kind: NodeKind, name: &str) -> Option<&FieldKind> {
        self.schemas.get(&kind).and_then(|schema| schema.get(name))
    }

    /// Replace the factory for a kind
    pub fn register_factory<F>(&mut self, kind: NodeKind, factory: F)
    where
        F: Fn() -> Node + Send + Sync + 'static,
    {
        self.factories.insert(kind, Arc::new(factory));
    }

    /// Fabricate a default instance of `kind`
    pub fn instantiate(&self, kind: NodeKind) -> Node {
        match self.factories.get(&kind) {
            Some(factory) => factory(),
            None => Node::new(kind),
        }
    }

    /// Default value for a slot of the given field kind
    pub fn default_value(&self, kind: &FieldKind) -> Value {
        match kind {
            FieldKind::String => Value::String(String::new()),
            FieldKind::Number => Value::Number(0.0),
            FieldKind::Boolean => Value::Bool(false),
            FieldKind::Array(_) => Value::Array(Vec::new()),
            FieldKind::Object(node_kind) => Value::Object(self.instantiate(*node_kind)),
            FieldKind::Enum(_) | FieldKind::Any => Value::Null,
        }
    }

    /// Tag untyped nodes in `value` according to `slot`, recursively.
    ///
    /// Generic nodes placed in an object slot take the slot's kind; nodes that
    /// already carry a kind keep it. Scalars are left as they are.
    pub fn conform(&self, value: Value, slot: &FieldKind) -> Value {
        match (slot, value) {
            (FieldKind::Object(kind), Value::Object(node)) => {
                Value::Object(self.conform_node(node, *kind))
            }
            (FieldKind::Array(item), Value::Array(items)) => Value::Array(
                items
                    .into_iter()
                    .map(|value| self.conform(value, item))
                    .collect(),
            ),
            (_, value) => value,
        }
    }

    fn conform_node(&self, mut node: Node, kind: NodeKind) -> Node {
        if node.kind().is_generic() {
            node.set_kind(kind);
        }

        let Some(schema) = self.schemas.get(&node.kind()) else {
            return node;
        };

        for (name, value) in node.fields_mut() {
            if let Some(field_kind) = schema.get(name) {
                let taken = std::mem::take(value);
                *value = self.conform(taken, field_kind);
            }
        }

        node
    }

    /// Build a typed tree from a decoded dictionary
    pub fn decode(&self, kind: NodeKind, json: serde_json::Value) -> Value {
        self.conform(Value::from(json), &FieldKind::Object(kind))
    }
}

impl Default for SchemaRegistry {
    fn default() -> Self {
        Self::lipd()
    }
}

#[derive(Default)]
pub struct SchemaRegistryBuilder {
    schemas: HashMap<NodeKind, NodeSchema>,
}

impl SchemaRegistryBuilder {
    pub fn schema(mut self, schema: NodeSchema) -> Self {
        self.schemas.insert(schema.kind(), schema);
        self
    }

    /// Derive a factory for every declared kind from its schema
    pub fn build(self) -> SchemaRegistry {
        let mut factories: HashMap<NodeKind, Factory> = HashMap::new();

        for kind in self.schemas.keys() {
            let template = build_template(*kind, &self.schemas, &mut HashSet::new());
            factories.insert(*kind, Arc::new(move || template.clone()));
        }

        SchemaRegistry {
            schemas: self.schemas,
            factories,
        }
    }
}

fn build_template(
    kind: NodeKind,
    schemas: &HashMap<NodeKind, NodeSchema>,
    visiting: &mut HashSet<NodeKind>,
) -> Node {
    let mut node = Node::new(kind);
    let Some(schema) = schemas.get(&kind) else {
        return node;
    };

    visiting.insert(kind);
    for (name, field_kind) in schema.fields() {
        let value = match field_kind {
            FieldKind::String => Value::String(String::new()),
            FieldKind::Number => Value::Number(0.0),
            FieldKind::Boolean => Value::Bool(false),
            FieldKind::Array(_) => Value::Array(Vec::new()),
            FieldKind::Object(child) if visiting.contains(child) => Value::Null,
            FieldKind::Object(child) => Value::Object(build_template(*child, schemas, visiting)),
            FieldKind::Enum(_) | FieldKind::Any => Value::Null,
        };
        node.insert(name, value);
    }
    visiting.remove(&kind);

    node
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn small_registry() -> SchemaRegistry {
        SchemaRegistry::builder()
            .schema(
                NodeSchema::new(NodeKind::Dataset)
                    .field("name", FieldKind::String)
                    .field("location", FieldKind::Object(NodeKind::Location))
                    .field("publications", FieldKind::list_of(NodeKind::Publication)),
            )
            .schema(
                NodeSchema::new(NodeKind::Location)
                    .field("latitude", FieldKind::Number)
                    .field("modern", FieldKind::Boolean),
            )
            .schema(
                NodeSchema::new(NodeKind::Publication)
                    .field("title", FieldKind::String)
                    .field("kind", FieldKind::one_of(&["article", "book"])),
            )
            .build()
    }

    #[test]
    fn test_instantiate_fills_defaults_recursively() {
        let registry = small_registry();
        let dataset = registry.instantiate(NodeKind::Dataset);

        assert_eq!(dataset.kind(), NodeKind::Dataset);
        assert_eq!(dataset.get("name"), Some(&Value::String(String::new())));
        assert_eq!(dataset.get("publications"), Some(&Value::Array(vec![])));

        let location = dataset.get("location").and_then(Value::as_object).unwrap();
        assert_eq!(location.kind(), NodeKind::Location);
        assert_eq!(location.get("latitude"), Some(&Value::Number(0.0)));
        assert_eq!(location.get("modern"), Some(&Value::Bool(false)));
    }

    #[test]
    fn test_enum_and_unknown_defaults_are_null() {
        let registry = small_registry();
        let publication = registry.instantiate(NodeKind::Publication);
        assert_eq!(publication.get("kind"), Some(&Value::Null));
        assert_eq!(registry.default_value(&FieldKind::Any), Value::Null);
    }

    #[test]
    fn test_unregistered_kind_instantiates_empty() {
        let registry = small_registry();
        let node = registry.instantiate(NodeKind::Variable);
        assert_eq!(node.kind(), NodeKind::Variable);
        assert!(node.is_empty());
    }

    #[test]
    fn test_registered_factory_overrides_schema_default() {
        let mut registry = small_registry();
        registry.register_factory(NodeKind::Location, || {
            Node::new(NodeKind::Location).with("latitude", 45.0)
        });

        let location = registry.instantiate(NodeKind::Location);
        assert_eq!(location.get("latitude"), Some(&Value::Number(45.0)));
        assert!(!location.contains("modern"));
    }

    #[test]
    fn test_self_referencing_schema_terminates() {
        let registry = SchemaRegistry::builder()
            .schema(
                NodeSchema::new(NodeKind::Model)
                    .field("code", FieldKind::String)
                    .field("parent", FieldKind::Object(NodeKind::Model)),
            )
            .build();

        let model = registry.instantiate(NodeKind::Model);
        assert_eq!(model.get("parent"), Some(&Value::Null));
    }

    #[test]
    fn test_decode_tags_nested_objects_from_schema() {
        let registry = small_registry();
        let decoded = registry.decode(
            NodeKind::Dataset,
            json!({
                "name": "core",
                "location": { "latitude": 12.5 },
                "publications": [{ "title": "A" }, { "title": "B" }],
                "extra": { "free": 1 }
            }),
        );

        let dataset = decoded.as_object().unwrap();
        assert_eq!(dataset.kind(), NodeKind::Dataset);
        assert_eq!(
            dataset.get("location").and_then(Value::kind),
            Some(NodeKind::Location)
        );

        let publications = dataset.get("publications").and_then(Value::as_array).unwrap();
        assert!(publications
            .iter()
            .all(|p| p.kind() == Some(NodeKind::Publication)));
        assert_eq!(
            dataset.get("extra").and_then(Value::kind),
            Some(NodeKind::Generic)
        );
    }

    #[test]
    fn test_conform_keeps_existing_tags() {
        let registry = small_registry();
        let typed = Value::Object(Node::new(NodeKind::Person).with("name", "Ada"));
        let conformed = registry.conform(typed, &FieldKind::Object(NodeKind::Publication));
        assert_eq!(conformed.kind(), Some(NodeKind::Person));
    }
}
