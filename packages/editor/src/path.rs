//! # Path Addressing
//!
//! Dot-separated addresses into a dataset tree, and the two operations every
//! editor view is built on: [`resolve`] and [`Mutator::set`].
//!
//! ## Syntax
//!
//! ```text
//! dataset.paleoData.0.measurementTables.1.variables.3.units
//! └─root─┘ └field──┘ └┘ └─────field───────┘ └┘ └field─┘ └┘ └field┘
//!                  index                  index        index
//! ```
//!
//! - A segment of ASCII digits without a leading zero (or `0` itself) is a
//!   position in a sequence; anything else, `007` included, is a field name.
//! - One leading root label (`dataset` by default) is stripped if present.
//! - Nested editors combine a prefix with a relative path using
//!   [`Path::with_prefix`]; the relative part is never stripped.
//!
//! ## Resolution
//!
//! Absence is an ordinary result. Walking through a missing field, an
//! out-of-range index or a scalar yields `None`.
//!
//! ## Mutation
//!
//! Missing intermediate containers are fabricated on the way down:
//!
//! - next segment is an index → empty sequence
//! - schema declares an object kind for the slot → default instance of it
//! - otherwise → plain keyed container
//!
//! Writing `None` resets the target to its schema default instead of removing
//! it. A sequence grows by at most one item per write: index `len` appends
//! the item default, anything further is [`MutationError::IndexOutOfRange`].

use lipd_model::{FieldKind, Node, SchemaRegistry, Value};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::borrow::Cow;
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Conventional first segment naming the dataset itself
pub const ROOT_LABEL: &str = "dataset";

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Segment {
    Field(String),
    Index(usize),
}

impl Segment {
    fn parse(raw: &str) -> Self {
        let canonical = raw == "0" || !raw.starts_with('0');
        if canonical && !raw.is_empty() && raw.bytes().all(|b| b.is_ascii_digit()) {
            if let Ok(index) = raw.parse() {
                return Segment::Index(index);
            }
        }
        Segment::Field(raw.to_string())
    }

    /// Field name this segment addresses on a keyed container
    pub fn key(&self) -> Cow<'_, str> {
        match self {
            Segment::Field(name) => Cow::Borrowed(name),
            Segment::Index(index) => Cow::Owned(index.to_string()),
        }
    }

    pub fn is_index(&self) -> bool {
        matches!(self, Segment::Index(_))
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Field(name) => f.write_str(name),
            Segment::Index(index) => write!(f, "{}", index),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Path {
    segments: Vec<Segment>,
}

impl Path {
    /// Path addressing the root itself
    pub fn root() -> Self {
        Self::default()
    }

    /// Parse an absolute path, stripping a leading [`ROOT_LABEL`]
    pub fn parse(raw: &str) -> Self {
        Self::parse_with_root(raw, ROOT_LABEL)
    }

    /// Parse an absolute path, stripping at most one leading `root_label`
    pub fn parse_with_root(raw: &str, root_label: &str) -> Self {
        let mut path = Self::relative(raw);
        if matches!(path.segments.first(), Some(Segment::Field(first)) if first == root_label) {
            path.segments.remove(0);
        }
        path
    }

    /// Parse a path without any root-label handling
    pub fn relative(raw: &str) -> Self {
        Self {
            segments: raw
                .split('.')
                .filter(|s| !s.is_empty())
                .map(Segment::parse)
                .collect(),
        }
    }

    /// `prefix` (absolute) followed by `relative`
    pub fn with_prefix(prefix: &str, relative: &str, root_label: &str) -> Self {
        Self::parse_with_root(prefix, root_label).join(&Self::relative(relative))
    }

    pub fn from_segments(segments: Vec<Segment>) -> Self {
        Self { segments }
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn join(&self, other: &Path) -> Path {
        let mut segments = self.segments.clone();
        segments.extend(other.segments.iter().cloned());
        Path { segments }
    }

    pub fn field(mut self, name: impl Into<String>) -> Self {
        self.segments.push(Segment::Field(name.into()));
        self
    }

    pub fn index(mut self, index: usize) -> Self {
        self.segments.push(Segment::Index(index));
        self
    }

    pub fn parent(&self) -> Option<Path> {
        let (_, parent) = self.segments.split_last()?;
        Some(Path {
            segments: parent.to_vec(),
        })
    }

    pub fn last(&self) -> Option<&Segment> {
        self.segments.last()
    }

    /// Path made of the first `len` segments
    pub fn truncated(&self, len: usize) -> Path {
        Path {
            segments: self.segments[..len.min(self.segments.len())].to_vec(),
        }
    }
}

impl FromStr for Path {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Path::parse(s))
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            write!(f, "{}", segment)?;
        }
        Ok(())
    }
}

impl Serialize for Path {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Path {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Path::parse(&raw))
    }
}

/// Value at `path`, or `None` if any segment along the way is absent
pub fn resolve<'a>(root: &'a Value, path: &Path) -> Option<&'a Value> {
    path.segments()
        .iter()
        .try_fold(root, |current, segment| child(current, segment))
}

pub(crate) fn child<'a>(value: &'a Value, segment: &Segment) -> Option<&'a Value> {
    match (value, segment) {
        (Value::Object(node), segment) => node.get(&segment.key()),
        (Value::Array(items), Segment::Index(index)) => items.get(*index),
        _ => None,
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MutationError {
    #[error("Cannot address sequence at '{path}' by field name '{field}'")]
    FieldOnSequence { path: String, field: String },

    #[error("Index {index} is past the end of '{path}' ({len} items)")]
    IndexOutOfRange { path: String, index: usize, len: usize },
}

/// Writes values at paths, fabricating missing containers from the schema
#[derive(Debug, Clone, Copy)]
pub struct Mutator<'r> {
    registry: &'r SchemaRegistry,
}

impl<'r> Mutator<'r> {
    pub fn new(registry: &'r SchemaRegistry) -> Self {
        Self { registry }
    }

    /// Consume `root`, write `value` at `path` and return the result
    pub fn mutate(&self, mut root: Value, path: &Path, value: Option<Value>) -> Result<Value, MutationError> {
        self.set(&mut root, path, value)?;
        Ok(root)
    }

    /// Write `value` at `path`. `None` resets the target to its default.
    pub fn set(&self, root: &mut Value, path: &Path, value: Option<Value>) -> Result<(), MutationError> {
        let root_slot = root
            .kind()
            .filter(|kind| !kind.is_generic())
            .map(FieldKind::Object);

        let Some((last, parents)) = path.segments().split_last() else {
            *root = self.fill(value, root_slot.as_ref());
            return Ok(());
        };

        let mut current = root;
        let mut slot = root_slot;

        for (depth, segment) in parents.iter().enumerate() {
            self.ensure_container(current, segment, slot.as_ref());
            let child_slot = self.child_slot(current, slot.as_ref(), segment);
            current = self.entry(current, path, depth, child_slot.as_ref())?;
            slot = child_slot;
        }

        self.ensure_container(current, last, slot.as_ref());
        let child_slot = self.child_slot(current, slot.as_ref(), last);
        let filled = self.fill(value, child_slot.as_ref());
        let target = self.entry(current, path, parents.len(), child_slot.as_ref())?;
        *target = filled;

        Ok(())
    }

    fn ensure_container(&self, value: &mut Value, next: &Segment, slot: Option<&FieldKind>) {
        if value.is_container() {
            return;
        }

        *value = match next {
            Segment::Index(_) => Value::Array(Vec::new()),
            Segment::Field(_) => match slot {
                Some(FieldKind::Object(kind)) => Value::Object(self.registry.instantiate(*kind)),
                _ => Value::Object(Node::generic()),
            },
        };
    }

    fn child_slot(&self, container: &Value, slot: Option<&FieldKind>, segment: &Segment) -> Option<FieldKind> {
        match container {
            Value::Object(node) => self.registry.field(node.kind(), &segment.key()).cloned(),
            Value::Array(_) => slot.and_then(FieldKind::item).cloned(),
            _ => None,
        }
    }

    /// Child addressed by `path[depth]`, appending to a sequence when the
    /// index is exactly its length
    fn entry<'v>(
        &self,
        container: &'v mut Value,
        path: &Path,
        depth: usize,
        slot: Option<&FieldKind>,
    ) -> Result<&'v mut Value, MutationError> {
        let segment = &path.segments()[depth];
        match container {
            Value::Object(node) => Ok(node.entry(&segment.key())),
            Value::Array(items) => match *segment {
                Segment::Index(index) if index < items.len() => Ok(&mut items[index]),
                Segment::Index(index) if index == items.len() => {
                    items.push(self.default_for(slot));
                    Ok(&mut items[index])
                }
                Segment::Index(index) => Err(MutationError::IndexOutOfRange {
                    path: path.truncated(depth).to_string(),
                    index,
                    len: items.len(),
                }),
                Segment::Field(_) => Err(conflict(path, depth, segment)),
            },
            _ => Err(conflict(path, depth, segment)),
        }
    }

    fn default_for(&self, slot: Option<&FieldKind>) -> Value {
        slot.map(|kind| self.registry.default_value(kind))
            .unwrap_or(Value::Null)
    }

    fn fill(&self, value: Option<Value>, slot: Option<&FieldKind>) -> Value {
        match (value, slot) {
            (Some(value), Some(kind)) => self.registry.conform(value, kind),
            (Some(value), None) => value,
            (None, slot) => self.default_for(slot),
        }
    }
}

fn conflict(path: &Path, depth: usize, segment: &Segment) -> MutationError {
    MutationError::FieldOnSequence {
        path: path.truncated(depth).to_string(),
        field: segment.to_string(),
    }
}
