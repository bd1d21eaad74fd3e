//! Breadcrumb trails for tree navigation.

use crate::path::{child, resolve, Path, Segment};
use lipd_model::{Node, NodeKind, Value};
use serde::Serialize;

/// One step of a breadcrumb trail
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Breadcrumb {
    pub path: Path,
    pub label: String,
    pub kind: Option<NodeKind>,
}

/// Fields tried, in order, when naming a node
const NAME_FIELDS: [&str; 4] = ["name", "title", "siteName", "fileName"];

/// Label every prefix of `path` that resolves under `root`.
///
/// The trail starts with the root and stops at the first segment that does
/// not resolve.
pub fn breadcrumbs(root: &Value, path: &Path) -> Vec<Breadcrumb> {
    let mut trail = vec![Breadcrumb {
        path: Path::root(),
        label: root_label(root),
        kind: root.kind(),
    }];

    let mut current = root;
    for (depth, segment) in path.segments().iter().enumerate() {
        let prefix = path.truncated(depth + 1);
        let Some(value) = child(current, segment) else {
            break;
        };

        trail.push(Breadcrumb {
            label: label_for(value, segment),
            kind: value.kind(),
            path: prefix,
        });
        current = value;
    }

    trail
}

/// Kind tag of the object at `path`, used to pick an editor view
pub fn kind_at(root: &Value, path: &Path) -> Option<NodeKind> {
    resolve(root, path).and_then(Value::kind)
}

fn root_label(root: &Value) -> String {
    root.as_object()
        .and_then(display_name)
        .map(str::to_string)
        .unwrap_or_else(|| NodeKind::Dataset.label().to_string())
}

fn label_for(value: &Value, segment: &Segment) -> String {
    if let Some(name) = value.as_object().and_then(display_name) {
        return name.to_string();
    }

    match (value, segment) {
        (Value::Object(node), Segment::Index(index)) if !node.kind().is_generic() => {
            format!("{} {}", node.kind().label(), index + 1)
        }
        (_, Segment::Index(index)) => format!("#{}", index + 1),
        (_, Segment::Field(name)) => humanize(name),
    }
}

fn display_name(node: &Node) -> Option<&str> {
    NAME_FIELDS
        .iter()
        .filter_map(|field| node.str_field(field))
        .find(|name| !name.trim().is_empty())
}

/// `measurementTables` → `Measurement Tables`
pub fn humanize(field: &str) -> String {
    let mut out = String::with_capacity(field.len() + 4);
    for (i, ch) in field.chars().enumerate() {
        if i == 0 {
            out.extend(ch.to_uppercase());
        } else if ch.is_uppercase() {
            out.push(' ');
            out.push(ch);
        } else if ch == '_' {
            out.push(' ');
        } else {
            out.push(ch);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use lipd_model::{Dataset, SchemaRegistry};
    use serde_json::json;

    fn sample() -> Value {
        let registry = SchemaRegistry::lipd();
        Dataset::from_json(
            &registry,
            json!({
                "name": "ODP1098B",
                "paleoData": [{
                    "measurementTables": [
                        { "name": "" },
                        { "name": "", "variables": [{ "name": "d18O" }] }
                    ]
                }]
            }),
        )
        .unwrap()
        .into_root()
    }

    #[test]
    fn test_trail_names_nodes_and_collections() {
        let root = sample();
        let trail = breadcrumbs(
            &root,
            &Path::parse("dataset.paleoData.0.measurementTables.1.variables.0"),
        );

        let labels: Vec<_> = trail.iter().map(|c| c.label.as_str()).collect();
        assert_eq!(
            labels,
            vec![
                "ODP1098B",
                "Paleo Data",
                "Paleo Data 1",
                "Measurement Tables",
                "Data Table 2",
                "Variables",
                "d18O",
            ]
        );
        assert_eq!(trail[6].kind, Some(NodeKind::Variable));
        assert_eq!(trail[6].path.to_string(), "paleoData.0.measurementTables.1.variables.0");
    }

    #[test]
    fn test_trail_stops_at_first_missing_segment() {
        let root = sample();
        let trail = breadcrumbs(&root, &Path::parse("paleoData.3.measurementTables"));
        assert_eq!(trail.len(), 2);
        assert_eq!(trail[1].label, "Paleo Data");
    }

    #[test]
    fn test_kind_at_dispatches_on_tag() {
        let root = sample();
        assert_eq!(kind_at(&root, &Path::root()), Some(NodeKind::Dataset));
        assert_eq!(
            kind_at(&root, &Path::parse("paleoData.0.measurementTables.0")),
            Some(NodeKind::DataTable)
        );
        assert_eq!(kind_at(&root, &Path::parse("name")), None);
    }

    #[test]
    fn test_humanize() {
        assert_eq!(humanize("paleoData"), "Paleo Data");
        assert_eq!(humanize("calibratedVias"), "Calibrated Vias");
        assert_eq!(humanize("doi"), "Doi");
    }
}
