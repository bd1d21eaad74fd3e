//! LiPD object model schemas.

use crate::kind::NodeKind;
use crate::schema::{FieldKind, NodeSchema, SchemaRegistry};
use crate::value::Value;

/// Version stamped on newly created datasets
pub const LIPD_VERSION: f64 = 1.3;

pub(crate) fn registry() -> SchemaRegistry {
    use FieldKind::{Any, Boolean, Number, Object, String};

    let mut registry = SchemaRegistry::builder()
        .schema(
            NodeSchema::new(NodeKind::Dataset)
                .field("name", String)
                .field("datasetId", String)
                .field("version", String)
                .field("lipdVersion", Number)
                .field("archiveType", String)
                .field("originalDataUrl", String)
                .field("collectionName", String)
                .field("notes", String)
                .field("location", Object(NodeKind::Location))
                .field("investigators", FieldKind::list_of(NodeKind::Person))
                .field("creators", FieldKind::list_of(NodeKind::Person))
                .field("fundings", FieldKind::list_of(NodeKind::Funding))
                .field("publications", FieldKind::list_of(NodeKind::Publication))
                .field("paleoData", FieldKind::list_of(NodeKind::PaleoData))
                .field("chronData", FieldKind::list_of(NodeKind::ChronData))
                .field("changeLogs", FieldKind::list_of(NodeKind::ChangeLog)),
        )
        .schema(
            NodeSchema::new(NodeKind::Publication)
                .field("title", String)
                .field("authors", FieldKind::list_of(NodeKind::Person))
                .field("journal", String)
                .field("year", Number)
                .field("volume", String)
                .field("issue", String)
                .field("pages", String)
                .field("publisher", String)
                .field("doi", String)
                .field("citeKey", String)
                .field("abstract", String)
                .field("dataUrls", FieldKind::array_of(String))
                .field(
                    "type",
                    FieldKind::one_of(&["article", "book", "chapter", "dataset", "report", "thesis"]),
                ),
        )
        .schema(
            NodeSchema::new(NodeKind::Person)
                .field("name", String)
                .field("email", String)
                .field("orcid", String),
        )
        .schema(
            NodeSchema::new(NodeKind::Funding)
                .field("fundingAgency", String)
                .field("fundingCountry", String)
                .field("grants", FieldKind::array_of(String))
                .field("investigators", FieldKind::list_of(NodeKind::Person)),
        )
        .schema(
            NodeSchema::new(NodeKind::Location)
                .field("siteName", String)
                .field("latitude", Number)
                .field("longitude", Number)
                .field("elevation", Number)
                .field("country", String)
                .field("continent", String)
                .field("ocean", String)
                .field("description", String),
        )
        .schema(
            NodeSchema::new(NodeKind::PaleoData)
                .field("name", String)
                .field("measurementTables", FieldKind::list_of(NodeKind::DataTable))
                .field("modeledBy", FieldKind::list_of(NodeKind::Model)),
        )
        .schema(
            NodeSchema::new(NodeKind::ChronData)
                .field("measurementTables", FieldKind::list_of(NodeKind::DataTable))
                .field("modeledBy", FieldKind::list_of(NodeKind::Model)),
        )
        .schema(
            NodeSchema::new(NodeKind::Model)
                .field("code", String)
                .field("summaryTables", FieldKind::list_of(NodeKind::DataTable))
                .field("ensembleTables", FieldKind::list_of(NodeKind::DataTable))
                .field("distributionTables", FieldKind::list_of(NodeKind::DataTable)),
        )
        .schema(
            NodeSchema::new(NodeKind::DataTable)
                .field("name", String)
                .field("fileName", String)
                .field("missingValue", String)
                .field("variables", FieldKind::list_of(NodeKind::Variable)),
        )
        .schema(
            NodeSchema::new(NodeKind::Variable)
                .field("name", String)
                .field("variableId", String)
                .field("variableType", FieldKind::one_of(&["measured", "inferred"]))
                .field("units", String)
                .field("description", String)
                .field("proxy", String)
                .field("archiveType", String)
                .field("number", Number)
                .field("primary", Boolean)
                .field("missingValue", String)
                .field("notes", String)
                .field("values", FieldKind::array_of(Any))
                .field("resolution", Object(NodeKind::Resolution))
                .field("interpretations", FieldKind::list_of(NodeKind::Interpretation))
                .field("calibratedVias", FieldKind::list_of(NodeKind::Calibration)),
        )
        .schema(
            NodeSchema::new(NodeKind::Interpretation)
                .field("variable", String)
                .field("variableDetail", String)
                .field("seasonality", String)
                .field("basis", String)
                .field("direction", FieldKind::one_of(&["positive", "negative"]))
                .field(
                    "scope",
                    FieldKind::one_of(&["climate", "isotope", "ecology", "chronology"]),
                )
                .field("rank", Number)
                .field("local", Boolean)
                .field("notes", String),
        )
        .schema(
            NodeSchema::new(NodeKind::Calibration)
                .field("method", String)
                .field("equation", String)
                .field("target", String)
                .field("seasonality", String)
                .field("uncertainty", Number)
                .field("dependencies", FieldKind::array_of(String))
                .field("notes", String),
        )
        .schema(
            NodeSchema::new(NodeKind::Resolution)
                .field("units", String)
                .field("minValue", Number)
                .field("maxValue", Number)
                .field("meanValue", Number)
                .field("medianValue", Number),
        )
        .schema(
            NodeSchema::new(NodeKind::ChangeLog)
                .field("version", String)
                .field("curator", String)
                .field("timestamp", String)
                .field("notes", String)
                .field("changes", FieldKind::array_of(Any)),
        )
        .build();

    let mut dataset = registry.instantiate(NodeKind::Dataset);
    dataset.insert("lipdVersion", Value::Number(LIPD_VERSION));
    registry.register_factory(NodeKind::Dataset, move || dataset.clone());

    registry
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_object_field_points_at_a_declared_kind() {
        let registry = SchemaRegistry::lipd();
        for kind in NodeKind::ALL {
            let Some(schema) = registry.schema(kind) else {
                continue;
            };
            for (name, field) in schema.fields() {
                if let Some(child) = field.node_kind() {
                    assert!(
                        registry.schema(child).is_some(),
                        "{}.{} refers to undeclared kind {}",
                        kind,
                        name,
                        child
                    );
                }
            }
        }
    }

    #[test]
    fn test_new_dataset_is_stamped_with_lipd_version() {
        let registry = SchemaRegistry::lipd();
        let dataset = registry.instantiate(NodeKind::Dataset);
        assert_eq!(dataset.get("lipdVersion"), Some(&Value::Number(LIPD_VERSION)));
        assert_eq!(
            dataset.get("location").and_then(Value::kind),
            Some(NodeKind::Location)
        );
    }
}
