//! Node kind tags.
//!
//! Every object in a dataset tree carries one of these tags, assigned when the
//! node is constructed (from a schema factory or by conforming a decoded
//! dictionary). Editors and navigation dispatch on the tag.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NodeKind {
    Dataset,
    Publication,
    Person,
    Funding,
    Location,
    PaleoData,
    ChronData,
    Model,
    DataTable,
    Variable,
    Interpretation,
    Calibration,
    Resolution,
    ChangeLog,
    /// Plain keyed container with no schema
    Generic,
}

impl NodeKind {
    pub const ALL: [NodeKind; 15] = [
        NodeKind::Dataset,
        NodeKind::Publication,
        NodeKind::Person,
        NodeKind::Funding,
        NodeKind::Location,
        NodeKind::PaleoData,
        NodeKind::ChronData,
        NodeKind::Model,
        NodeKind::DataTable,
        NodeKind::Variable,
        NodeKind::Interpretation,
        NodeKind::Calibration,
        NodeKind::Resolution,
        NodeKind::ChangeLog,
        NodeKind::Generic,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            NodeKind::Dataset => "dataset",
            NodeKind::Publication => "publication",
            NodeKind::Person => "person",
            NodeKind::Funding => "funding",
            NodeKind::Location => "location",
            NodeKind::PaleoData => "paleoData",
            NodeKind::ChronData => "chronData",
            NodeKind::Model => "model",
            NodeKind::DataTable => "dataTable",
            NodeKind::Variable => "variable",
            NodeKind::Interpretation => "interpretation",
            NodeKind::Calibration => "calibration",
            NodeKind::Resolution => "resolution",
            NodeKind::ChangeLog => "changeLog",
            NodeKind::Generic => "object",
        }
    }

    /// Human-readable name used in breadcrumbs and list labels
    pub fn label(&self) -> &'static str {
        match self {
            NodeKind::Dataset => "Dataset",
            NodeKind::Publication => "Publication",
            NodeKind::Person => "Person",
            NodeKind::Funding => "Funding",
            NodeKind::Location => "Location",
            NodeKind::PaleoData => "Paleo Data",
            NodeKind::ChronData => "Chron Data",
            NodeKind::Model => "Model",
            NodeKind::DataTable => "Data Table",
            NodeKind::Variable => "Variable",
            NodeKind::Interpretation => "Interpretation",
            NodeKind::Calibration => "Calibration",
            NodeKind::Resolution => "Resolution",
            NodeKind::ChangeLog => "Change Log",
            NodeKind::Generic => "Object",
        }
    }

    pub fn is_generic(&self) -> bool {
        matches!(self, NodeKind::Generic)
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown node kind: {0}")]
pub struct UnknownKind(pub String);

impl FromStr for NodeKind {
    type Err = UnknownKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NodeKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| UnknownKind(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_names_round_trip_through_from_str() {
        for kind in NodeKind::ALL {
            assert_eq!(kind.as_str().parse::<NodeKind>(), Ok(kind));
        }
    }

    #[test]
    fn test_unknown_kind_is_rejected() {
        assert_eq!(
            "spreadsheet".parse::<NodeKind>(),
            Err(UnknownKind("spreadsheet".to_string()))
        );
    }
}
