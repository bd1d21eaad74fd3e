//! # LiPD Model
//!
//! In-memory representation of LiPD (Linked Paleo Data) datasets.
//!
//! ```text
//! Dataset
//!  ├─ publications[]  → Publication → authors[] → Person
//!  ├─ location        → Location
//!  ├─ paleoData[]     → PaleoData ─┐
//!  └─ chronData[]     → ChronData ─┴─ measurementTables[] → DataTable
//!                                     modeledBy[]         → Model → *Tables[] → DataTable
//!                                                      DataTable → variables[] → Variable
//!                                                      Variable  → interpretations[], calibratedVias[], resolution
//! ```
//!
//! Every keyed container is a [`Node`] tagged with a [`NodeKind`]. The
//! [`SchemaRegistry`] declares each kind's fields and fabricates default
//! instances; [`DatasetIo`] reads and writes whole datasets.

mod dataset;
mod error;
mod io;
mod kind;
mod lipd;
mod schema;
mod value;

pub use dataset::{Dataset, DatasetSummary};
pub use error::{ModelError, ReadError, WriteError};
pub use io::{DatasetIo, JsonDatasetIo};
pub use kind::{NodeKind, UnknownKind};
pub use lipd::LIPD_VERSION;
pub use schema::{Factory, FieldKind, NodeSchema, SchemaRegistry, SchemaRegistryBuilder};
pub use value::{Node, Value};
