//! Export projections of the catalog.

pub mod csv;

pub use csv::{to_csv, CSV_FILE_NAME, CSV_MIME_TYPE};
