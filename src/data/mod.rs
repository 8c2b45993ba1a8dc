//! Data module - CSV loading and dataset schema

mod loader;
mod record;
mod summary;

pub use loader::{DataLoader, LoaderError};
pub use record::{Record, XField, YField, LABEL_COLUMN, NUMERIC_COLUMNS};
pub use summary::{DatasetSummary, FieldSummary};
