//! Data module - field map loading, cleaning and export

mod exporter;
mod loader;
mod processor;

pub use exporter::{CsvExporter, ExporterError};
pub use loader::{FieldMapLoader, LoaderError};
pub use processor::{CleanSummary, FieldMapProcessor, ProcessorError};

/// Column names of a field map sample, in file order.
pub const FIELD_COLUMNS: [&str; 6] = ["x", "y", "z", "Bx", "By", "Bz"];
