//! Clean Pipeline
//! Read -> fill missing -> write, one stage after another.

use crate::data::{
    CleanSummary, CsvExporter, ExporterError, FieldMapLoader, FieldMapProcessor, LoaderError,
    ProcessorError,
};
use std::path::Path;
use thiserror::Error;
use tracing::info_span;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error(transparent)]
    Load(#[from] LoaderError),
    #[error(transparent)]
    Clean(#[from] ProcessorError),
    #[error(transparent)]
    Export(#[from] ExporterError),
}

/// Clean the field map at `input` and write it to `output`.
pub fn run(input: &Path, output: &Path) -> Result<CleanSummary, PipelineError> {
    let _span = info_span!("clean", input = %input.display(), output = %output.display()).entered();

    let df = FieldMapLoader::load(input)?;
    let (mut cleaned, summary) = FieldMapProcessor::fill_missing(df)?;
    CsvExporter::export(&mut cleaned, output)?;

    Ok(summary)
}
