//! Field Map Processor Module
//! Replaces missing samples with a constant fill value.

use super::FIELD_COLUMNS;
use polars::prelude::*;
use serde::Serialize;
use std::collections::BTreeMap;
use thiserror::Error;
use tracing::{info, warn};

/// Value written in place of every missing cell.
pub const FILL_VALUE: f64 = 0.0;

#[derive(Error, Debug)]
pub enum ProcessorError {
    #[error("Polars error: {0}")]
    PolarsError(#[from] PolarsError),
    #[error("Expected columns {expected:?}, found {found:?}")]
    UnexpectedColumns {
        expected: Vec<String>,
        found: Vec<String>,
    },
}

/// Outcome of a cleaning pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CleanSummary {
    /// Number of sample rows in the table.
    pub rows: usize,
    /// Cells replaced with the fill value, per column.
    pub filled: BTreeMap<String, usize>,
}

impl CleanSummary {
    /// Total number of cells replaced across all columns.
    pub fn total_filled(&self) -> usize {
        self.filled.values().sum()
    }
}

/// Handles missing-value cleanup for field map tables.
pub struct FieldMapProcessor;

impl FieldMapProcessor {
    /// Replace every null cell with [`FILL_VALUE`].
    ///
    /// Non-missing values, row order and column order pass through unchanged.
    pub fn fill_missing(df: DataFrame) -> Result<(DataFrame, CleanSummary), ProcessorError> {
        Self::check_columns(&df)?;

        let filled: BTreeMap<String, usize> = df
            .get_columns()
            .iter()
            .map(|col| (col.name().to_string(), col.null_count()))
            .collect();

        let summary = CleanSummary {
            rows: df.height(),
            filled,
        };

        let cleaned = df.lazy().fill_null(lit(FILL_VALUE)).collect()?;

        if summary.total_filled() > 0 {
            warn!(
                total = summary.total_filled(),
                per_column = ?summary.filled,
                "filled missing cells"
            );
        }
        info!(rows = summary.rows, "cleaned field map");

        Ok((cleaned, summary))
    }

    /// Ensure the frame carries exactly the six field map columns, in order.
    fn check_columns(df: &DataFrame) -> Result<(), ProcessorError> {
        let found: Vec<String> = df
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect();

        if found.iter().map(String::as_str).eq(FIELD_COLUMNS) {
            Ok(())
        } else {
            Err(ProcessorError::UnexpectedColumns {
                expected: FIELD_COLUMNS.iter().map(|s| s.to_string()).collect(),
                found,
            })
        }
    }
}
