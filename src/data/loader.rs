//! Field Map Loader Module
//! Parses whitespace-delimited field map samples into a Polars DataFrame.

use super::FIELD_COLUMNS;
use polars::prelude::*;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

/// Marks the start of a comment; the rest of the line is ignored.
const COMMENT_CHAR: char = '%';

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Input file not found: {}", .path.display())]
    FileNotFound { path: PathBuf },
    #[error("Malformed input on line {line}: expected {} fields, found {found}", FIELD_COLUMNS.len())]
    InputFormat { line: usize, found: usize },
    #[error("Failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Failed to build table: {0}")]
    Polars(#[from] PolarsError),
}

/// Loads field map text files (`x y z Bx By Bz` per line, `%` comments).
pub struct FieldMapLoader;

impl FieldMapLoader {
    /// Load a field map file into a six-column Float64 DataFrame.
    ///
    /// Cells that do not parse as a number (or parse to NaN) are left null.
    pub fn load(path: &Path) -> Result<DataFrame, LoaderError> {
        let file = File::open(path).map_err(|source| match source.kind() {
            io::ErrorKind::NotFound => LoaderError::FileNotFound {
                path: path.to_path_buf(),
            },
            _ => LoaderError::Read {
                path: path.to_path_buf(),
                source,
            },
        })?;

        let df = Self::from_reader(BufReader::new(file)).map_err(|err| match err {
            LoaderError::Read { source, .. } => LoaderError::Read {
                path: path.to_path_buf(),
                source,
            },
            other => other,
        })?;

        info!(path = %path.display(), rows = df.height(), "loaded field map");
        Ok(df)
    }

    /// Parse field map text from any buffered reader.
    pub fn from_reader<R: BufRead>(reader: R) -> Result<DataFrame, LoaderError> {
        let mut columns: [Vec<Option<f64>>; 6] = Default::default();
        let mut skipped = 0usize;

        for (idx, line) in reader.lines().enumerate() {
            let line = line.map_err(|source| LoaderError::Read {
                path: PathBuf::new(),
                source,
            })?;

            let Some(cells) = Self::parse_line(&line, idx + 1)? else {
                skipped += 1;
                continue;
            };

            for (column, cell) in columns.iter_mut().zip(cells) {
                column.push(cell);
            }
        }

        debug!(skipped, "skipped comment and blank lines");

        let columns = FIELD_COLUMNS
            .iter()
            .zip(columns)
            .map(|(name, values)| Column::new((*name).into(), values))
            .collect();

        Ok(DataFrame::new(columns)?)
    }

    /// Split one physical line into six cells.
    ///
    /// Returns `Ok(None)` for comment and blank lines.
    fn parse_line(line: &str, line_no: usize) -> Result<Option<[Option<f64>; 6]>, LoaderError> {
        let content = match line.find(COMMENT_CHAR) {
            Some(pos) => &line[..pos],
            None => line,
        };

        let tokens: Vec<&str> = content.split_whitespace().collect();
        if tokens.is_empty() {
            return Ok(None);
        }
        if tokens.len() != FIELD_COLUMNS.len() {
            return Err(LoaderError::InputFormat {
                line: line_no,
                found: tokens.len(),
            });
        }

        let mut cells = [None; 6];
        for (cell, token) in cells.iter_mut().zip(&tokens) {
            *cell = parse_cell(token);
        }
        Ok(Some(cells))
    }
}

/// Parse a single token, mapping anything unparseable or NaN to missing.
fn parse_cell(token: &str) -> Option<f64> {
    token.parse::<f64>().ok().filter(|v| !v.is_nan())
}
