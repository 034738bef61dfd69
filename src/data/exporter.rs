//! CSV Exporter Module
//! Writes cleaned field map tables as headerless comma-separated values.

use polars::prelude::*;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum ExporterError {
    #[error("Cannot open {} for writing: {source}", .path.display())]
    Create {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Failed writing {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: PolarsError,
    },
    #[error("Refusing to write {}: {count} cells are still missing", .path.display())]
    UnfilledCells { path: PathBuf, count: usize },
}

/// Serializes DataFrames to CSV files.
pub struct CsvExporter;

impl CsvExporter {
    /// Write `df` to `path` as `x,y,z,Bx,By,Bz` rows, no header.
    ///
    /// The destination is created or truncated.
    pub fn export(df: &mut DataFrame, path: &Path) -> Result<(), ExporterError> {
        let missing: usize = df.get_columns().iter().map(|c| c.null_count()).sum();
        if missing > 0 {
            return Err(ExporterError::UnfilledCells {
                path: path.to_path_buf(),
                count: missing,
            });
        }

        let file = File::create(path).map_err(|source| ExporterError::Create {
            path: path.to_path_buf(),
            source,
        })?;
        let mut writer = BufWriter::new(file);

        Self::write_csv(df, &mut writer)
            .and_then(|_| writer.flush().map_err(PolarsError::from))
            .map_err(|source| ExporterError::Write {
                path: path.to_path_buf(),
                source,
            })?;

        info!(path = %path.display(), rows = df.height(), "wrote cleaned field map");
        Ok(())
    }

    /// Serialize `df` to any writer.
    pub fn write_csv<W: Write>(df: &mut DataFrame, writer: W) -> PolarsResult<()> {
        CsvWriter::new(writer)
            .include_header(false)
            .with_separator(b',')
            .finish(df)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::FIELD_COLUMNS;

    fn frame(rows: &[[Option<f64>; 6]]) -> DataFrame {
        let columns = FIELD_COLUMNS
            .iter()
            .enumerate()
            .map(|(i, name)| {
                let values: Vec<Option<f64>> = rows.iter().map(|r| r[i]).collect();
                Column::new((*name).into(), values)
            })
            .collect();
        DataFrame::new(columns).unwrap()
    }

    fn parse_rows(text: &str) -> Vec<Vec<f64>> {
        text.lines()
            .map(|line| line.split(',').map(|f| f.parse::<f64>().unwrap()).collect())
            .collect()
    }

    #[test]
    fn writes_headerless_rows_in_order() {
        let mut df = frame(&[
            [Some(1.0), Some(2.0), Some(0.0), Some(4.0), Some(5.0), Some(6.0)],
            [Some(-0.5), Some(1e-7), Some(12345.678), Some(0.1), Some(0.2), Some(0.3)],
        ]);

        let mut buf = Vec::new();
        CsvExporter::write_csv(&mut df, &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();

        assert_eq!(text.lines().count(), 2);
        assert!(text.lines().all(|l| l.split(',').count() == 6));
        assert!(!text.contains('x'));
        assert_eq!(
            parse_rows(&text),
            vec![
                vec![1.0, 2.0, 0.0, 4.0, 5.0, 6.0],
                vec![-0.5, 1e-7, 12345.678, 0.1, 0.2, 0.3],
            ]
        );
    }

    #[test]
    fn preserves_full_precision() {
        let value = 0.1234567890123456_f64;
        let mut df = frame(&[[Some(value), Some(1.0 / 3.0), Some(0.0), Some(0.0), Some(0.0), Some(0.0)]]);

        let mut buf = Vec::new();
        CsvExporter::write_csv(&mut df, &mut buf).unwrap();
        let rows = parse_rows(&String::from_utf8(buf).unwrap());

        assert_eq!(rows[0][0], value);
        assert_eq!(rows[0][1], 1.0 / 3.0);
    }

    #[test]
    fn export_creates_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.txt");
        let mut df = frame(&[[Some(1.0), Some(2.0), Some(3.0), Some(4.0), Some(5.0), Some(6.0)]]);

        CsvExporter::export(&mut df, &path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(parse_rows(&text), vec![vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]]);
    }

    #[test]
    fn export_overwrites_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.txt");
        std::fs::write(&path, "stale\nstale\nstale\n").unwrap();
        let mut df = frame(&[[Some(1.0), Some(1.0), Some(1.0), Some(1.0), Some(1.0), Some(1.0)]]);

        CsvExporter::export(&mut df, &path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text.lines().count(), 1);
        assert!(!text.contains("stale"));
    }

    #[test]
    fn unwritable_destination_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("no_such_dir").join("out.txt");
        let mut df = frame(&[[Some(1.0), Some(2.0), Some(3.0), Some(4.0), Some(5.0), Some(6.0)]]);

        let err = CsvExporter::export(&mut df, &path).unwrap_err();
        assert!(matches!(err, ExporterError::Create { .. }));
        assert!(err.to_string().contains("no_such_dir"));
    }

    #[test]
    fn refuses_frames_with_missing_cells() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.txt");
        let mut df = frame(&[[Some(1.0), None, Some(3.0), Some(4.0), None, Some(6.0)]]);

        let err = CsvExporter::export(&mut df, &path).unwrap_err();
        assert!(matches!(err, ExporterError::UnfilledCells { count: 2, .. }));
        assert!(!path.exists());
    }
}
