//! CSV Data Loader Module
//! Reads the demographic table with Polars and coerces it into records.

use crate::data::record::{Record, LABEL_COLUMN, NUMERIC_COLUMNS};
use polars::prelude::*;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Failed to load CSV: {0}")]
    CsvError(#[from] PolarsError),
    #[error("Missing required column: {0}")]
    MissingColumn(String),
    #[error("No data loaded")]
    NoData,
}

/// Owns the dataset for the lifetime of the window.
pub struct DataLoader {
    records: Option<Arc<[Record]>>,
    file_path: Option<PathBuf>,
}

impl Default for DataLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl DataLoader {
    pub fn new() -> Self {
        Self {
            records: None,
            file_path: None,
        }
    }

    /// Read a CSV file from disk. Used directly by the background load thread.
    pub fn read_csv(file_path: &Path) -> Result<Vec<Record>, LoaderError> {
        let df = LazyCsvReader::new(file_path)
            .with_infer_schema_length(Some(10000))
            .with_ignore_errors(true)
            .finish()?
            .collect()?;

        let records = Self::records_from_frame(&df)?;
        info!(rows = records.len(), path = %file_path.display(), "loaded dataset");
        Ok(records)
    }

    /// Parse CSV text already held in memory.
    pub fn parse_csv_bytes(bytes: impl Into<Vec<u8>>) -> Result<Vec<Record>, LoaderError> {
        let df = CsvReadOptions::default()
            .with_has_header(true)
            .with_infer_schema_length(Some(10000))
            .with_ignore_errors(true)
            .into_reader_with_file_handle(Cursor::new(bytes.into()))
            .finish()?;

        Self::records_from_frame(&df)
    }

    /// Coerce a frame into records. Cells that do not parse as numbers become NaN.
    pub fn records_from_frame(df: &DataFrame) -> Result<Vec<Record>, LoaderError> {
        let [poverty, age, income, healthcare, obesity, smokes] =
            NUMERIC_COLUMNS.map(|name| Self::numeric_column(df, name));
        let (poverty, age, income) = (poverty?, age?, income?);
        let (healthcare, obesity, smokes) = (healthcare?, obesity?, smokes?);
        let labels = Self::label_column(df)?;

        debug!(
            rows = df.height(),
            columns = df.width(),
            "coercing frame into records"
        );

        Ok((0..df.height())
            .map(|i| Record {
                poverty: poverty[i],
                age: age[i],
                income: income[i],
                healthcare: healthcare[i],
                obesity: obesity[i],
                smokes: smokes[i],
                abbr: labels[i].clone(),
            })
            .collect())
    }

    fn numeric_column(df: &DataFrame, name: &str) -> Result<Vec<f64>, LoaderError> {
        let column = df
            .column(name)
            .map_err(|_| LoaderError::MissingColumn(name.to_string()))?;

        // Padded numbers such as " 12 " keep the column as text.
        if column.dtype() == &DataType::String {
            let values = column
                .as_materialized_series()
                .str()?
                .into_iter()
                .map(|v| parse_cell(v.unwrap_or_default()))
                .collect();
            return Ok(values);
        }

        let as_f64 = column.cast(&DataType::Float64)?;
        let values = as_f64
            .f64()?
            .into_iter()
            .map(|v| v.unwrap_or(f64::NAN))
            .collect();
        Ok(values)
    }

    fn label_column(df: &DataFrame) -> Result<Vec<String>, LoaderError> {
        let column = df
            .column(LABEL_COLUMN)
            .map_err(|_| LoaderError::MissingColumn(LABEL_COLUMN.to_string()))?;
        let as_str = column.cast(&DataType::String)?;
        let labels = as_str
            .as_materialized_series()
            .str()?
            .into_iter()
            .map(|v| v.unwrap_or_default().trim().to_string())
            .collect();
        Ok(labels)
    }

    /// Records of the last successful load.
    pub fn records(&self) -> Result<Arc<[Record]>, LoaderError> {
        self.records.clone().ok_or(LoaderError::NoData)
    }

    /// Number of loaded records.
    pub fn get_row_count(&self) -> usize {
        self.records.as_ref().map(|r| r.len()).unwrap_or(0)
    }

    pub fn get_file_path(&self) -> Option<&PathBuf> {
        self.file_path.as_ref()
    }

    /// Keep the records delivered by the background load.
    pub fn set_records(&mut self, records: Vec<Record>, file_path: PathBuf) {
        self.records = Some(records.into());
        self.file_path = Some(file_path);
    }
}

/// Numeric value of a text cell. Blank cells count as missing.
fn parse_cell(cell: &str) -> f64 {
    cell.trim().parse().unwrap_or(f64::NAN)
}
