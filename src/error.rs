//! Error Types
//! Typed failures for decoding uploads and validating table operations.

use polars::prelude::PolarsError;
use thiserror::Error;

/// Failure to turn an uploaded file into a table.
#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("Unsupported file type '{0}': upload a .csv or .xlsx file")]
    UnsupportedExtension(String),
    #[error("File '{0}' is empty")]
    EmptyFile(String),
    #[error("Failed to read CSV: {0}")]
    Csv(#[source] PolarsError),
    #[error("CSV header is not valid UTF-8: {0}")]
    HeaderEncoding(#[from] std::str::Utf8Error),
    #[error("Failed to read Excel file: {0}")]
    Xlsx(#[from] calamine::XlsxError),
    #[error("Excel file has no worksheet")]
    NoSheet,
    #[error("Excel worksheet has no header row")]
    NoHeader,
    #[error("Failed to build table: {0}")]
    Table(#[source] PolarsError),
}

/// Failure of a column selection or table operation.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("No data loaded")]
    NoTable,
    #[error("Column '{0}' does not exist")]
    MissingColumn(String),
    #[error("Column '{column}' must contain only numeric values ({reason})")]
    NonNumeric { column: String, reason: String },
    #[error("At least {required} rows are required, found {found}")]
    InsufficientRows { required: usize, found: usize },
    #[error("At least 2 columns are required to draw a chart, found {0}")]
    InsufficientColumns(usize),
    #[error("Regression has no finite solution: {0}")]
    NotFinite(String),
    #[error("Pie chart values must be non-negative, column '{0}' has negative values")]
    NegativePieValue(String),
    #[error("Polars error: {0}")]
    Table(#[from] PolarsError),
}

