//! Data Processor Module
//! Handles data cleaning and numeric coercion of table columns.

use crate::error::ValidationError;
use polars::prelude::*;

/// Whether a column type is a plain number.
pub fn is_numeric_dtype(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::Float32
            | DataType::Float64
            | DataType::Int8
            | DataType::Int16
            | DataType::Int32
            | DataType::Int64
            | DataType::UInt8
            | DataType::UInt16
            | DataType::UInt32
            | DataType::UInt64
    )
}

/// Handles data cleaning and transformation operations.
pub struct DataProcessor;

impl DataProcessor {
    /// Drop rows identical to an earlier row, keeping first occurrences in order.
    ///
    /// Returns the number of rows removed.
    pub fn remove_duplicates(df: &mut DataFrame) -> Result<usize, ValidationError> {
        if df.width() == 0 || df.height() < 2 {
            return Ok(0);
        }

        let before = df.height();
        let deduped = df.unique_stable(None, UniqueKeepStrategy::First, None)?;
        let removed = before - deduped.height();
        *df = deduped;
        Ok(removed)
    }

    /// Read a column as `f64` values.
    ///
    /// Numeric and boolean columns are cast, text columns are parsed value by
    /// value. Missing values, non-finite numbers and unparseable text are
    /// rejected.
    pub fn numeric_values(df: &DataFrame, column: &str) -> Result<Vec<f64>, ValidationError> {
        let col = df
            .column(column)
            .map_err(|_| ValidationError::MissingColumn(column.to_string()))?;
        let non_numeric = |reason: String| ValidationError::NonNumeric {
            column: column.to_string(),
            reason,
        };

        if col.null_count() > 0 {
            return Err(non_numeric(format!("{} missing values", col.null_count())));
        }

        let values: Vec<f64> = match col.dtype() {
            dtype if is_numeric_dtype(dtype) || dtype == &DataType::Boolean => {
                let cast = col.cast(&DataType::Float64)?;
                cast.f64()?
                    .into_iter()
                    .map(|v| v.unwrap_or(f64::NAN))
                    .collect()
            }
            DataType::String => col
                .str()?
                .into_iter()
                .map(|v| {
                    let text = v.unwrap_or("").trim();
                    text.parse::<f64>()
                        .map_err(|_| non_numeric(format!("'{}' is not a number", text)))
                })
                .collect::<Result<_, _>>()?,
            other => return Err(non_numeric(format!("column type is {}", other))),
        };

        if let Some(v) = values.iter().find(|v| !v.is_finite()) {
            return Err(non_numeric(format!("contains {}", v)));
        }
        Ok(values)
    }
}
