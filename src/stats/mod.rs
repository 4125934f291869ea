//! Stats module - regression fitting

mod regression;

pub use regression::{ColumnSelection, LinearRegression, RegressionFit, PREDICTIONS_COLUMN};
