//! Linear Regression Module
//! Single-feature least-squares fit that writes a `Predictions` column.

use crate::data::DataProcessor;
use crate::error::ValidationError;
use polars::prelude::*;
use statrs::statistics::Statistics;

/// Name of the derived column written by [`LinearRegression::fit_and_predict`].
pub const PREDICTIONS_COLUMN: &str = "Predictions";

/// Minimum number of rows a fit needs.
const MIN_ROWS: usize = 2;

/// Feature and target columns chosen for the regression.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ColumnSelection {
    pub feature: String,
    pub target: String,
}

impl ColumnSelection {
    pub fn new(feature: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            feature: feature.into(),
            target: target.into(),
        }
    }
}

/// Fitted line `target = slope * feature + intercept`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RegressionFit {
    pub slope: f64,
    pub intercept: f64,
    pub r_squared: f64,
    pub n_rows: usize,
}

impl RegressionFit {
    /// Ordinary least squares over paired values.
    ///
    /// A constant feature has no unique solution; the minimum-norm one is
    /// used (slope 0, intercept at the target mean).
    pub fn fit(x: &[f64], y: &[f64]) -> Result<Self, ValidationError> {
        let n = x.len().min(y.len());
        if n < MIN_ROWS {
            return Err(ValidationError::InsufficientRows {
                required: MIN_ROWS,
                found: n,
            });
        }
        let (x, y) = (&x[..n], &y[..n]);

        let x_mean = x.iter().mean();
        let y_mean = y.iter().mean();
        let x_var = x.iter().variance();

        if !x_var.is_finite() {
            return Err(ValidationError::NotFinite(format!(
                "feature variance overflows ({})",
                x_var
            )));
        }

        let slope = if x_var == 0.0 {
            0.0
        } else {
            x.iter().covariance(y.iter()) / x_var
        };
        let intercept = y_mean - slope * x_mean;
        if !slope.is_finite() || !intercept.is_finite() {
            return Err(ValidationError::NotFinite(format!(
                "slope {} and intercept {}",
                slope, intercept
            )));
        }

        let mut fit = Self {
            slope,
            intercept,
            r_squared: f64::NAN,
            n_rows: n,
        };
        fit.r_squared = fit.score(x, y, y_mean);
        Ok(fit)
    }

    pub fn predict(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }

    /// Coefficient of determination. A constant target scores 1 when fitted
    /// exactly and 0 otherwise.
    fn score(&self, x: &[f64], y: &[f64], y_mean: f64) -> f64 {
        let ss_res: f64 = x
            .iter()
            .zip(y)
            .map(|(&xi, &yi)| (yi - self.predict(xi)).powi(2))
            .sum();
        let ss_tot: f64 = y.iter().map(|&yi| (yi - y_mean).powi(2)).sum();

        if ss_tot == 0.0 {
            if ss_res == 0.0 {
                1.0
            } else {
                0.0
            }
        } else {
            1.0 - ss_res / ss_tot
        }
    }
}

/// Fits a line on two table columns and appends its predictions.
pub struct LinearRegression;

impl LinearRegression {
    /// Fit `selection.target` against `selection.feature` and write the
    /// prediction for every row into [`PREDICTIONS_COLUMN`].
    ///
    /// The table is left untouched when validation fails.
    pub fn fit_and_predict(
        df: &mut DataFrame,
        selection: &ColumnSelection,
    ) -> Result<RegressionFit, ValidationError> {
        for name in [&selection.feature, &selection.target] {
            if df.column(name).is_err() {
                return Err(ValidationError::MissingColumn(name.clone()));
            }
        }

        let x = DataProcessor::numeric_values(df, &selection.feature)?;
        let y = DataProcessor::numeric_values(df, &selection.target)?;
        let fit = RegressionFit::fit(&x, &y)?;

        let predictions: Vec<f64> = x.iter().map(|&xi| fit.predict(xi)).collect();
        if predictions.iter().any(|p| !p.is_finite()) {
            return Err(ValidationError::NotFinite("predictions overflow".to_string()));
        }
        df.with_column(Column::new(PREDICTIONS_COLUMN.into(), predictions))?;
        Ok(fit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn predictions(df: &DataFrame) -> Vec<f64> {
        df.column(PREDICTIONS_COLUMN)
            .unwrap()
            .f64()
            .unwrap()
            .into_iter()
            .map(|v| v.unwrap())
            .collect()
    }

    fn assert_close(actual: &[f64], expected: &[f64]) {
        assert_eq!(actual.len(), expected.len());
        for (a, e) in actual.iter().zip(expected) {
            assert!((a - e).abs() < 1e-9, "{} != {}", a, e);
        }
    }

    #[test]
    fn exact_linear_fit() {
        let mut df = df!("x" => [1.0, 2.0, 3.0], "y" => [2.0, 4.0, 6.0]).unwrap();
        let fit =
            LinearRegression::fit_and_predict(&mut df, &ColumnSelection::new("x", "y")).unwrap();

        assert_close(&predictions(&df), &[2.0, 4.0, 6.0]);
        assert!((fit.slope - 2.0).abs() < 1e-9);
        assert!(fit.intercept.abs() < 1e-9);
        assert!((fit.r_squared - 1.0).abs() < 1e-9);
        assert_eq!(fit.n_rows, 3);
    }

    #[test]
    fn noisy_fit_matches_closed_form() {
        let x = [1.0, 2.0, 3.0, 4.0];
        let y = [1.0, 3.0, 2.0, 5.0];
        let fit = RegressionFit::fit(&x, &y).unwrap();
        // slope = Sxy / Sxx = 5.5 / 5, intercept = 2.75 - 1.1 * 2.5
        assert!((fit.slope - 1.1).abs() < 1e-9);
        assert!((fit.intercept - 0.0).abs() < 1e-9);
        assert!(fit.r_squared > 0.0 && fit.r_squared < 1.0);
    }

    #[test]
    fn predictions_length_matches_rows_and_is_deterministic() {
        let mut df = df!(
            "x" => [3i64, 1, 4, 1, 5, 9],
            "y" => [2.0, 7.0, 1.0, 8.0, 2.0, 8.0]
        )
        .unwrap();
        let sel = ColumnSelection::new("x", "y");
        LinearRegression::fit_and_predict(&mut df, &sel).unwrap();
        let first = predictions(&df);
        assert_eq!(first.len(), df.height());

        LinearRegression::fit_and_predict(&mut df, &sel).unwrap();
        assert_eq!(predictions(&df), first);
        assert_eq!(df.width(), 3);
    }

    #[test]
    fn non_numeric_target_leaves_table_unchanged() {
        let mut df = df!("x" => [1.0, 2.0, 3.0], "y" => ["a", "b", "c"]).unwrap();
        let before = df.clone();
        let err = LinearRegression::fit_and_predict(&mut df, &ColumnSelection::new("x", "y"))
            .unwrap_err();
        assert!(matches!(err, ValidationError::NonNumeric { .. }));
        assert!(df.equals(&before));
    }

    #[test]
    fn missing_feature_value_is_rejected() {
        let mut df = df!("x" => [Some(1.0), None], "y" => [1.0, 2.0]).unwrap();
        let err = LinearRegression::fit_and_predict(&mut df, &ColumnSelection::new("x", "y"))
            .unwrap_err();
        assert!(matches!(err, ValidationError::NonNumeric { .. }));
        assert!(df.column(PREDICTIONS_COLUMN).is_err());
    }

    #[test]
    fn unknown_column_is_rejected() {
        let mut df = df!("x" => [1.0, 2.0]).unwrap();
        let err = LinearRegression::fit_and_predict(&mut df, &ColumnSelection::new("x", "nope"))
            .unwrap_err();
        assert!(matches!(err, ValidationError::MissingColumn(c) if c == "nope"));
    }

    #[test]
    fn single_row_is_rejected() {
        let mut df = df!("x" => [1.0], "y" => [2.0]).unwrap();
        let err = LinearRegression::fit_and_predict(&mut df, &ColumnSelection::new("x", "y"))
            .unwrap_err();
        assert!(matches!(
            err,
            ValidationError::InsufficientRows { required: 2, found: 1 }
        ));
    }

    #[test]
    fn constant_feature_predicts_target_mean() {
        let mut df = df!("x" => [5.0, 5.0, 5.0], "y" => [1.0, 2.0, 6.0]).unwrap();
        let fit =
            LinearRegression::fit_and_predict(&mut df, &ColumnSelection::new("x", "y")).unwrap();
        assert_eq!(fit.slope, 0.0);
        assert_close(&predictions(&df), &[3.0, 3.0, 3.0]);
        assert!(fit.r_squared.abs() < 1e-9);
    }

    #[test]
    fn infinite_text_feature_is_rejected() {
        let mut df = df!("x" => ["1", "inf", "3"], "y" => [1.0, 2.0, 3.0]).unwrap();
        let err = LinearRegression::fit_and_predict(&mut df, &ColumnSelection::new("x", "y"))
            .unwrap_err();
        assert!(matches!(err, ValidationError::NonNumeric { .. }));
        assert!(df.column(PREDICTIONS_COLUMN).is_err());
    }

    #[test]
    fn overflowing_feature_is_rejected() {
        let mut df = df!("x" => [1e200, 2e200, 3e200], "y" => [1.0, 2.0, 3.0]).unwrap();
        let err = LinearRegression::fit_and_predict(&mut df, &ColumnSelection::new("x", "y"))
            .unwrap_err();
        assert!(matches!(err, ValidationError::NotFinite(_)));
        assert!(df.column(PREDICTIONS_COLUMN).is_err());
    }

    #[test]
    fn existing_predictions_column_is_overwritten() {
        let mut df = df!(
            "x" => [1.0, 2.0, 3.0],
            "y" => [1.0, 2.0, 3.0],
            "Predictions" => ["old", "old", "old"]
        )
        .unwrap();
        LinearRegression::fit_and_predict(&mut df, &ColumnSelection::new("x", "y")).unwrap();
        assert_eq!(df.width(), 3);
        assert_close(&predictions(&df), &[1.0, 2.0, 3.0]);
    }
}
