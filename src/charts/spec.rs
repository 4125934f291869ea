//! Chart Spec Module
//! Turns a table and a chart request into plot-ready series.

use crate::config::ChartColumnPolicy;
use crate::data::{column_names, is_numeric_dtype};
use crate::error::ValidationError;
use polars::prelude::*;
use std::collections::HashMap;

/// Plot kinds offered in the visualization section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChartKind {
    #[default]
    Bar,
    Scatter,
    Pie,
    Line,
}

impl ChartKind {
    pub const ALL: [ChartKind; 4] = [
        ChartKind::Bar,
        ChartKind::Scatter,
        ChartKind::Pie,
        ChartKind::Line,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ChartKind::Bar => "Bar Chart",
            ChartKind::Scatter => "Scatter Plot",
            ChartKind::Pie => "Pie Chart",
            ChartKind::Line => "Line Chart",
        }
    }
}

/// Plot kind plus the columns bound to its axes.
///
/// For pie charts `x_col` names the slices and `y_col` holds their values.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ChartRequest {
    pub kind: ChartKind,
    pub x_col: String,
    pub y_col: String,
}

impl ChartRequest {
    pub fn new(kind: ChartKind, x_col: impl Into<String>, y_col: impl Into<String>) -> Self {
        Self {
            kind,
            x_col: x_col.into(),
            y_col: y_col.into(),
        }
    }
}

/// X values, either numbers or category labels.
#[derive(Debug, Clone, PartialEq)]
pub enum AxisValues {
    Numeric(Vec<f64>),
    Categorical(Vec<String>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct PieSlice {
    pub name: String,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ChartSeries {
    Cartesian { x: AxisValues, y: Vec<f64> },
    Pie(Vec<PieSlice>),
}

/// Everything the plotter needs to draw one chart.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSpec {
    pub kind: ChartKind,
    pub title: String,
    pub x_col: String,
    pub y_col: String,
    pub series: ChartSeries,
}

/// Validates chart requests against a table and extracts their series.
pub struct ChartBuilder;

impl ChartBuilder {
    /// Apply the column policy to a request.
    ///
    /// `FirstTwo` ignores the requested columns and binds the table's first
    /// two columns.
    pub fn resolve(
        df: &DataFrame,
        request: &ChartRequest,
        policy: ChartColumnPolicy,
    ) -> Result<ChartRequest, ValidationError> {
        let names = column_names(df);
        if names.len() < 2 {
            return Err(ValidationError::InsufficientColumns(names.len()));
        }

        Ok(match policy {
            ChartColumnPolicy::FirstTwo => {
                ChartRequest::new(request.kind, names[0].clone(), names[1].clone())
            }
            ChartColumnPolicy::UserSelected => request.clone(),
        })
    }

    /// Build the chart spec for `request` after applying `policy`.
    pub fn build(
        df: &DataFrame,
        request: &ChartRequest,
        policy: ChartColumnPolicy,
    ) -> Result<ChartSpec, ValidationError> {
        let request = Self::resolve(df, request, policy)?;
        let x = df
            .column(&request.x_col)
            .map_err(|_| ValidationError::MissingColumn(request.x_col.clone()))?;
        let y = df
            .column(&request.y_col)
            .map_err(|_| ValidationError::MissingColumn(request.y_col.clone()))?;

        if !is_numeric_dtype(y.dtype()) {
            return Err(ValidationError::NonNumeric {
                column: request.y_col.clone(),
                reason: format!("{} needs numeric values, found {}", request.kind.label(), y.dtype()),
            });
        }
        let y_values = Self::f64_values(y)?;

        let series = match request.kind {
            ChartKind::Pie => {
                let names = Self::text_values(x)?;
                ChartSeries::Pie(Self::pie_slices(&request.y_col, names, y_values)?)
            }
            ChartKind::Bar | ChartKind::Scatter | ChartKind::Line => {
                if is_numeric_dtype(x.dtype()) {
                    let (xs, ys): (Vec<f64>, Vec<f64>) = Self::f64_values(x)?
                        .into_iter()
                        .zip(y_values)
                        .filter_map(|(x, y)| Some((x?, y?)))
                        .unzip();
                    ChartSeries::Cartesian {
                        x: AxisValues::Numeric(xs),
                        y: ys,
                    }
                } else {
                    let (xs, ys): (Vec<String>, Vec<f64>) = Self::text_values(x)?
                        .into_iter()
                        .zip(y_values)
                        .filter_map(|(x, y)| Some((x?, y?)))
                        .unzip();
                    ChartSeries::Cartesian {
                        x: AxisValues::Categorical(xs),
                        y: ys,
                    }
                }
            }
        };

        Ok(ChartSpec {
            kind: request.kind,
            title: request.kind.label().to_string(),
            x_col: request.x_col,
            y_col: request.y_col,
            series,
        })
    }

    /// Numeric column as optional floats, NaN counted as missing.
    fn f64_values(col: &Column) -> Result<Vec<Option<f64>>, ValidationError> {
        let cast = col.cast(&DataType::Float64)?;
        Ok(cast
            .f64()?
            .into_iter()
            .map(|v| v.filter(|v| !v.is_nan()))
            .collect())
    }

    /// Any column rendered as text labels.
    fn text_values(col: &Column) -> Result<Vec<Option<String>>, ValidationError> {
        let cast = col.cast(&DataType::String)?;
        Ok(cast
            .str()?
            .into_iter()
            .map(|v| v.map(str::to_string))
            .collect())
    }

    /// Sum values per slice name, in order of first appearance.
    fn pie_slices(
        value_col: &str,
        names: Vec<Option<String>>,
        values: Vec<Option<f64>>,
    ) -> Result<Vec<PieSlice>, ValidationError> {
        let mut slices: Vec<PieSlice> = Vec::new();
        let mut index: HashMap<String, usize> = HashMap::new();

        for (name, value) in names.into_iter().zip(values) {
            let (Some(name), Some(value)) = (name, value) else {
                continue;
            };
            if value < 0.0 {
                return Err(ValidationError::NegativePieValue(value_col.to_string()));
            }
            match index.get(&name) {
                Some(&i) => slices[i].value += value,
                None => {
                    index.insert(name.clone(), slices.len());
                    slices.push(PieSlice { name, value });
                }
            }
        }

        Ok(slices)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sales() -> DataFrame {
        df!(
            "region" => ["north", "south", "north", "east"],
            "revenue" => [10.0, 5.0, 2.5, 7.0],
            "units" => [1i64, 2, 3, 4]
        )
        .unwrap()
    }

    #[test]
    fn bar_with_categorical_x() {
        let spec = ChartBuilder::build(
            &sales(),
            &ChartRequest::new(ChartKind::Bar, "region", "revenue"),
            ChartColumnPolicy::UserSelected,
        )
        .unwrap();

        assert_eq!(spec.title, "Bar Chart");
        match spec.series {
            ChartSeries::Cartesian {
                x: AxisValues::Categorical(x),
                y,
            } => {
                assert_eq!(x, vec!["north", "south", "north", "east"]);
                assert_eq!(y, vec![10.0, 5.0, 2.5, 7.0]);
            }
            other => panic!("unexpected series {:?}", other),
        }
    }

    #[test]
    fn scatter_with_numeric_x() {
        let spec = ChartBuilder::build(
            &sales(),
            &ChartRequest::new(ChartKind::Scatter, "units", "revenue"),
            ChartColumnPolicy::UserSelected,
        )
        .unwrap();

        assert_eq!(
            spec.series,
            ChartSeries::Cartesian {
                x: AxisValues::Numeric(vec![1.0, 2.0, 3.0, 4.0]),
                y: vec![10.0, 5.0, 2.5, 7.0],
            }
        );
    }

    #[test]
    fn pie_sums_repeated_names() {
        let spec = ChartBuilder::build(
            &sales(),
            &ChartRequest::new(ChartKind::Pie, "region", "revenue"),
            ChartColumnPolicy::UserSelected,
        )
        .unwrap();

        let ChartSeries::Pie(slices) = spec.series else {
            panic!("expected pie series");
        };
        let summary: Vec<(&str, f64)> = slices.iter().map(|s| (s.name.as_str(), s.value)).collect();
        assert_eq!(summary, vec![("north", 12.5), ("south", 5.0), ("east", 7.0)]);
    }

    #[test]
    fn pie_rejects_negative_values() {
        let df = df!("name" => ["a", "b"], "value" => [1.0, -2.0]).unwrap();
        let err = ChartBuilder::build(
            &df,
            &ChartRequest::new(ChartKind::Pie, "name", "value"),
            ChartColumnPolicy::UserSelected,
        )
        .unwrap_err();
        assert!(matches!(err, ValidationError::NegativePieValue(_)));
    }

    #[test]
    fn text_y_is_rejected() {
        let err = ChartBuilder::build(
            &sales(),
            &ChartRequest::new(ChartKind::Line, "revenue", "region"),
            ChartColumnPolicy::UserSelected,
        )
        .unwrap_err();
        assert!(matches!(err, ValidationError::NonNumeric { .. }));
    }

    #[test]
    fn single_column_table_is_rejected() {
        let df = df!("only" => [1.0, 2.0]).unwrap();
        let err = ChartBuilder::build(
            &df,
            &ChartRequest::new(ChartKind::Bar, "only", "only"),
            ChartColumnPolicy::UserSelected,
        )
        .unwrap_err();
        assert!(matches!(err, ValidationError::InsufficientColumns(1)));
    }

    #[test]
    fn first_two_policy_ignores_requested_columns() {
        let spec = ChartBuilder::build(
            &sales(),
            &ChartRequest::new(ChartKind::Bar, "units", "units"),
            ChartColumnPolicy::FirstTwo,
        )
        .unwrap();
        assert_eq!(spec.x_col, "region");
        assert_eq!(spec.y_col, "revenue");
    }

    #[test]
    fn rows_with_missing_values_are_skipped() {
        let df = df!(
            "x" => [Some(1.0), None, Some(3.0)],
            "y" => [Some(2.0), Some(4.0), None]
        )
        .unwrap();
        let spec = ChartBuilder::build(
            &df,
            &ChartRequest::new(ChartKind::Line, "x", "y"),
            ChartColumnPolicy::UserSelected,
        )
        .unwrap();
        assert_eq!(
            spec.series,
            ChartSeries::Cartesian {
                x: AxisValues::Numeric(vec![1.0]),
                y: vec![2.0],
            }
        );
    }

    #[test]
    fn series_shape_follows_kind() {
        for kind in ChartKind::ALL {
            let spec = ChartBuilder::build(
                &sales(),
                &ChartRequest::new(kind, "region", "revenue"),
                ChartColumnPolicy::UserSelected,
            )
            .unwrap();
            let is_pie = matches!(spec.series, ChartSeries::Pie(_));
            assert_eq!(is_pie, kind == ChartKind::Pie, "{:?}", kind);
        }
    }

    #[test]
    fn unknown_column_is_rejected() {
        let err = ChartBuilder::build(
            &sales(),
            &ChartRequest::new(ChartKind::Scatter, "units", "profit"),
            ChartColumnPolicy::UserSelected,
        )
        .unwrap_err();
        assert!(matches!(err, ValidationError::MissingColumn(c) if c == "profit"));
    }
}
