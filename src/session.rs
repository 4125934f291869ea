//! Dashboard Session
//! Owns the current table and runs every pipeline operation against it.

use crate::charts::{ChartBuilder, ChartRequest, ChartSpec};
use crate::config::{AppConfig, ChartColumnPolicy};
use crate::data::{column_names, DataLoader, DataProcessor, UploadedFile};
use crate::error::{DecodeError, ValidationError};
use crate::stats::{ColumnSelection, LinearRegression, RegressionFit, PREDICTIONS_COLUMN};
use log::{info, warn};
use polars::prelude::*;

/// State of one user session: at most one table plus the last results
/// computed from it.
pub struct Session {
    loader: DataLoader,
    chart_policy: ChartColumnPolicy,
    table: Option<DataFrame>,
    source_name: Option<String>,
    selection: Option<ColumnSelection>,
    fit: Option<RegressionFit>,
    chart: Option<ChartSpec>,
    /// Bumped on every table change so views can tell stale results apart.
    revision: u64,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(&AppConfig::default())
    }
}

impl Session {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            loader: DataLoader::new(config.infer_schema_length),
            chart_policy: config.chart_columns,
            table: None,
            source_name: None,
            selection: None,
            fit: None,
            chart: None,
            revision: 0,
        }
    }

    /// Decode `file` and make it the current table.
    ///
    /// On failure the previous table and results are kept.
    pub fn ingest(&mut self, file: &UploadedFile) -> Result<&DataFrame, DecodeError> {
        let df = self.loader.load(file).map_err(|e| {
            warn!("Rejected upload {}: {}", file.name, e);
            e
        })?;

        self.source_name = Some(file.name.clone());
        self.selection = None;
        self.fit = None;
        self.chart = None;
        self.revision += 1;
        Ok(&*self.table.insert(df))
    }

    /// Remove duplicate rows from the current table, returning how many went.
    pub fn remove_duplicates(&mut self) -> Result<usize, ValidationError> {
        let table = self.table.as_mut().ok_or(ValidationError::NoTable)?;
        let removed = DataProcessor::remove_duplicates(table)?;
        info!("Removed {} duplicate rows, {} remain", removed, table.height());
        if removed > 0 {
            self.revision += 1;
        }
        Ok(removed)
    }

    /// Fit a line and write the `Predictions` column.
    pub fn fit_and_predict(
        &mut self,
        selection: &ColumnSelection,
    ) -> Result<RegressionFit, ValidationError> {
        let table = self.table.as_mut().ok_or(ValidationError::NoTable)?;
        let fit = LinearRegression::fit_and_predict(table, selection).map_err(|e| {
            warn!(
                "Regression {} -> {} failed: {}",
                selection.feature, selection.target, e
            );
            e
        })?;

        info!(
            "Fitted {} = {:.4} * {} + {:.4} (R² {:.4}, {} rows)",
            selection.target, fit.slope, selection.feature, fit.intercept, fit.r_squared, fit.n_rows
        );
        self.selection = Some(selection.clone());
        self.fit = Some(fit);
        self.revision += 1;
        Ok(fit)
    }

    /// Build a chart from the current table and remember it.
    pub fn build_chart(&mut self, request: &ChartRequest) -> Result<&ChartSpec, ValidationError> {
        let table = self.table.as_ref().ok_or(ValidationError::NoTable)?;
        let spec = ChartBuilder::build(table, request, self.chart_policy).map_err(|e| {
            warn!("{} for {:?} failed: {}", request.kind.label(), request, e);
            e
        })?;
        Ok(&*self.chart.insert(spec))
    }

    /// Feature, target and `Predictions` columns for the first `limit` rows of
    /// the last successful fit.
    pub fn prediction_preview(&self, limit: usize) -> Option<DataFrame> {
        let table = self.table.as_ref()?;
        let selection = self.selection.as_ref()?;

        let mut names: Vec<String> = Vec::new();
        for name in [&selection.feature, &selection.target] {
            if !names.contains(name) {
                names.push(name.clone());
            }
        }
        names.push(PREDICTIONS_COLUMN.to_string());

        table.select(names).ok().map(|df| df.head(Some(limit)))
    }

    /// Default chart axes: the first two columns.
    pub fn default_chart_columns(&self) -> Option<(String, String)> {
        let names = self.columns();
        match names.as_slice() {
            [x, y, ..] => Some((x.clone(), y.clone())),
            _ => None,
        }
    }

    pub fn columns(&self) -> Vec<String> {
        self.table.as_ref().map(column_names).unwrap_or_default()
    }

    pub fn row_count(&self) -> usize {
        self.table.as_ref().map(|df| df.height()).unwrap_or(0)
    }

    pub fn table(&self) -> Option<&DataFrame> {
        self.table.as_ref()
    }

    pub fn source_name(&self) -> Option<&str> {
        self.source_name.as_deref()
    }

    pub fn selection(&self) -> Option<&ColumnSelection> {
        self.selection.as_ref()
    }

    pub fn last_fit(&self) -> Option<RegressionFit> {
        self.fit
    }

    pub fn last_chart(&self) -> Option<&ChartSpec> {
        self.chart.as_ref()
    }

    pub fn chart_policy(&self) -> ChartColumnPolicy {
        self.chart_policy
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charts::{ChartKind, ChartSeries};

    fn upload(name: &str, text: &str) -> UploadedFile {
        UploadedFile::new(name, text.as_bytes().to_vec())
    }

    fn loaded(text: &str) -> Session {
        let mut session = Session::default();
        session.ingest(&upload("data.csv", text)).unwrap();
        session
    }

    #[test]
    fn operations_need_a_table() {
        let mut session = Session::default();
        assert!(matches!(
            session.remove_duplicates(),
            Err(ValidationError::NoTable)
        ));
        assert!(matches!(
            session.fit_and_predict(&ColumnSelection::new("x", "y")),
            Err(ValidationError::NoTable)
        ));
        assert!(matches!(
            session.build_chart(&ChartRequest::new(ChartKind::Bar, "x", "y")),
            Err(ValidationError::NoTable)
        ));
    }

    #[test]
    fn upload_then_remove_duplicates() {
        let mut session = loaded("a,b\n1,2\n1,2\n3,4\n");
        assert_eq!(session.row_count(), 3);
        assert_eq!(session.columns(), vec!["a", "b"]);
        assert_eq!(session.source_name(), Some("data.csv"));

        assert_eq!(session.remove_duplicates().unwrap(), 1);
        assert_eq!(session.row_count(), 2);
        assert_eq!(session.remove_duplicates().unwrap(), 0);
        assert_eq!(session.row_count(), 2);
    }

    #[test]
    fn failed_upload_keeps_previous_table() {
        let mut session = loaded("a,b\n1,2\n");
        let revision = session.revision();

        let err = session.ingest(&upload("notes.txt", "a,b\n9,9\n")).unwrap_err();
        assert!(matches!(err, DecodeError::UnsupportedExtension(_)));
        assert_eq!(session.row_count(), 1);
        assert_eq!(session.source_name(), Some("data.csv"));
        assert_eq!(session.revision(), revision);
    }

    #[test]
    fn new_upload_replaces_table_and_results() {
        let mut session = loaded("x,y\n1,2\n2,4\n3,6\n");
        session
            .fit_and_predict(&ColumnSelection::new("x", "y"))
            .unwrap();
        assert!(session.last_fit().is_some());

        session.ingest(&upload("other.csv", "p,q\n5,6\n")).unwrap();
        assert_eq!(session.columns(), vec!["p", "q"]);
        assert!(session.last_fit().is_none());
        assert!(session.selection().is_none());
        assert!(session.prediction_preview(5).is_none());
    }

    #[test]
    fn regression_adds_predictions_and_preview() {
        let mut session = loaded("x,y,label\n1,2,a\n2,4,b\n3,6,c\n");
        let fit = session
            .fit_and_predict(&ColumnSelection::new("x", "y"))
            .unwrap();
        assert!((fit.slope - 2.0).abs() < 1e-9);
        assert!(session.columns().contains(&PREDICTIONS_COLUMN.to_string()));

        let preview = session.prediction_preview(2).unwrap();
        assert_eq!(preview.height(), 2);
        assert_eq!(column_names(&preview), vec!["x", "y", "Predictions"]);
    }

    #[test]
    fn preview_with_same_feature_and_target() {
        let mut session = loaded("x,y\n1,2\n2,4\n");
        session
            .fit_and_predict(&ColumnSelection::new("x", "x"))
            .unwrap();
        let preview = session.prediction_preview(10).unwrap();
        assert_eq!(column_names(&preview), vec!["x", "Predictions"]);
    }

    #[test]
    fn failed_regression_keeps_table() {
        let mut session = loaded("x,label\n1,a\n2,b\n");
        let revision = session.revision();
        let err = session
            .fit_and_predict(&ColumnSelection::new("x", "label"))
            .unwrap_err();
        assert!(matches!(err, ValidationError::NonNumeric { .. }));
        assert_eq!(session.columns(), vec!["x", "label"]);
        assert_eq!(session.revision(), revision);
    }

    #[test]
    fn chart_is_remembered() {
        let mut session = loaded("region,sales\nnorth,3\nsouth,4\n");
        let (x, y) = session.default_chart_columns().unwrap();
        session
            .build_chart(&ChartRequest::new(ChartKind::Line, x, y))
            .unwrap();

        let chart = session.last_chart().unwrap();
        assert_eq!(chart.kind, ChartKind::Line);
        assert!(matches!(chart.series, ChartSeries::Cartesian { .. }));
    }

    #[test]
    fn first_two_policy_comes_from_config() {
        let config = AppConfig {
            chart_columns: ChartColumnPolicy::FirstTwo,
            ..AppConfig::default()
        };
        let mut session = Session::new(&config);
        session
            .ingest(&upload("data.csv", "a,b,c\n1,2,3\n"))
            .unwrap();
        let chart = session
            .build_chart(&ChartRequest::new(ChartKind::Scatter, "c", "c"))
            .unwrap();
        assert_eq!((chart.x_col.as_str(), chart.y_col.as_str()), ("a", "b"));
    }
}
