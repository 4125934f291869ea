//! Analysis Panel Widget
//! Linear regression controls, fit summary and predictions preview.

use crate::gui::{column_combo, Banner, TableView};
use crate::session::Session;
use crate::stats::{ColumnSelection, RegressionFit};
use egui::RichText;

/// Regression section state.
#[derive(Default)]
pub struct AnalysisPanel {
    pub enabled: bool,
    pub selection: ColumnSelection,
    /// Selection and table revision the last outcome belongs to.
    fitted_for: Option<(ColumnSelection, u64)>,
    error: Option<Banner>,
}

impl AnalysisPanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Default both selectors to the first column after an upload.
    pub fn reset_columns(&mut self, columns: &[String]) {
        let first = columns.first().cloned().unwrap_or_default();
        self.selection = ColumnSelection::new(first.clone(), first);
        self.fitted_for = None;
        self.error = None;
    }

    /// Fit when enabled and the selection or table changed since the last run.
    fn refresh(&mut self, session: &mut Session) {
        if !self.enabled {
            return;
        }
        if let Some((selection, revision)) = &self.fitted_for {
            if selection == &self.selection && *revision == session.revision() {
                return;
            }
        }

        self.error = session
            .fit_and_predict(&self.selection)
            .err()
            .map(|e| Banner::error(format!("Ensure numerical data in selected columns: {}", e)));
        // Read after the fit: a successful fit bumps the revision itself.
        self.fitted_for = Some((self.selection.clone(), session.revision()));
    }

    fn draw_fit(ui: &mut egui::Ui, fit: &RegressionFit, selection: &ColumnSelection) {
        egui::Grid::new("regression_summary")
            .num_columns(2)
            .spacing([12.0, 4.0])
            .show(ui, |ui| {
                ui.label(RichText::new("Model").strong());
                ui.label(format!(
                    "{} = {:.4} × {} + {:.4}",
                    selection.target, fit.slope, selection.feature, fit.intercept
                ));
                ui.end_row();
                ui.label(RichText::new("R²").strong());
                ui.label(format!("{:.4}", fit.r_squared));
                ui.end_row();
                ui.label(RichText::new("Rows").strong());
                ui.label(fit.n_rows.to_string());
                ui.end_row();
            });
    }

    /// Draw the regression section
    pub fn show(&mut self, ui: &mut egui::Ui, session: &mut Session, preview_rows: usize) {
        ui.checkbox(&mut self.enabled, "Run Predictive Model (Linear Regression)");
        if !self.enabled {
            return;
        }

        let columns = session.columns();
        column_combo(ui, "feature_col", "Feature Column:", 110.0, &mut self.selection.feature, &columns);
        column_combo(ui, "target_col", "Target Column:", 110.0, &mut self.selection.target, &columns);
        ui.add_space(5.0);

        self.refresh(session);

        if let Some(banner) = &self.error {
            banner.show(ui);
            return;
        }
        if let (Some(fit), Some(selection)) = (session.last_fit(), session.selection()) {
            Self::draw_fit(ui, &fit, selection);
            ui.add_space(5.0);
        }
        if let Some(preview) = session.prediction_preview(preview_rows) {
            TableView::show(ui, "predictions_preview", &preview);
        }
    }
}
