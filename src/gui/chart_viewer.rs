//! Chart Viewer Widget
//! Visualization section: plot type, axis columns and the rendered chart.

use crate::charts::{ChartKind, ChartPlotter, ChartRequest};
use crate::config::ChartColumnPolicy;
use crate::gui::{column_combo, Banner};
use crate::session::Session;
use egui::RichText;

/// Visualization controls plus the outcome of the last chart build.
#[derive(Default)]
pub struct ChartViewer {
    pub request: ChartRequest,
    /// Request and table revision the current outcome was built for.
    built_for: Option<(ChartRequest, u64)>,
    error: Option<Banner>,
}

impl ChartViewer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Point the axes at new columns after an upload.
    pub fn reset_columns(&mut self, defaults: Option<(String, String)>) {
        let (x, y) = defaults.unwrap_or_default();
        self.request.x_col = x;
        self.request.y_col = y;
        self.built_for = None;
        self.error = None;
    }

    /// Rebuild the chart when the request or the table changed.
    fn refresh(&mut self, session: &mut Session) {
        let key = (self.request.clone(), session.revision());
        if self.built_for.as_ref() == Some(&key) {
            return;
        }

        self.error = session
            .build_chart(&self.request)
            .err()
            .map(|e| Banner::error(format!("Error generating visualization: {}", e)));
        self.built_for = Some(key);
    }

    /// Draw the visualization section
    pub fn show(&mut self, ui: &mut egui::Ui, session: &mut Session, chart_height: f32) {
        ui.label(RichText::new("📊 Visualizations").size(16.0).strong());
        ui.add_space(5.0);

        ui.label("Select Plot Type");
        ui.horizontal(|ui| {
            for kind in ChartKind::ALL {
                ui.radio_value(&mut self.request.kind, kind, kind.label());
            }
        });
        ui.add_space(5.0);

        let columns = session.columns();
        match session.chart_policy() {
            ChartColumnPolicy::UserSelected => {
                let (x_label, y_label) = match self.request.kind {
                    ChartKind::Pie => ("Names:", "Values:"),
                    _ => ("X Column:", "Y Column:"),
                };
                column_combo(ui, "chart_x_col", x_label, 90.0, &mut self.request.x_col, &columns);
                column_combo(ui, "chart_y_col", y_label, 90.0, &mut self.request.y_col, &columns);
            }
            ChartColumnPolicy::FirstTwo => {
                ui.label(
                    RichText::new("Charting the first two columns")
                        .size(11.0)
                        .color(egui::Color32::GRAY),
                );
            }
        }
        ui.add_space(8.0);

        self.refresh(session);

        if let Some(banner) = &self.error {
            banner.show(ui);
        } else if let Some(spec) = session.last_chart() {
            ChartPlotter::draw(ui, spec, chart_height);
        }
    }
}
