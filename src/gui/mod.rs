//! GUI module - User interface components

mod analysis_panel;
mod app;
mod banner;
mod chart_viewer;
mod control_panel;
mod table_view;

pub use analysis_panel::AnalysisPanel;
pub use app::DashboardApp;
pub use banner::Banner;
pub use chart_viewer::ChartViewer;
pub use control_panel::{ControlPanel, ControlPanelAction};
pub use table_view::TableView;

use egui::ComboBox;

/// Labelled drop-down over the table's column names.
pub(crate) fn column_combo(
    ui: &mut egui::Ui,
    id: &str,
    label: &str,
    label_width: f32,
    value: &mut String,
    columns: &[String],
) {
    ui.horizontal(|ui| {
        ui.add_sized([label_width, 20.0], egui::Label::new(label));
        ComboBox::from_id_salt(id)
            .width(180.0)
            .selected_text(value.as_str())
            .show_ui(ui, |ui| {
                for col in columns {
                    ui.selectable_value(value, col.clone(), col);
                }
            });
    });
}
