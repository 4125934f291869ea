//! Table View Widget
//! Striped grid preview of a DataFrame.

use egui::RichText;
use polars::prelude::*;

/// Draws the rows of a DataFrame as a grid.
pub struct TableView;

impl TableView {
    /// Text shown for one cell; nulls render empty.
    pub fn cell_text(col: &Column, row: usize) -> String {
        match col.get(row) {
            Ok(AnyValue::Null) | Err(_) => String::new(),
            Ok(AnyValue::Float64(v)) => format!("{:.4}", v),
            Ok(AnyValue::Float32(v)) => format!("{:.4}", v),
            Ok(val) => val.to_string().trim_matches('"').to_string(),
        }
    }

    pub fn show(ui: &mut egui::Ui, id: &str, df: &DataFrame) {
        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                egui::ScrollArea::horizontal().id_salt(id).show(ui, |ui| {
                    egui::Grid::new(ui.make_persistent_id(id))
                        .striped(true)
                        .min_col_width(60.0)
                        .spacing([12.0, 4.0])
                        .show(ui, |ui| {
                            for col in df.get_columns() {
                                ui.label(RichText::new(col.name().as_str()).strong().size(12.0));
                            }
                            ui.end_row();

                            for row in 0..df.height() {
                                for col in df.get_columns() {
                                    ui.label(RichText::new(Self::cell_text(col, row)).size(12.0));
                                }
                                ui.end_row();
                            }
                        });
                });
            });
    }
}
