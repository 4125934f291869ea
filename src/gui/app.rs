//! Growth Dashboard Main Application
//! Main window with sidebar and the upload / cleaning / analysis / chart sections.

use crate::config::AppConfig;
use crate::data::UploadedFile;
use crate::gui::{AnalysisPanel, Banner, ChartViewer, ControlPanel, ControlPanelAction, TableView};
use crate::session::Session;
use egui::{Color32, RichText, SidePanel};
use log::{info, warn};

/// Chart area height in the central panel
const CHART_HEIGHT: f32 = 380.0;

/// Main application window.
pub struct DashboardApp {
    config: AppConfig,
    session: Session,
    control_panel: ControlPanel,
    analysis_panel: AnalysisPanel,
    chart_viewer: ChartViewer,

    upload_banner: Option<Banner>,
    cleaning_banner: Option<Banner>,
}

impl DashboardApp {
    pub fn new(cc: &eframe::CreationContext<'_>, config: AppConfig) -> Self {
        Self::apply_theme(&cc.egui_ctx, config.dark_mode);
        Self {
            session: Session::new(&config),
            control_panel: ControlPanel::new(config.dark_mode),
            analysis_panel: AnalysisPanel::new(),
            chart_viewer: ChartViewer::new(),
            upload_banner: None,
            cleaning_banner: None,
            config,
        }
    }

    fn apply_theme(ctx: &egui::Context, dark_mode: bool) {
        ctx.set_visuals(if dark_mode {
            egui::Visuals::dark()
        } else {
            egui::Visuals::light()
        });
    }

    /// Handle file selection. A failed upload keeps the current table.
    fn handle_browse_file(&mut self) {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("CSV or Excel", &["csv", "xlsx"])
            .pick_file()
        else {
            return;
        };

        let file = match UploadedFile::from_path(&path) {
            Ok(file) => file,
            Err(e) => {
                warn!("Could not read {}: {}", path.display(), e);
                self.upload_banner = Some(Banner::error(format!("Error loading file: {}", e)));
                return;
            }
        };

        match self.session.ingest(&file) {
            Ok(_) => {
                self.upload_banner =
                    Some(Banner::success(format!("Successfully loaded {}", file.name)));
                self.cleaning_banner = None;
                self.chart_viewer
                    .reset_columns(self.session.default_chart_columns());
                self.analysis_panel.reset_columns(&self.session.columns());
            }
            Err(e) => {
                self.upload_banner = Some(Banner::error(format!("Error loading file: {}", e)));
            }
        }
    }

    fn handle_remove_duplicates(&mut self) {
        self.cleaning_banner = Some(match self.session.remove_duplicates() {
            Ok(removed) => Banner::success(format!("Duplicates Removed ({} rows)", removed)),
            Err(e) => Banner::error(e.to_string()),
        });
    }

    fn show_upload(&mut self, ui: &mut egui::Ui) {
        ui.label(RichText::new("📁 Upload CSV or Excel").size(16.0).strong());
        ui.add_space(5.0);

        ui.horizontal(|ui| {
            let name = self
                .session
                .source_name()
                .unwrap_or("No file selected")
                .to_string();
            ui.label(RichText::new(name).size(12.0).color(Color32::GRAY));
            if ui.button("📂 Browse").clicked() {
                self.handle_browse_file();
            }
        });

        if let Some(banner) = &self.upload_banner {
            ui.add_space(5.0);
            banner.show(ui);
        }
    }

    fn show_table_summary(&self, ui: &mut egui::Ui) {
        let Some(df) = self.session.table() else {
            return;
        };

        ui.label(format!("{} rows × {} columns", df.height(), df.width()));
        egui::CollapsingHeader::new("Preview")
            .default_open(false)
            .show(ui, |ui| {
                TableView::show(ui, "table_preview", &df.head(Some(self.config.preview_rows)));
            });
    }

    fn show_cleaning(&mut self, ui: &mut egui::Ui) {
        ui.label(RichText::new("🧹 Data Cleaning Options:").size(16.0).strong());
        ui.add_space(5.0);

        if ui.button("Remove Duplicates").clicked() {
            self.handle_remove_duplicates();
        }
        if let Some(banner) = &self.cleaning_banner {
            ui.add_space(5.0);
            banner.show(ui);
        }
    }

    fn section_break(ui: &mut egui::Ui) {
        ui.add_space(10.0);
        ui.separator();
        ui.add_space(10.0);
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Left panel - Control Panel
        SidePanel::left("control_panel")
            .min_width(260.0)
            .max_width(320.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    match self.control_panel.show(ui) {
                        ControlPanelAction::DarkModeChanged(dark) => {
                            info!("Dark mode {}", if dark { "on" } else { "off" });
                            Self::apply_theme(ctx, dark);
                        }
                        ControlPanelAction::None => {}
                    }
                });
            });

        // Central panel - dashboard sections
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    ui.heading("🧠 Growth Mindset Data Dashboard 🧠");
                    ui.label(
                        RichText::new(self.control_panel.settings.page.caption())
                            .color(Color32::GRAY),
                    );
                    Self::section_break(ui);

                    self.show_upload(ui);

                    if self.session.table().is_some() {
                        ui.add_space(5.0);
                        self.show_table_summary(ui);
                        Self::section_break(ui);

                        self.show_cleaning(ui);
                        ui.add_space(10.0);
                        self.analysis_panel
                            .show(ui, &mut self.session, self.config.preview_rows);
                        Self::section_break(ui);

                        self.chart_viewer.show(ui, &mut self.session, CHART_HEIGHT);
                    }

                    Self::section_break(ui);
                    ui.label("🚀 Thank you for using the Growth Dashboard!");
                });
        });
    }
}
