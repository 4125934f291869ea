//! Control Panel Widget
//! Left side panel with theme toggle, sample login and navigation.

use crate::gui::Banner;
use egui::{Color32, RichText};

/// Sidebar navigation targets. Only the caption changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Page {
    #[default]
    DataCleaning,
    Visualization,
    Analysis,
}

impl Page {
    pub const ALL: [Page; 3] = [Page::DataCleaning, Page::Visualization, Page::Analysis];

    pub fn label(&self) -> &'static str {
        match self {
            Page::DataCleaning => "Data Cleaning",
            Page::Visualization => "Visualization",
            Page::Analysis => "Analysis",
        }
    }

    pub fn caption(&self) -> &'static str {
        match self {
            Page::DataCleaning => "Perform data cleaning operations here.",
            Page::Visualization => "Create advanced visualizations here.",
            Page::Analysis => "Run predictive models and analysis here.",
        }
    }
}

/// Sidebar settings
#[derive(Default, Clone)]
pub struct SidebarSettings {
    pub dark_mode: bool,
    pub username: String,
    pub password: String,
    pub page: Page,
}

/// Left side panel. The login is display-only and guards nothing.
pub struct ControlPanel {
    pub settings: SidebarSettings,
}

impl ControlPanel {
    pub fn new(dark_mode: bool) -> Self {
        Self {
            settings: SidebarSettings {
                dark_mode,
                ..Default::default()
            },
        }
    }

    pub fn login_banner(&self) -> Banner {
        if !self.settings.username.is_empty() && !self.settings.password.is_empty() {
            Banner::success("Login successful!")
        } else {
            Banner::warning("Enter username and password")
        }
    }

    /// Draw the control panel
    pub fn show(&mut self, ui: &mut egui::Ui) -> ControlPanelAction {
        let mut action = ControlPanelAction::None;

        ui.vertical_centered(|ui| {
            ui.add_space(5.0);
            ui.label(
                RichText::new("🧠 Growth Dashboard")
                    .size(20.0)
                    .color(Color32::from_rgb(100, 149, 237)),
            );
        });
        ui.add_space(10.0);

        if ui
            .checkbox(&mut self.settings.dark_mode, "Enable Dark Mode")
            .changed()
        {
            action = ControlPanelAction::DarkModeChanged(self.settings.dark_mode);
        }

        ui.add_space(10.0);
        ui.separator();
        ui.add_space(5.0);

        // ===== Authentication =====
        ui.label(RichText::new("🔐 Authentication").size(14.0).strong());
        ui.add_space(5.0);

        let label_width = 75.0;
        ui.horizontal(|ui| {
            ui.add_sized([label_width, 20.0], egui::Label::new("Username:"));
            ui.text_edit_singleline(&mut self.settings.username);
        });
        ui.horizontal(|ui| {
            ui.add_sized([label_width, 20.0], egui::Label::new("Password:"));
            ui.add(egui::TextEdit::singleline(&mut self.settings.password).password(true));
        });
        ui.add_space(5.0);
        self.login_banner().show(ui);

        ui.add_space(10.0);
        ui.separator();
        ui.add_space(5.0);

        // ===== Navigation =====
        ui.label(RichText::new("🧭 Navigation").size(14.0).strong());
        ui.add_space(5.0);
        ui.label("Go to");
        for page in Page::ALL {
            ui.radio_value(&mut self.settings.page, page, page.label());
        }

        action
    }
}

/// Actions triggered by control panel
#[derive(Debug, Clone, PartialEq)]
pub enum ControlPanelAction {
    None,
    DarkModeChanged(bool),
}
