//! Status Banners
//! Success / warning / error messages shown under each dashboard section.

use egui::{Color32, RichText};

const SUCCESS_COLOR: Color32 = Color32::from_rgb(40, 167, 69);
const WARNING_COLOR: Color32 = Color32::from_rgb(255, 193, 7);
const ERROR_COLOR: Color32 = Color32::from_rgb(220, 53, 69);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BannerLevel {
    Success,
    Warning,
    Error,
}

/// Outcome message of one user action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Banner {
    pub level: BannerLevel,
    pub message: String,
}

impl Banner {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: BannerLevel::Success,
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            level: BannerLevel::Warning,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: BannerLevel::Error,
            message: message.into(),
        }
    }

    fn style(&self) -> (&'static str, Color32) {
        match self.level {
            BannerLevel::Success => ("✅", SUCCESS_COLOR),
            BannerLevel::Warning => ("⚠", WARNING_COLOR),
            BannerLevel::Error => ("❌", ERROR_COLOR),
        }
    }

    pub fn show(&self, ui: &mut egui::Ui) {
        let (icon, color) = self.style();
        egui::Frame::none()
            .fill(color.gamma_multiply(0.15))
            .stroke(egui::Stroke::new(1.0, color))
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                ui.set_width(ui.available_width());
                ui.label(RichText::new(format!("{} {}", icon, self.message)).color(color));
            });
    }
}
