use crate::pet_classifier::core::ApiStatus;
use eframe::egui;

#[derive(Debug, Clone, PartialEq)]
pub struct StatusDetails {
    pub icon: &'static str,
    pub label: &'static str,
    pub description: &'static str,
    pub color: egui::Color32,
    pub background: egui::Color32,
}

pub fn details(status: ApiStatus) -> StatusDetails {
    match status {
        ApiStatus::Connected => StatusDetails {
            icon: "✔",
            label: "API Connected",
            description: "Connection to the API is working properly",
            color: egui::Color32::from_rgb(34, 197, 94),
            background: egui::Color32::from_rgb(220, 252, 231),
        },
        ApiStatus::Disconnected => StatusDetails {
            icon: "✖",
            label: "API Disconnected",
            description: "Cannot connect to the API. Please check if it's running",
            color: egui::Color32::from_rgb(239, 68, 68),
            background: egui::Color32::from_rgb(254, 226, 226),
        },
        ApiStatus::Checking => StatusDetails {
            icon: "",
            label: "Checking API",
            description: "Testing connection to the API...",
            color: egui::Color32::from_rgb(59, 130, 246),
            background: egui::Color32::from_rgb(219, 234, 254),
        },
        ApiStatus::Unknown => StatusDetails {
            icon: "?",
            label: "API Status Unknown",
            description: "API connection status has not been checked yet",
            color: egui::Color32::from_rgb(107, 114, 128),
            background: egui::Color32::from_rgb(243, 244, 246),
        },
    }
}

/// A pill-shaped badge with a tooltip.
pub fn show(ui: &mut egui::Ui, status: ApiStatus) {
    let details = details(status);

    egui::Frame::new()
        .fill(details.background)
        .corner_radius(egui::CornerRadius::same(12))
        .inner_margin(egui::Margin::symmetric(10, 4))
        .show(ui, |ui| {
            ui.horizontal(|ui| {
                if status == ApiStatus::Checking {
                    ui.add(egui::Spinner::new().size(14.0).color(details.color));
                } else {
                    ui.label(egui::RichText::new(details.icon).color(details.color).strong());
                }
                ui.label(
                    egui::RichText::new(details.label)
                        .size(13.0)
                        .color(egui::Color32::from_rgb(31, 41, 55)),
                );
            });
        })
        .response
        .on_hover_text(details.description);
}
