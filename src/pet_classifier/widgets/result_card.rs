use super::status_animation::appear;
use super::texture_cache::{show_image, TextureCache};
use crate::image_classifier::interface::Label;
use crate::image_data::ImageData;
use crate::pet_classifier::core::PredictionResult;
use eframe::egui;

const BAR_SECONDS: f64 = 1.0;

pub struct LabelColors {
    pub accent: egui::Color32,
    pub background: egui::Color32,
}

pub fn label_colors(label: Label) -> LabelColors {
    match label {
        Label::Cat => LabelColors {
            accent: egui::Color32::from_rgb(147, 51, 234),
            background: egui::Color32::from_rgb(243, 232, 255),
        },
        Label::Dog => LabelColors {
            accent: egui::Color32::from_rgb(217, 119, 6),
            background: egui::Color32::from_rgb(254, 243, 199),
        },
        Label::Human => LabelColors {
            accent: egui::Color32::from_rgb(37, 99, 235),
            background: egui::Color32::from_rgb(219, 234, 254),
        },
    }
}

/// `0.9534` -> `"95.3%"`
pub fn format_confidence(confidence: f32) -> String {
    format!("{:.1}%", confidence * 100.0)
}

pub fn show(
    ui: &mut egui::Ui,
    textures: &mut TextureCache,
    result: &PredictionResult,
    image: &ImageData,
) {
    let colors = label_colors(result.label);

    egui::Frame::new()
        .fill(colors.background)
        .stroke(egui::Stroke::new(1.0, colors.accent.gamma_multiply(0.4)))
        .corner_radius(egui::CornerRadius::same(8))
        .inner_margin(egui::Margin::same(12))
        .show(ui, |ui| {
            ui.horizontal(|ui| {
                ui.label(egui::RichText::new("Classification Result").strong());
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(
                        egui::RichText::new(result.label.display_name())
                            .color(colors.accent)
                            .strong()
                            .size(16.0),
                    );
                });
            });
            ui.add_space(8.0);

            ui.vertical_centered(|ui| {
                show_image(ui, textures, image, egui::vec2(ui.available_width(), 180.0));
            });
            ui.add_space(8.0);

            ui.horizontal(|ui| {
                ui.label("Confidence");
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(egui::RichText::new(format_confidence(result.confidence)).strong());
                });
            });

            let id = egui::Id::new((
                "result_card_confidence",
                image.as_str().as_ptr() as usize,
                result.label,
                result.confidence.to_bits(),
            ));
            let progress = appear(ui.ctx(), id, BAR_SECONDS);
            ui.add(
                egui::ProgressBar::new(result.confidence * progress)
                    .desired_height(8.0)
                    .fill(colors.accent),
            );
        });
}
