use super::texture_cache::{show_image, TextureCache};
use crate::pet_classifier::core::{CameraState, Msg, State};
use eframe::egui;

const PREVIEW_HEIGHT: f32 = 220.0;

pub fn can_capture(camera: &CameraState) -> bool {
    matches!(
        camera,
        CameraState::Ready {
            preview: Some(_),
            ..
        }
    )
}

pub fn show(ui: &mut egui::Ui, state: &State, textures: &mut TextureCache, outbox: &mut Vec<Msg>) {
    ui.vertical_centered(|ui| {
        let size = egui::vec2(ui.available_width(), PREVIEW_HEIGHT);

        if let Some(image) = &state.image {
            show_image(ui, textures, image, size);
            ui.add_space(8.0);
            if ui
                .add_enabled(!state.is_classifying(), egui::Button::new("Take Another Photo"))
                .clicked()
            {
                outbox.push(Msg::ImageCleared);
            }
            return;
        }

        match &state.camera {
            CameraState::Ready {
                preview: Some(preview),
                ..
            } => show_image(ui, textures, preview, size),
            CameraState::Failed { reason } => {
                placeholder(ui, size, |ui| {
                    ui.label(
                        egui::RichText::new("Camera unavailable")
                            .color(egui::Color32::from_rgb(220, 38, 38)),
                    );
                    ui.label(egui::RichText::new(reason).small());
                });
            }
            CameraState::Off | CameraState::Starting | CameraState::Ready { .. } => {
                placeholder(ui, size, |ui| {
                    ui.spinner();
                    ui.label("Loading camera...");
                });
            }
        }

        ui.add_space(8.0);
        if ui
            .add_enabled(can_capture(&state.camera), egui::Button::new("📷 Capture Photo"))
            .clicked()
        {
            outbox.push(Msg::CaptureClicked);
        }
    });
}

fn placeholder(ui: &mut egui::Ui, size: egui::Vec2, add_contents: impl FnOnce(&mut egui::Ui)) {
    egui::Frame::new()
        .fill(egui::Color32::from_gray(30))
        .corner_radius(egui::CornerRadius::same(8))
        .show(ui, |ui| {
            ui.set_min_size(size);
            ui.set_max_width(size.x);
            ui.vertical_centered(|ui| {
                ui.add_space(size.y / 2.0 - 24.0);
                ui.visuals_mut().override_text_color = Some(egui::Color32::from_gray(220));
                add_contents(ui);
            });
        });
}
