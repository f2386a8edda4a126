use super::core::{ImageSource, InputMethod, Msg, State};
use super::main::{PetClassifier, Repaint};
use super::widgets::texture_cache::TextureCache;
use super::widgets::{
    api_status_indicator, api_test_button, camera_capture, image_uploader, result_card, toasts,
};
use chrono::Datelike;
use eframe::egui;
use std::sync::Arc;

const COLUMN_WIDTH: f32 = 420.0;
const ACCENT: egui::Color32 = egui::Color32::from_rgb(99, 102, 241);

pub struct PetClassifierApp {
    pet_classifier: PetClassifier,
    textures: TextureCache,
}

impl PetClassifierApp {
    pub fn new(pet_classifier: PetClassifier) -> Self {
        Self {
            pet_classifier,
            textures: TextureCache::new(4),
        }
    }
}

impl eframe::App for PetClassifierApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let state = self.pet_classifier.snapshot();
        let mut outbox = Vec::new();

        handle_file_drag(ctx, &state, &mut outbox);

        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            ui.add_space(8.0);
            ui.vertical_centered(|ui| {
                ui.heading(egui::RichText::new("🐾 Pet Classifier").color(ACCENT).strong());
            });
            ui.add_space(8.0);
        });

        egui::TopBottomPanel::bottom("footer").show(ctx, |ui| {
            ui.add_space(6.0);
            ui.vertical_centered(|ui| {
                ui.label(
                    egui::RichText::new(format!(
                        "© {} Pet Classifier. All rights reserved.",
                        chrono::Local::now().year()
                    ))
                    .small()
                    .weak(),
                );
            });
            ui.add_space(6.0);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.vertical_centered(|ui| {
                    ui.set_max_width(COLUMN_WIDTH);
                    ui.add_space(16.0);
                    classifier_panel(ui, &state, &mut self.textures, &mut outbox);
                    ui.add_space(16.0);
                });
            });
        });

        toasts::show(ctx, &state.toasts, &mut outbox);

        for msg in outbox {
            self.pet_classifier.send(msg);
        }
    }
}

impl Drop for PetClassifierApp {
    fn drop(&mut self) {
        self.pet_classifier.shutdown();
    }
}

/// Files hovering over or dropped on the window count as hitting the drop
/// zone, which only exists on the upload tab while no image is selected.
fn handle_file_drag(ctx: &egui::Context, state: &State, outbox: &mut Vec<Msg>) {
    if state.input_method != InputMethod::Upload || state.image.is_some() {
        return;
    }

    let (hovering, dropped) = ctx.input(|i| {
        (
            !i.raw.hovered_files.is_empty(),
            i.raw.dropped_files.first().cloned(),
        )
    });

    if let Some(file) = dropped {
        let source = match (file.path, file.bytes) {
            (Some(path), _) => Some(ImageSource::Path(path)),
            (None, Some(bytes)) => Some(ImageSource::Bytes(bytes)),
            (None, None) => None,
        };
        match source {
            Some(source) => outbox.push(Msg::FileDropped(source)),
            None => outbox.push(Msg::DragLeft),
        }
        return;
    }

    if hovering && !state.drag_active {
        outbox.push(Msg::DragHovered);
    } else if !hovering && state.drag_active {
        outbox.push(Msg::DragLeft);
    }
}

fn classifier_panel(
    ui: &mut egui::Ui,
    state: &State,
    textures: &mut TextureCache,
    outbox: &mut Vec<Msg>,
) {
    ui.horizontal(|ui| {
        ui.label(
            egui::RichText::new("Pet Classifier")
                .size(18.0)
                .color(egui::Color32::from_gray(60)),
        );
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            api_status_indicator::show(ui, state.api_status);
        });
    });
    ui.add_space(12.0);

    egui::Frame::new()
        .fill(ui.visuals().panel_fill)
        .stroke(egui::Stroke::new(1.0, egui::Color32::from_gray(220)))
        .corner_radius(egui::CornerRadius::same(8))
        .show(ui, |ui| {
            egui::Frame::new()
                .fill(ACCENT)
                .corner_radius(egui::CornerRadius {
                    nw: 8,
                    ne: 8,
                    sw: 0,
                    se: 0,
                })
                .inner_margin(egui::Margin::same(16))
                .show(ui, |ui| {
                    ui.set_width(ui.available_width());
                    ui.vertical(|ui| {
                        ui.label(
                            egui::RichText::new("Image Classification")
                                .size(18.0)
                                .color(egui::Color32::WHITE),
                        );
                        ui.label(
                            egui::RichText::new("Upload or capture an image to classify")
                                .small()
                                .color(egui::Color32::from_white_alpha(200)),
                        );
                    });
                });

            egui::Frame::new()
                .inner_margin(egui::Margin::same(16))
                .show(ui, |ui| {
                    input_tabs(ui, state.input_method, outbox);
                    ui.add_space(12.0);
                    match state.input_method {
                        InputMethod::Upload => image_uploader::show(ui, state, textures, outbox),
                        InputMethod::Camera => camera_capture::show(ui, state, textures, outbox),
                    }
                });
        });

    if let Some(error) = &state.error {
        ui.add_space(16.0);
        error_alert(ui, error);
    }

    if let (Some(result), Some(image)) = (&state.result, &state.image) {
        ui.add_space(16.0);
        result_card::show(ui, textures, result, image);
    }

    ui.add_space(16.0);
    let width = ui.available_width();

    let classify = if state.is_classifying() {
        egui::Button::new(egui::RichText::new("⟳ Processing...").color(egui::Color32::WHITE))
    } else {
        egui::Button::new(egui::RichText::new("Classify Image").color(egui::Color32::WHITE))
    };
    if ui
        .add_enabled(state.can_classify(), classify.fill(ACCENT).min_size(egui::vec2(width, 40.0)))
        .clicked()
    {
        outbox.push(Msg::ClassifyClicked);
    }

    if state.image.is_some() {
        ui.add_space(8.0);
        if ui
            .add(egui::Button::new("Reset").min_size(egui::vec2(width, 32.0)))
            .clicked()
        {
            outbox.push(Msg::ResetClicked);
        }
    }

    ui.add_space(8.0);
    if api_test_button::show(ui, state.api_status, state.can_test_api()) {
        outbox.push(Msg::ApiCheckRequested);
    }
}

fn input_tabs(ui: &mut egui::Ui, selected: InputMethod, outbox: &mut Vec<Msg>) {
    let tab_width = (ui.available_width() - ui.spacing().item_spacing.x) / 2.0;
    ui.horizontal(|ui| {
        for (method, title) in [
            (InputMethod::Upload, "Upload Image"),
            (InputMethod::Camera, "Use Camera"),
        ] {
            let tab = egui::Button::new(title)
                .selected(selected == method)
                .min_size(egui::vec2(tab_width, 30.0));
            if ui.add(tab).clicked() && selected != method {
                outbox.push(Msg::InputMethodSelected(method));
            }
        }
    });
}

fn error_alert(ui: &mut egui::Ui, error: &str) {
    let red = egui::Color32::from_rgb(220, 38, 38);
    egui::Frame::new()
        .fill(egui::Color32::from_rgb(254, 242, 242))
        .stroke(egui::Stroke::new(1.0, red))
        .corner_radius(egui::CornerRadius::same(6))
        .inner_margin(egui::Margin::same(12))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.horizontal_wrapped(|ui| {
                ui.label(egui::RichText::new("⚠").color(red));
                ui.label(egui::RichText::new(error).color(red));
            });
        });
}

/// Opens the window and runs until it is closed. The message loop starts
/// once the window exists so it can request repaints.
pub fn run_gui(pet_classifier: PetClassifier) -> Result<(), eframe::Error> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Pet Classifier")
            .with_inner_size([520.0, 820.0])
            .with_min_inner_size([380.0, 560.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Pet Classifier",
        options,
        Box::new(move |cc| {
            cc.egui_ctx.set_visuals(egui::Visuals::light());

            let ctx = cc.egui_ctx.clone();
            let repaint: Repaint = Arc::new(move || ctx.request_repaint());
            pet_classifier.start(repaint)?;

            Ok(Box::new(PetClassifierApp::new(pet_classifier)))
        }),
    )
}
