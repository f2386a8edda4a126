use super::texture_cache::{show_image, TextureCache};
use crate::pet_classifier::core::{Msg, State};
use eframe::egui;

const DROP_ZONE_HEIGHT: f32 = 180.0;

pub fn show(ui: &mut egui::Ui, state: &State, textures: &mut TextureCache, outbox: &mut Vec<Msg>) {
    match &state.image {
        Some(image) => {
            ui.vertical_centered(|ui| {
                show_image(ui, textures, image, egui::vec2(ui.available_width(), 220.0));
                ui.add_space(8.0);
                if ui
                    .add_enabled(!state.is_classifying(), egui::Button::new("Change Image"))
                    .clicked()
                {
                    outbox.push(Msg::ImageCleared);
                }
            });
        }
        None => drop_zone(ui, state.drag_active, outbox),
    }
}

fn drop_zone(ui: &mut egui::Ui, drag_active: bool, outbox: &mut Vec<Msg>) {
    let (rect, response) = ui.allocate_exact_size(
        egui::vec2(ui.available_width(), DROP_ZONE_HEIGHT),
        egui::Sense::click(),
    );

    let (border, fill) = if drag_active {
        (
            egui::Color32::from_rgb(59, 130, 246),
            egui::Color32::from_rgb(239, 246, 255),
        )
    } else if response.hovered() {
        (egui::Color32::from_gray(140), egui::Color32::from_gray(250))
    } else {
        (egui::Color32::from_gray(190), egui::Color32::TRANSPARENT)
    };

    let painter = ui.painter_at(rect);
    painter.rect_filled(rect, egui::CornerRadius::same(8), fill);

    let outline = rect.shrink(1.0);
    let corners = vec![
        outline.left_top(),
        outline.right_top(),
        outline.right_bottom(),
        outline.left_bottom(),
        outline.left_top(),
    ];
    painter.extend(egui::Shape::dashed_line(
        &corners,
        egui::Stroke::new(2.0, border),
        8.0,
        5.0,
    ));

    let mut content = ui.new_child(
        egui::UiBuilder::new()
            .max_rect(rect.shrink(16.0))
            .layout(egui::Layout::top_down(egui::Align::Center)),
    );
    content.add_space(28.0);
    content.label(egui::RichText::new("⬆").size(28.0).color(egui::Color32::from_gray(130)));
    content.add_space(6.0);
    content.horizontal(|ui| {
        ui.spacing_mut().item_spacing.x = 4.0;
        ui.label("Drag and drop an image, or");
        if ui.link("browse").clicked() {
            outbox.push(Msg::BrowseClicked);
        }
    });
    content.label(
        egui::RichText::new("Supported formats: JPG, PNG, GIF")
            .small()
            .color(egui::Color32::from_gray(120)),
    );

    if response.clicked() {
        outbox.push(Msg::BrowseClicked);
    }
}
