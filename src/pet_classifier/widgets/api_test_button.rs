use crate::pet_classifier::core::ApiStatus;
use eframe::egui;

const FILL_SECONDS: f32 = 2.5;

pub fn caption(status: ApiStatus) -> &'static str {
    if status == ApiStatus::Checking {
        "Testing Connection..."
    } else {
        "Test API Connection"
    }
}

/// Returns true when clicked. While checking, a bar under the button fills up.
pub fn show(ui: &mut egui::Ui, status: ApiStatus, enabled: bool) -> bool {
    let checking = status == ApiStatus::Checking;
    let width = ui.available_width();

    let clicked = ui
        .add_enabled_ui(enabled, |ui| {
            ui.horizontal(|ui| {
                ui.set_width(width);
                let button = if checking {
                    egui::Button::new(format!("⟳ {}", caption(status)))
                } else {
                    egui::Button::new(format!("📶 {}", caption(status)))
                };
                ui.add_sized([width, 32.0], button).clicked()
            })
            .inner
        })
        .inner;

    let progress = ui.ctx().animate_value_with_time(
        egui::Id::new("api_test_button_progress"),
        if checking { 1.0 } else { 0.0 },
        FILL_SECONDS,
    );
    let (rect, _) = ui.allocate_exact_size(egui::vec2(width, 3.0), egui::Sense::hover());
    if progress > 0.0 {
        let mut filled = rect;
        filled.set_width(rect.width() * progress);
        ui.painter().rect_filled(
            filled,
            egui::CornerRadius::same(1),
            egui::Color32::from_rgb(52, 211, 153),
        );
    }

    clicked
}
