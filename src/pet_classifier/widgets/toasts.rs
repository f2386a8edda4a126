use super::status_animation::{self, Outcome};
use crate::pet_classifier::core::{Msg, Toast, ToastVariant};
use eframe::egui;

const TOAST_WIDTH: f32 = 320.0;

fn outcome(variant: ToastVariant) -> Outcome {
    match variant {
        ToastVariant::Success => Outcome::Success,
        ToastVariant::Failure => Outcome::Failure,
    }
}

/// Stacks toasts in the bottom-right corner, newest at the bottom.
pub fn show(ctx: &egui::Context, toasts: &[Toast], outbox: &mut Vec<Msg>) {
    if toasts.is_empty() {
        return;
    }

    egui::Area::new(egui::Id::new("toasts"))
        .anchor(egui::Align2::RIGHT_BOTTOM, egui::vec2(-16.0, -16.0))
        .order(egui::Order::Foreground)
        .show(ctx, |ui| {
            ui.set_width(TOAST_WIDTH);
            for toast in toasts {
                toast_frame(ui, toast, outbox);
                ui.add_space(8.0);
            }
        });
}

fn toast_frame(ui: &mut egui::Ui, toast: &Toast, outbox: &mut Vec<Msg>) {
    let outcome = outcome(toast.variant);

    egui::Frame::popup(ui.style())
        .stroke(egui::Stroke::new(1.0, outcome.color().gamma_multiply(0.5)))
        .inner_margin(egui::Margin::same(12))
        .show(ui, |ui| {
            ui.set_width(TOAST_WIDTH - 24.0);
            ui.horizontal_top(|ui| {
                status_animation::show(ui, egui::Id::new(("toast", toast.id)), outcome, 28.0);
                ui.vertical(|ui| {
                    ui.set_width(TOAST_WIDTH - 90.0);
                    ui.label(egui::RichText::new(&toast.title).strong());
                    ui.label(&toast.description);
                });
                if ui.small_button("✖").on_hover_text("Dismiss").clicked() {
                    outbox.push(Msg::ToastDismissed(toast.id));
                }
            });
        });
}
