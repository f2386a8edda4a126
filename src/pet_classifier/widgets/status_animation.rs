use eframe::egui;

const SCALE_IN_SECONDS: f64 = 0.35;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    Failure,
}

impl Outcome {
    pub fn color(self) -> egui::Color32 {
        match self {
            Outcome::Success => egui::Color32::from_rgb(34, 197, 94),
            Outcome::Failure => egui::Color32::from_rgb(239, 68, 68),
        }
    }
}

/// When each animated widget was first shown. Widgets missing from the
/// previous pass are forgotten.
#[derive(Debug, Clone, Default)]
struct AppearStarts(Vec<(egui::Id, f64, u64)>);

impl AppearStarts {
    fn touch(&mut self, id: egui::Id, now: f64, pass: u64) -> f64 {
        self.0
            .retain(|(_, _, seen)| pass.saturating_sub(*seen) <= 1);
        match self.0.iter_mut().find(|(known, _, _)| *known == id) {
            Some((_, started, seen)) => {
                *seen = pass;
                *started
            }
            None => {
                self.0.push((id, now, pass));
                now
            }
        }
    }
}

/// Goes from 0 to 1 over `seconds`, counted from the first frame `id` was
/// seen. Keeps requesting repaints until done.
pub fn appear(ctx: &egui::Context, id: egui::Id, seconds: f64) -> f32 {
    let now = ctx.input(|i| i.time);
    let pass = ctx.cumulative_pass_nr();
    let first_seen = ctx.data_mut(|data| {
        data.get_temp_mut_or_default::<AppearStarts>(egui::Id::new("appear_starts"))
            .touch(id, now, pass)
    });
    let progress = ease_out(((now - first_seen) / seconds).clamp(0.0, 1.0) as f32);
    if progress < 1.0 {
        ctx.request_repaint();
    }
    progress
}

fn ease_out(t: f32) -> f32 {
    1.0 - (1.0 - t).powi(3)
}

/// A filled circle that scales in, then a check mark or cross on top.
pub fn show(ui: &mut egui::Ui, id: egui::Id, outcome: Outcome, diameter: f32) {
    let (rect, _) = ui.allocate_exact_size(egui::vec2(diameter, diameter), egui::Sense::hover());
    let scale = appear(ui.ctx(), id, SCALE_IN_SECONDS);

    let painter = ui.painter();
    let center = rect.center();
    let radius = diameter / 2.0 * scale;
    painter.circle_filled(center, radius, outcome.color());

    if scale < 0.6 {
        return;
    }

    let stroke = egui::Stroke::new(diameter / 10.0, egui::Color32::WHITE);
    let r = radius * 0.45;
    match outcome {
        Outcome::Success => {
            let points = vec![
                center + egui::vec2(-r, 0.0),
                center + egui::vec2(-r * 0.3, r * 0.7),
                center + egui::vec2(r, -r * 0.6),
            ];
            painter.add(egui::Shape::line(points, stroke));
        }
        Outcome::Failure => {
            painter.line_segment([center + egui::vec2(-r, -r), center + egui::vec2(r, r)], stroke);
            painter.line_segment([center + egui::vec2(r, -r), center + egui::vec2(-r, r)], stroke);
        }
    }
}
