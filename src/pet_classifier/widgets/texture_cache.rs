use crate::image_data::ImageData;
use eframe::egui;

/// Decoded GPU textures for the last few images shown.
pub struct TextureCache {
    entries: Vec<(ImageData, Option<egui::TextureHandle>)>,
    capacity: usize,
    next_id: u64,
}

impl TextureCache {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: Vec::new(),
            capacity: capacity.max(1),
            next_id: 0,
        }
    }

    /// `None` when the image cannot be decoded.
    pub fn get(&mut self, ctx: &egui::Context, image: &ImageData) -> Option<egui::TextureHandle> {
        if let Some((_, texture)) = self.entries.iter().find(|(cached, _)| cached.same_as(image)) {
            return texture.clone();
        }

        let texture = image.decode_rgba().ok().map(|rgba| {
            let size = [rgba.width() as usize, rgba.height() as usize];
            let color_image = egui::ColorImage::from_rgba_unmultiplied(size, rgba.as_raw());
            self.next_id += 1;
            ctx.load_texture(
                format!("pet_image_{}", self.next_id),
                color_image,
                egui::TextureOptions::LINEAR,
            )
        });

        self.entries.push((image.clone(), texture.clone()));
        if self.entries.len() > self.capacity {
            self.entries.remove(0);
        }
        texture
    }
}

/// Draws `image` scaled to fit `max_size`, or a placeholder if it won't decode.
pub fn show_image(
    ui: &mut egui::Ui,
    textures: &mut TextureCache,
    image: &ImageData,
    max_size: egui::Vec2,
) {
    match textures.get(ui.ctx(), image) {
        Some(texture) => {
            ui.add(egui::Image::new(&texture).max_size(max_size));
        }
        None => {
            ui.add_sized(max_size, egui::Label::new("Preview unavailable"));
        }
    }
}
