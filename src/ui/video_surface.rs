use eframe::egui;

use crate::player::FrameSlot;

/// Draws the latest engine frame on a black surface, letterboxed to
/// preserve the media aspect ratio.
pub struct VideoSurface {
    frame_slot: FrameSlot,
    texture: Option<egui::TextureHandle>,
    frame_size: [usize; 2],
}

impl VideoSurface {
    pub fn new(frame_slot: FrameSlot) -> Self {
        VideoSurface {
            frame_slot,
            texture: None,
            frame_size: [0, 0],
        }
    }

    /// Clears the held texture, e.g. after stop or playlist clear.
    pub fn reset(&mut self) {
        self.texture = None;
        self.frame_size = [0, 0];
    }

    fn upload_latest(&mut self, ctx: &egui::Context) {
        let Some(frame) = self.frame_slot.lock().ok().and_then(|mut slot| slot.take()) else {
            return;
        };
        let size = [frame.width as usize, frame.height as usize];
        let image = egui::ColorImage::from_rgba_unmultiplied(size, &frame.data);
        match &mut self.texture {
            Some(texture) if self.frame_size == size => {
                texture.set(image, egui::TextureOptions::LINEAR);
            }
            _ => {
                self.texture =
                    Some(ctx.load_texture("video_frame", image, egui::TextureOptions::LINEAR));
                self.frame_size = size;
            }
        }
    }

    pub fn show(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        self.upload_latest(ctx);

        let rect = ui.available_rect_before_wrap();
        let painter = ui.painter_at(rect);
        painter.rect_filled(rect, 0.0, egui::Color32::BLACK);

        if let Some(texture) = &self.texture {
            let [w, h] = self.frame_size;
            if w > 0 && h > 0 {
                let scale = (rect.width() / w as f32).min(rect.height() / h as f32);
                let size = egui::vec2(w as f32 * scale, h as f32 * scale);
                let image_rect = egui::Rect::from_center_size(rect.center(), size);
                painter.image(
                    texture.id(),
                    image_rect,
                    egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
                    egui::Color32::WHITE,
                );
            }
        }

        ui.allocate_rect(rect, egui::Sense::hover());
    }
}
