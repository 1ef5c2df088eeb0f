use eframe::egui;
use image::RgbaImage;
use log::{info, warn};
use std::fs;
use std::path::Path;

use crate::launcher::wrap::TextMeasure;

/// Name under which a custom font is registered
const CUSTOM_FONT: &str = "arcade";

/// Upload a decoded image as a texture
pub fn load_texture_from_image(ctx: &egui::Context, image: &RgbaImage, texture_id: &str) -> egui::TextureHandle {
    let size = [image.width() as _, image.height() as _];
    let pixels = image.as_flat_samples();
    ctx.load_texture(
        texture_id,
        egui::ColorImage::from_rgba_unmultiplied(size, pixels.as_slice()),
        egui::TextureOptions::LINEAR,
    )
}

/// Make the font at `path` the preferred proportional font
///
/// Returns false and keeps egui's default font when the file can't be read
/// or isn't a usable TTF/OTF font.
pub fn install_font(ctx: &egui::Context, path: &Path) -> bool {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) => {
            warn!("Font {} unavailable, using default font: {}", path.display(), e);
            return false;
        }
    };

    // egui only parses font data on the next frame and panics on bad files
    if let Err(e) = ab_glyph::FontRef::try_from_slice(&bytes) {
        warn!("Font {} is invalid, using default font: {}", path.display(), e);
        return false;
    }

    let mut fonts = egui::FontDefinitions::default();
    fonts
        .font_data
        .insert(CUSTOM_FONT.to_owned(), egui::FontData::from_owned(bytes));
    fonts
        .families
        .entry(egui::FontFamily::Proportional)
        .or_default()
        .insert(0, CUSTOM_FONT.to_owned());
    ctx.set_fonts(fonts);

    info!("Using font {}", path.display());
    true
}

/// Measures text with egui's font atlas
pub struct FontMeasure<'a> {
    pub ctx: &'a egui::Context,
    pub font: egui::FontId,
}

impl TextMeasure for FontMeasure<'_> {
    fn text_width(&self, text: &str) -> f32 {
        self.ctx.fonts(|fonts| {
            fonts
                .layout_no_wrap(text.to_owned(), self.font.clone(), egui::Color32::WHITE)
                .size()
                .x
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_frame(ctx: &egui::Context) {
        let _ = ctx.run(egui::RawInput::default(), |ctx| {
            egui::CentralPanel::default().show(ctx, |ui| ui.label("Pac-Man"));
        });
    }

    #[test]
    fn corrupt_font_keeps_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("arcade.ttf");
        fs::write(&path, b"not a font").unwrap();

        let ctx = egui::Context::default();
        assert!(!install_font(&ctx, &path));
        run_frame(&ctx);
    }

    #[test]
    fn missing_font_keeps_default() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = egui::Context::default();

        assert!(!install_font(&ctx, &dir.path().join("absent.ttf")));
        run_frame(&ctx);
    }
}
