// src/renderer.rs
use egui::{Color32, ColorImage, Rect, TextureHandle, TextureOptions, pos2};

use crate::surface::DrawingSurface;

/// Mirrors the drawing surface's pixel buffer into an egui texture
#[derive(Default)]
pub struct CanvasRenderer {
    texture: Option<TextureHandle>,
    uploaded_version: Option<u64>,
}

impl std::fmt::Debug for CanvasRenderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CanvasRenderer")
            .field("has_texture", &self.texture.is_some())
            .field("uploaded_version", &self.uploaded_version)
            .finish()
    }
}

impl CanvasRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Re-uploads the buffer only when the surface changed since the last frame
    ///
    /// Returns true when an upload happened.
    pub fn sync(&mut self, ctx: &egui::Context, surface: &DrawingSurface) -> bool {
        let version = surface.version();
        if self.texture.is_some() && self.uploaded_version == Some(version) {
            return false;
        }

        let (Some([width, height]), Some(data)) =
            (surface.physical_size(), surface.premultiplied_data())
        else {
            return false;
        };

        let image = ColorImage::from_rgba_premultiplied([width as usize, height as usize], data);
        match &mut self.texture {
            Some(handle) => handle.set(image, TextureOptions::LINEAR),
            None => {
                self.texture = Some(ctx.load_texture("canvas", image, TextureOptions::LINEAR));
            }
        }
        self.uploaded_version = Some(version);
        true
    }

    /// Paints the canvas at its logical size, anchored at the top left of `rect`
    pub fn render(
        &mut self,
        ctx: &egui::Context,
        painter: &egui::Painter,
        rect: Rect,
        surface: &DrawingSurface,
    ) {
        self.sync(ctx, surface);

        let (Some(texture), Some(logical_size)) = (&self.texture, surface.logical_size()) else {
            return;
        };

        let canvas_rect = Rect::from_min_size(rect.min, logical_size);
        let uv = Rect::from_min_max(pos2(0.0, 0.0), pos2(1.0, 1.0));
        painter.image(texture.id(), canvas_rect, uv, Color32::WHITE);
    }

    pub fn uploaded_version(&self) -> Option<u64> {
        self.uploaded_version
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::pos2;

    #[test]
    fn test_sync_skips_unmounted_surface() {
        let ctx = egui::Context::default();
        let mut renderer = CanvasRenderer::new();
        assert!(!renderer.sync(&ctx, &DrawingSurface::new()));
        assert!(renderer.uploaded_version().is_none());
    }

    #[test]
    fn test_sync_uploads_only_on_change() {
        let ctx = egui::Context::default();
        let mut renderer = CanvasRenderer::new();
        let mut surface = DrawingSurface::new();
        surface.initialize(10.0, 10.0, 1.0, Color32::WHITE).unwrap();

        assert!(renderer.sync(&ctx, &surface));
        assert!(!renderer.sync(&ctx, &surface));

        surface.set_thickness(2.0);
        surface.begin_stroke(pos2(1.0, 1.0));
        surface.extend_stroke(pos2(8.0, 8.0));
        assert!(renderer.sync(&ctx, &surface));
        assert_eq!(renderer.uploaded_version(), Some(surface.version()));
    }
}
