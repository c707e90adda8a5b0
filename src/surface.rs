use egui::{Color32, Pos2, Vec2};
use image::{Rgba, RgbaImage};
use tiny_skia::{LineCap, LineJoin, Paint, PathBuilder, Pixmap, Transform};

use crate::error::{ExportError, ExportResult, SurfaceError};
use crate::export::{self, ExportFormat};
use crate::stroke::{ActiveStroke, Segment};

/// Mutable drawing parameters applied to every newly rasterized segment
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderContext {
    stroke_color: Color32,
    background_color: Color32,
    line_width: f32,
    line_cap: LineCap,
    line_join: LineJoin,
    eraser: bool,
    transform: Transform,
}

impl RenderContext {
    fn new(ratio: f32, background_color: Color32) -> Self {
        Self {
            stroke_color: Color32::BLACK,
            background_color,
            line_width: 1.0,
            line_cap: LineCap::Round,
            line_join: LineJoin::Round,
            eraser: false,
            transform: Transform::from_scale(ratio, ratio),
        }
    }

    pub fn stroke_color(&self) -> Color32 {
        self.stroke_color
    }

    pub fn background_color(&self) -> Color32 {
        self.background_color
    }

    /// Line width in logical pixels
    pub fn line_width(&self) -> f32 {
        self.line_width
    }

    pub fn line_cap(&self) -> LineCap {
        self.line_cap
    }

    pub fn is_eraser(&self) -> bool {
        self.eraser
    }

    /// Eraser mode paints with the background, never with transparency
    pub fn effective_color(&self) -> Color32 {
        if self.eraser {
            self.background_color
        } else {
            self.stroke_color
        }
    }

    fn paint(&self) -> Paint<'static> {
        let color = self.effective_color();
        let mut paint = Paint::default();
        paint.set_color_rgba8(color.r(), color.g(), color.b(), color.a());
        paint.anti_alias = true;
        paint
    }

    fn stroke(&self) -> tiny_skia::Stroke {
        tiny_skia::Stroke {
            width: self.line_width,
            line_cap: self.line_cap,
            line_join: self.line_join,
            ..Default::default()
        }
    }
}

/// Everything that only exists once the surface is mounted
struct Canvas {
    pixmap: Pixmap,
    logical_size: Vec2,
    context: RenderContext,
    stroke: Option<ActiveStroke>,
    version: u64,
}

// Custom Debug implementation to keep the pixel data out of logs
impl std::fmt::Debug for Canvas {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Canvas")
            .field("width", &self.pixmap.width())
            .field("height", &self.pixmap.height())
            .field("logical_size", &self.logical_size)
            .field("context", &self.context)
            .field("stroke", &self.stroke)
            .field("version", &self.version)
            .finish()
    }
}

impl Canvas {
    fn fill(&mut self, color: Color32) {
        self.pixmap.fill(to_skia_color(color));
        self.invalidate();
    }

    fn rasterize(&mut self, segment: Segment) {
        if segment.is_degenerate() {
            return;
        }

        let mut builder = PathBuilder::new();
        builder.move_to(segment.from.x, segment.from.y);
        builder.line_to(segment.to.x, segment.to.y);
        let Some(path) = builder.finish() else {
            log::warn!("Skipping unrenderable segment {:?}", segment);
            return;
        };

        let paint = self.context.paint();
        let stroke = self.context.stroke();
        self.pixmap
            .stroke_path(&path, &paint, &stroke, self.context.transform, None);
        self.invalidate();
    }

    fn invalidate(&mut self) {
        self.version += 1;
    }
}

/// The raster canvas together with its rendering context.
///
/// Coordinates passed in are logical (CSS-like) pixels; the buffer itself is
/// `logical size × device pixel ratio` and the ratio is applied as a scale
/// transform. Every operation is a silent no-op until [`Self::initialize`]
/// has succeeded.
#[derive(Debug, Default)]
pub struct DrawingSurface {
    canvas: Option<Canvas>,
}

impl DrawingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocates the pixel buffer and fills it with `background`.
    ///
    /// Only the first successful call has any effect.
    pub fn initialize(
        &mut self,
        logical_width: f32,
        logical_height: f32,
        device_pixel_ratio: f32,
        background: Color32,
    ) -> Result<(), SurfaceError> {
        if self.canvas.is_some() {
            log::warn!("Drawing surface is already initialized, ignoring");
            return Ok(());
        }

        let invalid = |v: f32| !v.is_finite() || v <= 0.0;
        if invalid(logical_width) || invalid(logical_height) || invalid(device_pixel_ratio) {
            return Err(SurfaceError::InvalidDimensions {
                width: logical_width,
                height: logical_height,
                ratio: device_pixel_ratio,
            });
        }

        let width = physical_extent(logical_width, device_pixel_ratio);
        let height = physical_extent(logical_height, device_pixel_ratio);
        let pixmap =
            Pixmap::new(width, height).ok_or(SurfaceError::AllocationFailed { width, height })?;

        let mut canvas = Canvas {
            pixmap,
            logical_size: Vec2::new(logical_width, logical_height),
            context: RenderContext::new(device_pixel_ratio, background),
            stroke: None,
            version: 0,
        };
        canvas.fill(background);

        log::info!(
            "Drawing surface ready: {}x{} logical, {}x{} physical",
            logical_width,
            logical_height,
            width,
            height
        );
        self.canvas = Some(canvas);
        Ok(())
    }

    pub fn is_initialized(&self) -> bool {
        self.canvas.is_some()
    }

    /// Starts a new path at `point` without painting anything
    pub fn begin_stroke(&mut self, point: Pos2) {
        if let Some(canvas) = &mut self.canvas {
            log::trace!("Stroke begins at {:?}", point);
            canvas.stroke = Some(ActiveStroke::begin(point));
        }
    }

    /// Draws from the pen position to `point`; ignored when no stroke is active
    pub fn extend_stroke(&mut self, point: Pos2) {
        let Some(canvas) = &mut self.canvas else {
            return;
        };
        let Some(stroke) = &mut canvas.stroke else {
            return;
        };

        let segment = stroke.advance(point);
        canvas.rasterize(segment);
    }

    pub fn end_stroke(&mut self) {
        if let Some(canvas) = &mut self.canvas {
            if let Some(stroke) = canvas.stroke.take() {
                log::trace!(
                    "Stroke ended at {:?} after {} segments",
                    stroke.current(),
                    stroke.segment_count()
                );
            }
        }
    }

    pub fn is_stroke_active(&self) -> bool {
        self.canvas.as_ref().is_some_and(|c| c.stroke.is_some())
    }

    pub fn set_stroke_color(&mut self, color: Color32) {
        if let Some(canvas) = &mut self.canvas {
            canvas.context.stroke_color = color;
        }
    }

    /// Sets the line width in logical pixels
    pub fn set_thickness(&mut self, px: f32) {
        if let Some(canvas) = &mut self.canvas {
            canvas.context.line_width = px;
        }
    }

    pub fn set_eraser_mode(&mut self, enabled: bool) {
        if let Some(canvas) = &mut self.canvas {
            canvas.context.eraser = enabled;
        }
    }

    /// Changes the erase color without touching any pixel
    pub fn set_background_color(&mut self, color: Color32) {
        if let Some(canvas) = &mut self.canvas {
            canvas.context.background_color = color;
        }
    }

    /// Fills the whole buffer with `color`, discarding everything drawn so far
    pub fn repaint_background(&mut self, color: Color32) {
        if let Some(canvas) = &mut self.canvas {
            canvas.context.background_color = color;
            canvas.fill(color);
        }
    }

    /// Encodes the current buffer at full device resolution
    pub fn export_image(&self, format: ExportFormat) -> ExportResult<Vec<u8>> {
        let snapshot = self.snapshot().ok_or(ExportError::NotInitialized)?;
        export::encode(&snapshot, format)
    }

    /// Point-in-time copy of the buffer with straight (non-premultiplied) alpha
    pub fn snapshot(&self) -> Option<RgbaImage> {
        let canvas = self.canvas.as_ref()?;
        let width = canvas.pixmap.width();
        let pixels = canvas.pixmap.pixels();
        Some(RgbaImage::from_fn(width, canvas.pixmap.height(), |x, y| {
            let color = pixels[(y * width + x) as usize].demultiply();
            Rgba([color.red(), color.green(), color.blue(), color.alpha()])
        }))
    }

    /// Reads one pixel in physical (buffer) coordinates
    pub fn pixel(&self, x: u32, y: u32) -> Option<Color32> {
        let color = self.canvas.as_ref()?.pixmap.pixel(x, y)?.demultiply();
        Some(Color32::from_rgba_unmultiplied(
            color.red(),
            color.green(),
            color.blue(),
            color.alpha(),
        ))
    }

    /// Premultiplied RGBA bytes, row-major, as the GPU texture expects them
    pub fn premultiplied_data(&self) -> Option<&[u8]> {
        self.canvas.as_ref().map(|c| c.pixmap.data())
    }

    pub fn physical_size(&self) -> Option<[u32; 2]> {
        self.canvas
            .as_ref()
            .map(|c| [c.pixmap.width(), c.pixmap.height()])
    }

    pub fn logical_size(&self) -> Option<Vec2> {
        self.canvas.as_ref().map(|c| c.logical_size)
    }

    pub fn context(&self) -> Option<&RenderContext> {
        self.canvas.as_ref().map(|c| &c.context)
    }

    /// Bumped on every pixel mutation
    pub fn version(&self) -> u64 {
        self.canvas.as_ref().map_or(0, |c| c.version)
    }
}

fn physical_extent(logical: f32, ratio: f32) -> u32 {
    // saturating float-to-int cast; oversized requests fail in Pixmap::new
    ((logical * ratio).ceil() as u32).max(1)
}

fn to_skia_color(color: Color32) -> tiny_skia::Color {
    let [r, g, b, a] = color.to_srgba_unmultiplied();
    tiny_skia::Color::from_rgba8(r, g, b, a)
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::pos2;

    fn mounted(background: Color32) -> DrawingSurface {
        let mut surface = DrawingSurface::new();
        surface.initialize(40.0, 30.0, 2.0, background).unwrap();
        surface
    }

    #[test]
    fn test_operations_before_mount_are_noops() {
        let mut surface = DrawingSurface::new();
        surface.begin_stroke(pos2(1.0, 1.0));
        surface.extend_stroke(pos2(5.0, 5.0));
        surface.end_stroke();
        surface.set_thickness(4.0);
        surface.repaint_background(Color32::RED);

        assert!(!surface.is_initialized());
        assert!(!surface.is_stroke_active());
        assert_eq!(surface.version(), 0);
        assert!(surface.pixel(0, 0).is_none());
        assert!(matches!(
            surface.export_image(ExportFormat::Png),
            Err(ExportError::NotInitialized)
        ));
    }

    #[test]
    fn test_initialize_scales_buffer() {
        let surface = mounted(Color32::WHITE);
        assert_eq!(surface.physical_size(), Some([80, 60]));
        assert_eq!(surface.logical_size(), Some(Vec2::new(40.0, 30.0)));

        let context = surface.context().unwrap();
        assert_eq!(context.line_cap(), LineCap::Round);
        assert_eq!(context.background_color(), Color32::WHITE);
    }

    #[test]
    fn test_initialize_rejects_bad_dimensions() {
        let mut surface = DrawingSurface::new();
        assert!(surface.initialize(0.0, 10.0, 1.0, Color32::WHITE).is_err());
        assert!(surface.initialize(10.0, 10.0, f32::NAN, Color32::WHITE).is_err());
        assert!(!surface.is_initialized());
    }

    #[test]
    fn test_second_initialize_is_ignored() {
        let mut surface = mounted(Color32::WHITE);
        surface
            .initialize(10.0, 10.0, 1.0, Color32::BLACK)
            .unwrap();
        assert_eq!(surface.physical_size(), Some([80, 60]));
        assert_eq!(surface.pixel(0, 0), Some(Color32::WHITE));
    }

    #[test]
    fn test_begin_stroke_paints_nothing() {
        let mut surface = mounted(Color32::WHITE);
        let version = surface.version();
        surface.begin_stroke(pos2(10.0, 10.0));
        surface.extend_stroke(pos2(10.0, 10.0));

        assert!(surface.is_stroke_active());
        assert_eq!(surface.version(), version);
    }

    #[test]
    fn test_end_stroke_is_idempotent() {
        let mut surface = mounted(Color32::WHITE);
        surface.begin_stroke(pos2(1.0, 1.0));
        surface.end_stroke();
        surface.end_stroke();
        assert!(!surface.is_stroke_active());
    }

    #[test]
    fn test_effective_color_in_context() {
        let mut surface = mounted(Color32::WHITE);
        surface.set_stroke_color(Color32::RED);
        surface.set_eraser_mode(true);
        assert_eq!(surface.context().unwrap().effective_color(), Color32::WHITE);

        surface.set_background_color(Color32::BLUE);
        assert_eq!(surface.context().unwrap().effective_color(), Color32::BLUE);
        // The buffer itself is untouched by a context change
        assert_eq!(surface.pixel(0, 0), Some(Color32::WHITE));
    }
}
