use egui::{Color32, Vec2};

use crate::config::CanvasConfig;
use crate::error::{ExportResult, SurfaceError};
use crate::export::ExportFormat;
use crate::input::PointerEvent;
use crate::surface::DrawingSurface;
use crate::tool_state::{ToolMode, ToolState};

/// Ties the tool configuration to the drawing surface.
///
/// Tool state never touches the surface on its own; every mutation made here
/// is followed by an explicit [`Self::apply_configuration`].
#[derive(Debug, Default)]
pub struct Session {
    tools: ToolState,
    surface: DrawingSurface,
}

impl Session {
    pub fn new(config: &CanvasConfig) -> Self {
        Self {
            tools: ToolState::from_config(config),
            surface: DrawingSurface::new(),
        }
    }

    /// Brings up the surface at `logical_size`, painted with the current background
    pub fn mount(
        &mut self,
        logical_size: Vec2,
        device_pixel_ratio: f32,
    ) -> Result<(), SurfaceError> {
        self.surface.initialize(
            logical_size.x,
            logical_size.y,
            device_pixel_ratio,
            self.tools.background_color(),
        )?;
        self.apply_configuration();
        Ok(())
    }

    pub fn is_mounted(&self) -> bool {
        self.surface.is_initialized()
    }

    /// Pushes every tool setting into the surface's rendering context
    pub fn apply_configuration(&mut self) {
        self.surface.set_stroke_color(self.tools.stroke_color());
        self.surface.set_background_color(self.tools.background_color());
        self.surface.set_thickness(f32::from(self.tools.thickness()));
        self.surface.set_eraser_mode(self.tools.is_eraser());
    }

    pub fn handle_pointer(&mut self, event: PointerEvent) {
        match event {
            PointerEvent::Down { position } => self.surface.begin_stroke(position),
            PointerEvent::Move { position } => self.surface.extend_stroke(position),
            PointerEvent::Up | PointerEvent::Leave => self.surface.end_stroke(),
        }
    }

    pub fn set_stroke_color(&mut self, color: Color32) {
        self.tools.set_stroke_color(color);
        log::debug!("Stroke color set to {:?}", self.tools.stroke_color());
        self.apply_configuration();
    }

    /// Switches the background and immediately repaints the whole canvas with it
    pub fn set_background_color(&mut self, color: Color32) {
        self.tools.set_background_color(color);
        log::debug!("Background color set to {:?}", self.tools.background_color());
        self.surface.repaint_background(self.tools.background_color());
        self.apply_configuration();
    }

    pub fn set_mode(&mut self, mode: ToolMode) {
        self.tools.set_mode(mode);
        log::debug!("Tool mode set to {}", mode.label());
        self.apply_configuration();
    }

    pub fn toggle_mode(&mut self) -> ToolMode {
        let mode = self.tools.toggle_mode();
        log::debug!("Tool mode toggled to {}", mode.label());
        self.apply_configuration();
        mode
    }

    /// Returns the thickness actually stored after clamping
    pub fn set_thickness(&mut self, px: i32) -> u8 {
        let stored = self.tools.set_thickness(px);
        if i32::from(stored) != px {
            log::debug!("Thickness {} clamped to {}", px, stored);
        }
        self.apply_configuration();
        stored
    }

    /// Wipes the canvas back to the current background
    pub fn clear(&mut self) {
        log::info!("Clearing canvas");
        self.surface.repaint_background(self.tools.background_color());
    }

    pub fn export_image(&self, format: ExportFormat) -> ExportResult<Vec<u8>> {
        self.surface.export_image(format)
    }

    pub fn tools(&self) -> &ToolState {
        &self.tools
    }

    pub fn surface(&self) -> &DrawingSurface {
        &self.surface
    }
}
