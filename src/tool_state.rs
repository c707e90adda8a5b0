use std::ops::RangeInclusive;

use egui::Color32;

use crate::config::CanvasConfig;

/// Allowed brush thickness in logical pixels
pub const THICKNESS_RANGE: RangeInclusive<u8> = 1..=20;

/// What the pointer paints with
#[derive(Debug, Default, PartialEq, Eq, Clone, Copy)]
pub enum ToolMode {
    #[default]
    Brush,
    /// Paints in the background color
    Eraser,
}

impl ToolMode {
    pub fn is_eraser(self) -> bool {
        self == ToolMode::Eraser
    }

    pub fn toggled(self) -> Self {
        match self {
            ToolMode::Brush => ToolMode::Eraser,
            ToolMode::Eraser => ToolMode::Brush,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ToolMode::Brush => "Brush",
            ToolMode::Eraser => "Eraser",
        }
    }
}

/// Current tool configuration.
///
/// Setters only assign (after clamping/normalizing); pushing the values into
/// the drawing surface is the job of [`crate::Session::apply_configuration`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToolState {
    stroke_color: Color32,
    background_color: Color32,
    thickness: u8,
    mode: ToolMode,
}

impl Default for ToolState {
    fn default() -> Self {
        Self::from_config(&CanvasConfig::default())
    }
}

impl ToolState {
    pub fn from_config(config: &CanvasConfig) -> Self {
        let mut state = Self {
            stroke_color: Color32::BLACK,
            background_color: Color32::WHITE,
            thickness: *THICKNESS_RANGE.start(),
            mode: ToolMode::Brush,
        };
        state.set_stroke_color(config.stroke_color);
        state.set_background_color(config.background_color);
        state.set_thickness(config.thickness);
        state
    }

    pub fn stroke_color(&self) -> Color32 {
        self.stroke_color
    }

    pub fn set_stroke_color(&mut self, color: Color32) {
        self.stroke_color = opaque(color);
    }

    pub fn background_color(&self) -> Color32 {
        self.background_color
    }

    pub fn set_background_color(&mut self, color: Color32) {
        self.background_color = opaque(color);
    }

    pub fn thickness(&self) -> u8 {
        self.thickness
    }

    /// Stores `px` clamped into [`THICKNESS_RANGE`] and returns the stored value
    pub fn set_thickness(&mut self, px: i32) -> u8 {
        let min = i32::from(*THICKNESS_RANGE.start());
        let max = i32::from(*THICKNESS_RANGE.end());
        // in range after the clamp, so the cast is lossless
        self.thickness = px.clamp(min, max) as u8;
        self.thickness
    }

    pub fn mode(&self) -> ToolMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: ToolMode) {
        self.mode = mode;
    }

    pub fn toggle_mode(&mut self) -> ToolMode {
        self.mode = self.mode.toggled();
        self.mode
    }

    pub fn is_eraser(&self) -> bool {
        self.mode.is_eraser()
    }

    /// The color the next segment will actually be painted with
    pub fn effective_color(&self) -> Color32 {
        if self.is_eraser() {
            self.background_color
        } else {
            self.stroke_color
        }
    }
}

// Erasing paints the background, so neither color may carry transparency.
fn opaque(color: Color32) -> Color32 {
    Color32::from_rgb(color.r(), color.g(), color.b())
}
