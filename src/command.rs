use egui::Color32;

use crate::error::ExportError;
use crate::export::{self, ExportFormat};
use crate::session::Session;
use crate::tool_state::ToolMode;

/// Actions the toolbar controls can request
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    SetStrokeColor(Color32),
    /// Also repaints the whole canvas with the new color
    SetBackgroundColor(Color32),
    SetMode(ToolMode),
    ToggleMode,
    SetThickness(i32),
    /// Repaint with the current background
    Clear,
    /// Export as `format` and hand the file to the user under `file_name`
    Save {
        format: ExportFormat,
        file_name: String,
    },
}

impl Command {
    pub fn execute(&self, session: &mut Session) {
        match self {
            Command::SetStrokeColor(color) => session.set_stroke_color(*color),
            Command::SetBackgroundColor(color) => session.set_background_color(*color),
            Command::SetMode(mode) => session.set_mode(*mode),
            Command::ToggleMode => {
                session.toggle_mode();
            }
            Command::SetThickness(px) => {
                session.set_thickness(*px);
            }
            Command::Clear => session.clear(),
            Command::Save { format, file_name } => save(session, *format, file_name),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Command::SetStrokeColor(_) => "Set Stroke Color",
            Command::SetBackgroundColor(_) => "Set Background Color",
            Command::SetMode(_) => "Set Mode",
            Command::ToggleMode => "Toggle Mode",
            Command::SetThickness(_) => "Set Thickness",
            Command::Clear => "Clear",
            Command::Save { .. } => "Save",
        }
    }
}

fn save(session: &Session, format: ExportFormat, file_name: &str) {
    let result = session
        .export_image(format)
        .and_then(|bytes| export::deliver(&bytes, file_name, format));

    match result {
        Ok(()) => {}
        Err(ExportError::NotInitialized) => {
            log::debug!("Save requested before the canvas was mounted");
        }
        Err(err) => log::error!("Failed to save {}: {}", file_name, err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CanvasConfig;
    use egui::vec2;

    #[test]
    fn test_commands_update_tool_state() {
        let mut session = Session::new(&CanvasConfig::default());
        session.mount(vec2(20.0, 20.0), 1.0).unwrap();

        Command::SetStrokeColor(Color32::RED).execute(&mut session);
        Command::SetThickness(99).execute(&mut session);
        Command::ToggleMode.execute(&mut session);

        assert_eq!(session.tools().stroke_color(), Color32::RED);
        assert_eq!(session.tools().thickness(), 20);
        assert_eq!(session.tools().mode(), ToolMode::Eraser);

        let context = session.surface().context().unwrap();
        assert_eq!(context.line_width(), 20.0);
        assert!(context.is_eraser());
    }

    #[test]
    fn test_save_before_mount_is_silent() {
        let mut session = Session::new(&CanvasConfig::default());
        let file_name = std::env::temp_dir().join("kids_canvas_unmounted.png");
        let _ = std::fs::remove_file(&file_name);

        Command::Save {
            format: ExportFormat::Png,
            file_name: file_name.display().to_string(),
        }
        .execute(&mut session);

        assert!(!file_name.exists());
    }

    #[test]
    fn test_save_writes_png() {
        let mut session = Session::new(&CanvasConfig::default());
        session.mount(vec2(12.0, 8.0), 1.0).unwrap();
        let file_name = std::env::temp_dir().join("kids_canvas_save_test.png");

        Command::Save {
            format: ExportFormat::Png,
            file_name: file_name.display().to_string(),
        }
        .execute(&mut session);

        let saved = image::open(&file_name).unwrap().to_rgba8();
        assert_eq!(saved.dimensions(), (12, 8));
        assert!(saved.pixels().all(|p| p.0 == [255, 255, 255, 255]));
        let _ = std::fs::remove_file(&file_name);
    }
}
