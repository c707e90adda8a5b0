use crate::command::Command;
use crate::config::CanvasConfig;
use crate::error::SurfaceError;
use crate::export::ExportFormat;
use crate::input::InputHandler;
use crate::panels::{central_panel, toolbar, tools_panel};
use crate::renderer::CanvasRenderer;
use crate::session::Session;

pub struct PaintApp {
    config: CanvasConfig,
    session: Session,
    renderer: CanvasRenderer,
    input: InputHandler,
    canvas_rect: Option<egui::Rect>,
    // Set once the buffer could not be allocated so we don't retry every frame
    mount_failed: bool,
}

impl Default for PaintApp {
    fn default() -> Self {
        Self::with_config(CanvasConfig::default())
    }
}

impl PaintApp {
    /// Called once before the first frame.
    pub fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        Self::default()
    }

    pub fn with_config(config: CanvasConfig) -> Self {
        let session = Session::new(&config);
        Self {
            config,
            session,
            renderer: CanvasRenderer::new(),
            input: InputHandler::new(),
            canvas_rect: None,
            mount_failed: false,
        }
    }

    pub fn config(&self) -> &CanvasConfig {
        &self.config
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Screen rectangle the canvas occupied in the last frame
    pub fn canvas_rect(&self) -> Option<egui::Rect> {
        self.canvas_rect
    }

    pub fn execute_command(&mut self, command: Command) {
        log::debug!("Executing command: {}", command.name());
        command.execute(&mut self.session);
    }

    /// What the toolbar's Save button runs
    pub fn save_command(&self) -> Command {
        Command::Save {
            format: ExportFormat::Png,
            file_name: self.config.export_file_name.clone(),
        }
    }

    /// Mounts the surface the first time the canvas area has a usable size
    pub fn ensure_mounted(&mut self, ctx: &egui::Context, canvas_rect: egui::Rect) {
        if self.session.is_mounted() || self.mount_failed {
            return;
        }

        match self.session.mount(canvas_rect.size(), ctx.pixels_per_point()) {
            Ok(()) => {}
            // Not laid out yet (minimized window, hidden web canvas); try next frame
            Err(err @ SurfaceError::InvalidDimensions { .. }) => {
                log::debug!("Canvas not ready to mount: {}", err);
            }
            Err(err @ SurfaceError::AllocationFailed { .. }) => {
                log::error!("Failed to initialize the drawing surface: {}", err);
                self.mount_failed = true;
            }
        }
    }

    /// Feeds this frame's pointer events on the canvas widget to the session,
    /// in arrival order
    pub fn handle_input(&mut self, ctx: &egui::Context, response: &egui::Response) {
        self.canvas_rect = Some(response.rect);
        for event in self.input.process_input(ctx, response) {
            self.session.handle_pointer(event);
        }
    }

    pub fn render_canvas(
        &mut self,
        ctx: &egui::Context,
        painter: &egui::Painter,
        rect: egui::Rect,
    ) {
        self.renderer.render(ctx, painter, rect, self.session.surface());
    }

    /// Lays out one frame of the whole UI
    pub fn ui(&mut self, ctx: &egui::Context) {
        // Side panels first so the central panel gets the remaining space
        toolbar(self, ctx);
        tools_panel(self, ctx);
        central_panel(self, ctx);
    }
}

impl eframe::App for PaintApp {
    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.ui(ctx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::{Rect, pos2, vec2};

    #[test]
    fn test_zero_sized_canvas_retries_mount() {
        let ctx = egui::Context::default();
        let mut app = PaintApp::default();

        app.ensure_mounted(&ctx, Rect::from_min_size(pos2(0.0, 40.0), vec2(0.0, 0.0)));
        assert!(!app.session().is_mounted());

        app.ensure_mounted(&ctx, Rect::from_min_size(pos2(0.0, 40.0), vec2(64.0, 48.0)));
        assert!(app.session().is_mounted());
        assert_eq!(app.session().surface().logical_size(), Some(vec2(64.0, 48.0)));
    }

    #[test]
    fn test_save_command_uses_configured_file_name() {
        let app = PaintApp::default();
        assert_eq!(
            app.save_command(),
            Command::Save {
                format: ExportFormat::Png,
                file_name: "drawing.png".to_owned(),
            }
        );
    }
}
