#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub mod command;
pub mod config;
pub mod error;
pub mod export;
pub mod input;
pub mod panels;
pub mod renderer;
pub mod session;
pub mod stroke;
pub mod surface;
pub mod tool_state;

pub use app::PaintApp;
pub use command::Command;
pub use config::CanvasConfig;
pub use error::{ExportError, SurfaceError};
pub use export::ExportFormat;
pub use input::{InputHandler, PointerEvent};
pub use renderer::CanvasRenderer;
pub use session::Session;
pub use surface::{DrawingSurface, RenderContext};
pub use tool_state::{THICKNESS_RANGE, ToolMode, ToolState};
