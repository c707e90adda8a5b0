mod central_panel;
mod toolbar;
mod tools_panel;

pub use central_panel::central_panel;
pub use toolbar::toolbar;
pub use tools_panel::tools_panel;
