use egui::Slider;
use egui::color_picker::{Alpha, color_edit_button_srgba};

use crate::PaintApp;
use crate::command::Command;
use crate::tool_state::{THICKNESS_RANGE, ToolMode};

pub fn tools_panel(app: &mut PaintApp, ctx: &egui::Context) {
    // Work on a copy; every change goes through a command
    let tools = *app.session().tools();
    let mut commands = Vec::new();

    egui::TopBottomPanel::bottom("tools_panel").show(ctx, |ui| {
        ui.horizontal_centered(|ui| {
            let mut stroke_color = tools.stroke_color();
            ui.label("Color:");
            if color_edit_button_srgba(ui, &mut stroke_color, Alpha::Opaque).changed() {
                commands.push(Command::SetStrokeColor(stroke_color));
            }

            ui.separator();

            let mut background_color = tools.background_color();
            ui.label("Background:");
            if color_edit_button_srgba(ui, &mut background_color, Alpha::Opaque).changed() {
                commands.push(Command::SetBackgroundColor(background_color));
            }

            ui.separator();

            let is_eraser = tools.mode() == ToolMode::Eraser;
            let icon = if is_eraser { "⌫ Eraser" } else { "🖌 Brush" };
            if ui.selectable_label(is_eraser, icon).clicked() {
                commands.push(Command::ToggleMode);
            }

            ui.separator();

            let mut thickness = tools.thickness();
            ui.label(format!("Thickness: {}px", thickness));
            if ui
                .add(Slider::new(&mut thickness, THICKNESS_RANGE).step_by(1.0).show_value(false))
                .changed()
            {
                commands.push(Command::SetThickness(i32::from(thickness)));
            }
        });
    });

    for command in commands {
        app.execute_command(command);
    }
}
