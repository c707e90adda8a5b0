use crate::PaintApp;
use crate::command::Command;

/// Title plus the Save and Clear actions
pub fn toolbar(app: &mut PaintApp, ctx: &egui::Context) {
    let mut commands = Vec::new();

    egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
        ui.horizontal(|ui| {
            ui.heading(&app.config().title);

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.button("🗑 Clear").clicked() {
                    commands.push(Command::Clear);
                }
                if ui.button("💾 Save").clicked() {
                    commands.push(app.save_command());
                }
            });
        });
    });

    for command in commands {
        app.execute_command(command);
    }
}
