use crate::PaintApp;

pub fn central_panel(app: &mut PaintApp, ctx: &egui::Context) {
    egui::CentralPanel::default()
        .frame(egui::Frame::none())
        .show(ctx, |ui| {
            let available_size = ui.available_size();
            let (response, painter) = ui.allocate_painter(available_size, egui::Sense::drag());

            app.ensure_mounted(ctx, response.rect);
            app.handle_input(ctx, &response);
            app.render_canvas(ctx, &painter, response.rect);
        });
}
