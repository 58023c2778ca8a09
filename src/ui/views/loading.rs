use crate::QuizApp;
use egui::{CentralPanel, Context, RichText, Spinner};

/// Se queda aquí mientras no haya pregunta, también tras un error de red.
pub fn ui_loading(app: &mut QuizApp, ctx: &Context) {
    CentralPanel::default().show(ctx, |ui| {
        ui.add_space((ui.available_height() / 3.0).max(0.0));
        ui.vertical_centered(|ui| {
            ui.heading(format!("Pytanie {}", app.current_number()));
            ui.add_space(20.0);
            ui.add(Spinner::new());
            ui.add_space(10.0);
            ui.label(RichText::new("Ładowanie pytania...").italics());
            if !app.message.is_empty() {
                ui.add_space(8.0);
                ui.label(&app.message);
            }
        });
    });
}
