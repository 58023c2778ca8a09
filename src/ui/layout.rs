use crate::QuizApp;
use egui::{Button, Context, ScrollArea, Ui, Visuals};

pub fn top_panel(app: &mut QuizApp, ctx: &Context) {
    egui::TopBottomPanel::top("menu_panel").show(ctx, |ui| {
        ui.horizontal_centered(|ui| {
            if app.in_replay_mode() {
                if ui.button("⏹ Zakończ powtórkę").clicked() {
                    app.exit_replay_mode();
                }
            } else if ui
                .button(format!(
                    "🔁 Powtórz błędne ({})",
                    app.progress.wrong_answers().len()
                ))
                .clicked()
            {
                app.enter_replay_mode();
            }

            let label = if app.prefs.show_side_panel {
                "Ukryj listy"
            } else {
                "Pokaż listy"
            };
            if ui.button(label).clicked() {
                app.prefs.show_side_panel = !app.prefs.show_side_panel;
            }
        });
    });
}

pub fn bottom_panel(app: &mut QuizApp, ctx: &Context) {
    egui::TopBottomPanel::bottom("bottom_panel").show(ctx, |ui| {
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if ui.button("🌙 Tryb ciemny").clicked() {
                ctx.set_visuals(Visuals::dark());
                app.prefs.dark_mode = true;
            }
            if ui.button("☀ Tryb jasny").clicked() {
                ctx.set_visuals(Visuals::light());
                app.prefs.dark_mode = false;
            }
        });
    });
}

/// Listas de preguntas falladas y hechas; un clic abre la pregunta.
pub fn side_panel(app: &mut QuizApp, ctx: &Context) {
    let mut clicked = None;

    egui::SidePanel::right("side_panel")
        .resizable(false)
        .default_width(200.0)
        .show(ctx, |ui| {
            ui.heading(format!(
                "Niepoprawne odpowiedzi {}:",
                app.progress.wrong_answers().len()
            ));
            question_list(
                ui,
                "wrong_list",
                app.progress.wrong_answers(),
                app.nav.index,
                &mut clicked,
            );

            ui.separator();
            ui.heading(format!(
                "Zrobione pytania {}:",
                app.progress.done_questions().len()
            ));
            question_list(
                ui,
                "done_list",
                app.progress.done_questions(),
                app.nav.index,
                &mut clicked,
            );
        });

    if let Some(index) = clicked {
        app.open_question(index);
    }
}

fn question_list(
    ui: &mut Ui,
    id: &str,
    indices: &[usize],
    current: usize,
    clicked: &mut Option<usize>,
) {
    if indices.is_empty() {
        ui.label("Brak");
        return;
    }
    ScrollArea::vertical()
        .id_salt(id)
        .max_height(ui.available_height() / 2.0)
        .show(ui, |ui| {
            for &index in indices {
                let button =
                    Button::new(format!("Pytanie {}", index + 1)).selected(index == current);
                if ui.add(button).clicked() {
                    *clicked = Some(index);
                }
            }
        });
}
