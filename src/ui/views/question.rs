use crate::QuizApp;
use crate::model::AnswerLetter;
use crate::ui::helpers::answer_button;
use egui::{Button, CentralPanel, Context, Key, RichText, ScrollArea, TextEdit, Ui};

const SHORTCUTS: [(Key, AnswerLetter); 4] = [
    (Key::A, AnswerLetter::A),
    (Key::B, AnswerLetter::B),
    (Key::C, AnswerLetter::C),
    (Key::D, AnswerLetter::D),
];

pub fn ui_question(app: &mut QuizApp, ctx: &Context) {
    // Atajos: flechas para navegar, a-d para responder (salvo escribiendo).
    if !ctx.wants_keyboard_input() {
        let (prev, next, letter) = ctx.input(|i| {
            let letter = SHORTCUTS
                .iter()
                .find(|(key, _)| i.key_pressed(*key))
                .map(|(_, letter)| *letter);
            (
                i.key_pressed(Key::ArrowLeft),
                i.key_pressed(Key::ArrowRight),
                letter,
            )
        });
        if let Some(letter) = letter {
            app.select_answer(letter);
        }
        if prev {
            app.previous();
        } else if next {
            app.next();
        }
    }

    CentralPanel::default().show(ctx, |ui| {
        let panel_width = (ui.available_width() * 0.97).min(650.0);

        ScrollArea::vertical().show(ui, |ui| {
            ui.heading(format!("Pytanie {}", app.current_number()));
            if let Some((pos, total)) = app.replay_position() {
                ui.label(RichText::new(format!("Powtórka błędnych: {pos} / {total}")).weak());
            }
            if app.is_current_done() {
                ui.label(RichText::new("✔ zrobione").weak());
            }
            ui.add_space(10.0);

            let Some(record) = app.record() else {
                return;
            };
            ui.label(RichText::new(&record.title).size(18.0));
            ui.add_space(10.0);

            let mut chosen = None;
            for row in app.answer_rows() {
                if answer_button(ui, &row, panel_width) {
                    chosen = Some(row.letter);
                }
                ui.add_space(4.0);
            }
            if let Some(letter) = chosen {
                app.select_answer(letter);
            }

            let (image, video) = app.media_urls();
            if image.is_some() || video.is_some() {
                ui.add_space(8.0);
                ui.horizontal(|ui| {
                    if let Some(url) = &image {
                        ui.hyperlink_to("🖼 Ilustracja do pytania", url);
                    }
                    if let Some(url) = &video {
                        ui.hyperlink_to("🎬 Film do pytania", url);
                    }
                });
            }

            ui.add_space(12.0);
            nav_row(app, ui, panel_width);

            ui.add_space(10.0);
            ui.horizontal(|ui| {
                let response = ui.add(
                    TextEdit::singleline(&mut app.jump_input)
                        .hint_text("Numer pytania")
                        .desired_width(120.0),
                );
                let submitted =
                    response.lost_focus() && ui.input(|i| i.key_pressed(Key::Enter));
                if ui.button("Idź do pytania").clicked() || submitted {
                    app.jump_to_input();
                }
            });

            ui.add_space(8.0);
            if !app.message.is_empty() {
                ui.label(&app.message);
            }
        });
    });
}

/// "Wstecz" / "Dalej"; "Wstecz" se apaga en la primera pregunta o el primer fallo.
fn nav_row(app: &mut QuizApp, ui: &mut Ui, width: f32) {
    let at_start = match app.replay_position() {
        Some((pos, _)) => pos == 1,
        None => app.nav.index == 0,
    };
    let size = [(width - 8.0) / 2.0, 36.0];
    ui.horizontal(|ui| {
        if ui
            .add_enabled(!at_start, Button::new("⬅ Wstecz").min_size(size.into()))
            .clicked()
        {
            app.previous();
        }
        if ui
            .add(Button::new("Dalej ➡").min_size(size.into()))
            .clicked()
        {
            app.next();
        }
    });
}
