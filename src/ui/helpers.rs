// src/ui/helpers.rs
use crate::app::{AnswerMark, AnswerRow};
use egui::{Button, Color32, RichText, Ui, Vec2};

const GREEN: Color32 = Color32::from_rgb(46, 125, 50);

fn mark_fill(ui: &Ui, mark: AnswerMark) -> Option<Color32> {
    match mark {
        AnswerMark::Neutral => None,
        AnswerMark::Chosen => Some(ui.visuals().selection.bg_fill),
        AnswerMark::Correct | AnswerMark::Solution => Some(GREEN),
        AnswerMark::Wrong => Some(Color32::DARK_RED),
    }
}

/// Botón de respuesta a ancho completo, coloreado según la marca.
pub fn answer_button(ui: &mut Ui, row: &AnswerRow<'_>, width: f32) -> bool {
    let mut text = RichText::new(format!("{}. {}", row.letter, row.text));
    if mark_fill(ui, row.mark).is_some() {
        text = text.color(Color32::WHITE);
    }
    if row.mark == AnswerMark::Solution {
        text = text.strong();
    }

    let mut button = Button::new(text).wrap().min_size(Vec2::new(width, 36.0));
    if let Some(fill) = mark_fill(ui, row.mark) {
        button = button.fill(fill);
    }
    ui.add(button).clicked()
}
