use super::*;
use crate::model::AnswerLetter;

/// Cómo pintar cada respuesta.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AnswerMark {
    Neutral,
    /// Elegida, pero no se sabe cuál es la correcta.
    Chosen,
    Correct,
    Wrong,
    /// La correcta, mostrada tras fallar.
    Solution,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AnswerRow<'a> {
    pub letter: AnswerLetter,
    pub text: &'a str,
    pub mark: AnswerMark,
}

impl QuizApp {
    pub fn answer_rows(&self) -> Vec<AnswerRow<'_>> {
        let Some(record) = self.record() else {
            return Vec::new();
        };
        let selected = self.selected();

        record
            .choices
            .iter()
            .map(|(letter, text)| {
                let is_correct = record.correct == Some(letter);
                let mark = match selected {
                    None => AnswerMark::Neutral,
                    Some(chosen) if chosen == letter => match record.correct {
                        None => AnswerMark::Chosen,
                        Some(_) if is_correct => AnswerMark::Correct,
                        Some(_) => AnswerMark::Wrong,
                    },
                    Some(_) if is_correct => AnswerMark::Solution,
                    Some(_) => AnswerMark::Neutral,
                };
                AnswerRow { letter, text, mark }
            })
            .collect()
    }
}
