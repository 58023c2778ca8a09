use serde::{Deserialize, Serialize};
use std::fmt;

/// Una de las cuatro respuestas de una pregunta del examen.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AnswerLetter {
    A,
    B,
    C,
    D,
}

impl AnswerLetter {
    pub const ALL: [AnswerLetter; 4] = [
        AnswerLetter::A,
        AnswerLetter::B,
        AnswerLetter::C,
        AnswerLetter::D,
    ];

    /// Sin distinguir mayúsculas; solo acepta `a`..`d`.
    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_lowercase() {
            'a' => Some(AnswerLetter::A),
            'b' => Some(AnswerLetter::B),
            'c' => Some(AnswerLetter::C),
            'd' => Some(AnswerLetter::D),
            _ => None,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            AnswerLetter::A => 'a',
            AnswerLetter::B => 'b',
            AnswerLetter::C => 'c',
            AnswerLetter::D => 'd',
        }
    }

    fn slot(self) -> usize {
        match self {
            AnswerLetter::A => 0,
            AnswerLetter::B => 1,
            AnswerLetter::C => 2,
            AnswerLetter::D => 3,
        }
    }

    /// Id del elemento de la respuesta en el HTML (`odpa`..`odpd`).
    pub fn element_id(self) -> &'static str {
        match self {
            AnswerLetter::A => "odpa",
            AnswerLetter::B => "odpb",
            AnswerLetter::C => "odpc",
            AnswerLetter::D => "odpd",
        }
    }
}

impl fmt::Display for AnswerLetter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char().to_ascii_uppercase())
    }
}

/// Los cuatro textos de respuesta, indexados por letra.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Choices([String; 4]);

impl Choices {
    pub fn new(a: String, b: String, c: String, d: String) -> Self {
        Self([a, b, c, d])
    }

    pub fn text(&self, letter: AnswerLetter) -> &str {
        &self.0[letter.slot()]
    }

    pub fn iter(&self) -> impl Iterator<Item = (AnswerLetter, &str)> {
        AnswerLetter::ALL
            .into_iter()
            .map(move |letter| (letter, self.text(letter)))
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct QuestionRecord {
    pub index: usize, // base cero; el servidor numera desde 1
    pub title: String,
    pub choices: Choices,
    pub image: Option<String>,
    pub video: Option<String>,
    pub correct: Option<AnswerLetter>,
}

impl QuestionRecord {
    /// Si no se conoce la correcta, nunca cuenta como fallo.
    pub fn is_wrong(&self, selected: AnswerLetter) -> bool {
        self.correct.is_some_and(|correct| correct != selected)
    }
}

/// Ciclo de vida de la pregunta en pantalla.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum QuestionPhase {
    #[default]
    Loading,
    Ready(QuestionRecord),
    Answered {
        record: QuestionRecord,
        selected: AnswerLetter,
    },
}

impl QuestionPhase {
    pub fn record(&self) -> Option<&QuestionRecord> {
        match self {
            QuestionPhase::Loading => None,
            QuestionPhase::Ready(record) => Some(record),
            QuestionPhase::Answered { record, .. } => Some(record),
        }
    }

    pub fn selected(&self) -> Option<AnswerLetter> {
        match self {
            QuestionPhase::Answered { selected, .. } => Some(*selected),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum NavMode {
    #[default]
    Sequential,
    /// Solo la lista de fallos; `cursor` apunta dentro de ella.
    Replay { cursor: usize },
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Navigation {
    pub index: usize,
    pub mode: NavMode,
}

/// Pista relativa que se envía junto al número de pregunta.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Direction {
    Back,
    #[default]
    Stay,
    Forward,
}

impl Direction {
    pub fn as_form_value(self) -> &'static str {
        match self {
            Direction::Back => "-1",
            Direction::Stay => "0",
            Direction::Forward => "1",
        }
    }
}

/// Preferencias de interfaz guardadas por eframe.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct UiPrefs {
    pub dark_mode: bool,
    pub show_side_panel: bool,
}

impl Default for UiPrefs {
    fn default() -> Self {
        Self {
            dark_mode: true,
            show_side_panel: true,
        }
    }
}
