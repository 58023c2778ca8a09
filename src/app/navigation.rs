use super::*;
use crate::config::{MAX_QUESTION_NUMBER, parse_question_number};
use crate::model::NavMode;

impl QuizApp {
    pub fn in_replay_mode(&self) -> bool {
        matches!(self.nav.mode, NavMode::Replay { .. })
    }

    /// "Dalej": siguiente pregunta, o siguiente fallo en modo repaso.
    pub fn next(&mut self) {
        match self.nav.mode {
            NavMode::Sequential => {
                if self.current_number() >= MAX_QUESTION_NUMBER {
                    return;
                }
                self.load_question(self.nav.index + 1, Direction::Stay);
            }
            NavMode::Replay { cursor } => self.move_replay_cursor(cursor.saturating_add(1)),
        }
    }

    /// "Wstecz": nunca baja de la primera pregunta ni del primer fallo.
    pub fn previous(&mut self) {
        match self.nav.mode {
            NavMode::Sequential => {
                if self.nav.index == 0 {
                    return;
                }
                self.load_question(self.nav.index - 1, Direction::Stay);
            }
            NavMode::Replay { cursor } => self.move_replay_cursor(cursor.saturating_sub(1)),
        }
    }

    /// Salto a `number` (desde 1): número de pregunta, o posición en la
    /// lista de fallos en modo repaso. `0` y los números fuera de rango no valen.
    pub fn jump_to(&mut self, number: usize) {
        if number == 0 {
            self.message = "Numer pytania musi być dodatni.".into();
            return;
        }
        if number > MAX_QUESTION_NUMBER {
            self.message = format!("Numer pytania nie może przekraczać {MAX_QUESTION_NUMBER}.");
            return;
        }
        match self.nav.mode {
            NavMode::Sequential => self.load_question(number - 1, Direction::Stay),
            NavMode::Replay { .. } => {
                let last = self.progress.wrong_answers().len().saturating_sub(1);
                self.set_replay_cursor((number - 1).min(last));
            }
        }
    }

    /// Botón "Idź do pytania" con el texto del cuadro de salto.
    pub fn jump_to_input(&mut self) {
        match parse_question_number(&self.jump_input) {
            Some(number) => {
                self.jump_input.clear();
                self.jump_to(number);
            }
            None => {
                log::debug!("Salto rechazado: {:?}", self.jump_input);
                self.message = "Podaj dodatnią liczbę całkowitą.".into();
            }
        }
    }

    /// Clic en el panel lateral.
    pub fn open_question(&mut self, index: usize) {
        if self.in_replay_mode() {
            let pos = self.progress.wrong_answers().iter().position(|&i| i == index);
            if let Some(pos) = pos {
                self.set_replay_cursor(pos);
                return;
            }
            self.nav.mode = NavMode::Sequential;
        }
        self.load_question(index, Direction::Stay);
    }

    /// Solo se permite si hay algún fallo guardado.
    pub fn enter_replay_mode(&mut self) {
        if self.progress.wrong_answers().is_empty() {
            self.message = "Brak błędnych odpowiedzi do powtórzenia.".into();
            return;
        }
        log::info!(
            "Modo repaso: {} preguntas falladas",
            self.progress.wrong_answers().len()
        );
        self.set_replay_cursor(0);
    }

    pub fn exit_replay_mode(&mut self) {
        self.nav.mode = NavMode::Sequential;
        self.message.clear();
    }

    fn move_replay_cursor(&mut self, target: usize) {
        let NavMode::Replay { cursor } = self.nav.mode else {
            return;
        };
        let last = self.progress.wrong_answers().len().saturating_sub(1);
        let target = target.min(last);
        if target != cursor {
            self.set_replay_cursor(target);
        }
    }

    fn set_replay_cursor(&mut self, cursor: usize) {
        let Some(&index) = self.progress.wrong_answers().get(cursor) else {
            return;
        };
        self.nav.mode = NavMode::Replay { cursor };
        self.load_question(index, Direction::Stay);
    }
}
