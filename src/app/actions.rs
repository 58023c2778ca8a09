use super::*;
use crate::model::AnswerLetter;

impl QuizApp {
    /// Marca la respuesta elegida. Solo vale con la pregunta lista y sin responder.
    pub fn select_answer(&mut self, letter: AnswerLetter) {
        let QuestionPhase::Ready(record) = &self.phase else {
            log::debug!("Respuesta {letter} ignorada: la pregunta no está lista");
            return;
        };
        let record = record.clone();
        let index = self.nav.index;

        let mut changed = false;
        if record.is_wrong(letter) {
            changed |= self.progress.record_wrong(index);
        }
        changed |= self.progress.record_done(index);
        if changed {
            self.persist_progress();
        }

        self.phase = QuestionPhase::Answered {
            record,
            selected: letter,
        };
    }

    fn persist_progress(&mut self) {
        if let Err(err) = self.progress.save(self.store.as_mut()) {
            log::error!("No se pudo guardar el progreso: {err}");
        }
    }
}
