use super::*;
use crate::model::{AnswerLetter, NavMode, QuestionRecord};

impl QuizApp {
    /// Número visible (desde 1) de la pregunta actual.
    pub fn current_number(&self) -> usize {
        self.nav.index.saturating_add(1)
    }

    pub fn record(&self) -> Option<&QuestionRecord> {
        self.phase.record()
    }

    pub fn selected(&self) -> Option<AnswerLetter> {
        self.phase.selected()
    }

    pub fn is_current_done(&self) -> bool {
        self.progress.is_done(self.nav.index)
    }

    /// `(posición desde 1, total)` dentro de la lista de fallos.
    pub fn replay_position(&self) -> Option<(usize, usize)> {
        match self.nav.mode {
            NavMode::Replay { cursor } => {
                Some((cursor + 1, self.progress.wrong_answers().len()))
            }
            NavMode::Sequential => None,
        }
    }

    pub fn media_urls(&self) -> (Option<String>, Option<String>) {
        let Some(record) = self.record() else {
            return (None, None);
        };
        let resolve = |src: &String| crate::extract::resolve_media_url(src, &self.config.media_base);
        (record.image.as_ref().map(resolve), record.video.as_ref().map(resolve))
    }
}
