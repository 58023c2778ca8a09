use super::*;
use crate::remote::{LoadRequest, LoadResult};

impl QuizApp {
    /// Pide la pregunta `index` (base cero). La pantalla pasa a "Ładowanie"
    /// hasta que llegue una respuesta con el último token emitido.
    pub fn load_question(&mut self, index: usize, direction: Direction) {
        self.latest_token += 1;
        self.nav.index = index;
        self.phase = QuestionPhase::Loading;
        self.message.clear();

        let request = LoadRequest {
            token: self.latest_token,
            index,
            direction,
        };
        log::debug!(
            "Pidiendo pregunta {} (token {})",
            request.number(),
            request.token
        );
        self.source.dispatch(request, self.reply_tx.clone());
    }

    /// Recoge las respuestas pendientes; se llama en cada frame.
    pub fn poll_loads(&mut self) {
        while let Ok(outcome) = self.reply_rx.try_recv() {
            self.apply_outcome(outcome);
        }
    }

    pub fn apply_outcome(&mut self, outcome: LoadOutcome) {
        if outcome.token != self.latest_token {
            log::debug!(
                "Respuesta obsoleta para la pregunta {} (token {} != {})",
                outcome.index + 1,
                outcome.token,
                self.latest_token
            );
            return;
        }

        match outcome.result {
            LoadResult::Loaded(record) => {
                self.phase = QuestionPhase::Ready(record);
            }
            // En ambos casos la pantalla se queda cargando, sin reintentos.
            LoadResult::NotFound => {
                log::warn!(
                    "La respuesta para la pregunta {} no contiene ninguna pregunta",
                    outcome.index + 1
                );
            }
            LoadResult::Failed(err) => {
                log::error!("Error cargando la pregunta {}: {err}", outcome.index + 1);
            }
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.phase, QuestionPhase::Loading)
    }
}
