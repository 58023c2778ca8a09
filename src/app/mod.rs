use crate::config::ExamConfig;
use crate::model::{Direction, Navigation, QuestionPhase, UiPrefs};
use crate::remote::{LoadOutcome, QuestionSource, RemoteSource};
use crate::storage::{KeyValueStore, ProgressSets, open_default_store};
use std::sync::mpsc::{Receiver, Sender, channel};

// Submódulos
pub mod actions;
pub mod loading;
pub mod navigation;
pub mod queries;
pub mod view_models;


pub use view_models::{AnswerMark, AnswerRow};

pub struct QuizApp {
    pub config: ExamConfig,
    pub nav: Navigation,
    pub phase: QuestionPhase,
    pub progress: ProgressSets,
    pub prefs: UiPrefs,
    pub jump_input: String, // texto del cuadro "Numer pytania"
    pub message: String,
    latest_token: u64,
    source: Box<dyn QuestionSource>,
    store: Box<dyn KeyValueStore>,
    reply_tx: Sender<LoadOutcome>,
    reply_rx: Receiver<LoadOutcome>,
}

impl QuizApp {
    /// Lee el progreso guardado y pide la primera pregunta.
    pub fn new(
        config: ExamConfig,
        source: Box<dyn QuestionSource>,
        store: Box<dyn KeyValueStore>,
    ) -> Self {
        let progress = ProgressSets::load(store.as_ref());
        log::info!(
            "Progreso cargado: {} falladas, {} respondidas",
            progress.wrong_answers().len(),
            progress.done_questions().len()
        );

        let (reply_tx, reply_rx) = channel();
        let start = config.start_index();

        let mut app = Self {
            config,
            nav: Navigation::default(),
            phase: QuestionPhase::Loading,
            progress,
            prefs: UiPrefs::default(),
            jump_input: String::new(),
            message: String::new(),
            latest_token: 0,
            source,
            store,
            reply_tx,
            reply_rx,
        };
        app.load_question(start, Direction::Stay);
        app
    }

    /// Arranque real: cliente HTTP, almacén de la plataforma y preferencias de eframe.
    pub fn from_creation_context(cc: &eframe::CreationContext<'_>, config: ExamConfig) -> Self {
        let prefs: UiPrefs = cc
            .storage
            .and_then(|storage| eframe::get_value(storage, eframe::APP_KEY))
            .unwrap_or_default();
        cc.egui_ctx.set_visuals(if prefs.dark_mode {
            egui::Visuals::dark()
        } else {
            egui::Visuals::light()
        });

        let store = open_default_store(&config);
        let source = RemoteSource::new(config.clone());
        let mut app = Self::new(config, Box::new(source), store);
        app.prefs = prefs;
        app
    }
}
