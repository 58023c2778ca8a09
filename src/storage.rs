// src/storage.rs

use std::collections::BTreeMap;
use thiserror::Error;

pub const WRONG_ANSWERS_KEY: &str = "wrongAnswers";
pub const DONE_QUESTIONS_KEY: &str = "doneQuestions";

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error("almacenamiento no disponible: {0}")]
    Unavailable(String),
}

/// Almacén clave/valor de cadenas, al estilo de `localStorage`.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// Almacén en memoria; se pierde al cerrar.
#[derive(Default, Debug, Clone)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Fichero JSON `{clave: valor}` que se reescribe entero en cada `set`.
#[cfg(not(target_arch = "wasm32"))]
pub struct FileStore {
    path: std::path::PathBuf,
    entries: BTreeMap<String, String>,
}

#[cfg(not(target_arch = "wasm32"))]
impl FileStore {
    /// Un fichero inexistente o corrupto equivale a un almacén vacío;
    /// el siguiente `set` lo reescribe.
    pub fn open(path: impl Into<std::path::PathBuf>) -> Result<Self, StorageError> {
        let path = path.into();
        let entries = match std::fs::read_to_string(&path) {
            Ok(json) if json.trim().is_empty() => BTreeMap::new(),
            Ok(json) => serde_json::from_str(&json).unwrap_or_else(|err| {
                log::warn!("{} corrupto, se empieza vacío: {err}", path.display());
                BTreeMap::new()
            }),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(err) => return Err(err.into()),
        };
        Ok(Self { path, entries })
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.insert(key.to_string(), value.to_string());
        let json = serde_json::to_string_pretty(&self.entries)?;
        // Temporal + rename: nunca queda un fichero a medias.
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, json)?;
        std::fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

/// `window.localStorage` del navegador.
#[cfg(target_arch = "wasm32")]
pub struct LocalStorageStore {
    storage: web_sys::Storage,
}

#[cfg(target_arch = "wasm32")]
impl LocalStorageStore {
    pub fn open() -> Result<Self, StorageError> {
        let window = web_sys::window()
            .ok_or_else(|| StorageError::Unavailable("no existe window".into()))?;
        let storage = window
            .local_storage()
            .map_err(|err| StorageError::Unavailable(format!("{err:?}")))?
            .ok_or_else(|| StorageError::Unavailable("localStorage desactivado".into()))?;
        Ok(Self { storage })
    }
}

#[cfg(target_arch = "wasm32")]
impl KeyValueStore for LocalStorageStore {
    fn get(&self, key: &str) -> Option<String> {
        self.storage.get_item(key).ok().flatten()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.storage
            .set_item(key, value)
            .map_err(|err| StorageError::Unavailable(format!("{err:?}")))
    }
}

/// Almacén por defecto de la plataforma; si no se puede abrir, memoria.
#[cfg(not(target_arch = "wasm32"))]
pub fn open_default_store(config: &crate::config::ExamConfig) -> Box<dyn KeyValueStore> {
    match FileStore::open(&config.progress_file) {
        Ok(store) => {
            log::info!("Progreso en {}", store.path().display());
            Box::new(store)
        }
        Err(err) => {
            log::error!(
                "No se pudo abrir {}: {err}; el progreso no se guardará",
                config.progress_file.display()
            );
            Box::new(MemoryStore::new())
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub fn open_default_store(_config: &crate::config::ExamConfig) -> Box<dyn KeyValueStore> {
    match LocalStorageStore::open() {
        Ok(store) => Box::new(store),
        Err(err) => {
            log::error!("{err}; el progreso no se guardará");
            Box::new(MemoryStore::new())
        }
    }
}

/// Listas de preguntas falladas y respondidas (índices base cero).
/// Solo crecen y nunca repiten índice.
#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub struct ProgressSets {
    wrong_answers: Vec<usize>,
    done_questions: Vec<usize>,
}

fn read_list(store: &dyn KeyValueStore, key: &str) -> Vec<usize> {
    let Some(raw) = store.get(key) else {
        return Vec::new();
    };
    if raw.trim().is_empty() {
        return Vec::new();
    }
    match serde_json::from_str::<Vec<usize>>(&raw) {
        Ok(list) => {
            let mut seen = Vec::with_capacity(list.len());
            for index in list {
                if !seen.contains(&index) {
                    seen.push(index);
                }
            }
            seen
        }
        Err(err) => {
            log::warn!("Valor corrupto en {key:?}, se empieza vacío: {err}");
            Vec::new()
        }
    }
}

fn write_list(store: &mut dyn KeyValueStore, key: &str, list: &[usize]) -> Result<(), StorageError> {
    let json = serde_json::to_string(list)?;
    store.set(key, &json)
}

impl ProgressSets {
    pub fn load(store: &dyn KeyValueStore) -> Self {
        Self {
            wrong_answers: read_list(store, WRONG_ANSWERS_KEY),
            done_questions: read_list(store, DONE_QUESTIONS_KEY),
        }
    }

    pub fn save(&self, store: &mut dyn KeyValueStore) -> Result<(), StorageError> {
        write_list(store, WRONG_ANSWERS_KEY, &self.wrong_answers)?;
        write_list(store, DONE_QUESTIONS_KEY, &self.done_questions)
    }

    pub fn wrong_answers(&self) -> &[usize] {
        &self.wrong_answers
    }

    pub fn done_questions(&self) -> &[usize] {
        &self.done_questions
    }

    pub fn is_wrong(&self, index: usize) -> bool {
        self.wrong_answers.contains(&index)
    }

    pub fn is_done(&self, index: usize) -> bool {
        self.done_questions.contains(&index)
    }

    /// Devuelve `true` si el índice era nuevo.
    pub fn record_wrong(&mut self, index: usize) -> bool {
        if self.is_wrong(index) {
            return false;
        }
        self.wrong_answers.push(index);
        true
    }

    /// Devuelve `true` si el índice era nuevo.
    pub fn record_done(&mut self, index: usize) -> bool {
        if self.is_done(index) {
            return false;
        }
        self.done_questions.push(index);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_keys_load_as_empty() {
        let store = MemoryStore::new();
        let progress = ProgressSets::load(&store);
        assert!(progress.wrong_answers().is_empty());
        assert!(progress.done_questions().is_empty());
    }

    #[test]
    fn save_then_load_keeps_order() {
        let mut store = MemoryStore::new();
        let mut progress = ProgressSets::default();
        progress.record_done(7);
        progress.record_done(2);
        progress.record_wrong(7);
        progress.save(&mut store).unwrap();

        assert_eq!(store.get(DONE_QUESTIONS_KEY).as_deref(), Some("[7,2]"));
        assert_eq!(store.get(WRONG_ANSWERS_KEY).as_deref(), Some("[7]"));
        assert_eq!(ProgressSets::load(&store), progress);
    }

    #[test]
    fn records_never_duplicate() {
        let mut progress = ProgressSets::default();
        assert!(progress.record_wrong(3));
        assert!(!progress.record_wrong(3));
        assert!(progress.record_done(3));
        assert!(!progress.record_done(3));
        assert_eq!(progress.wrong_answers(), &[3]);
        assert_eq!(progress.done_questions(), &[3]);
    }

    #[test]
    fn corrupt_or_duplicated_values_are_cleaned() {
        let mut store = MemoryStore::new();
        store.set(WRONG_ANSWERS_KEY, "not json").unwrap();
        store.set(DONE_QUESTIONS_KEY, "[4,1,4,9,1]").unwrap();
        let progress = ProgressSets::load(&store);
        assert!(progress.wrong_answers().is_empty());
        assert_eq!(progress.done_questions(), &[4, 1, 9]);
    }

    #[test]
    fn file_store_persists_between_opens() {
        let path = std::env::temp_dir().join(format!(
            "inf04_quiz_store_{}.json",
            std::process::id()
        ));
        let _ = std::fs::remove_file(&path);

        {
            let mut store = FileStore::open(&path).unwrap();
            assert_eq!(store.get(WRONG_ANSWERS_KEY), None);
            store.set(WRONG_ANSWERS_KEY, "[1,2]").unwrap();
        }

        let store = FileStore::open(&path).unwrap();
        assert_eq!(store.get(WRONG_ANSWERS_KEY).as_deref(), Some("[1,2]"));
        assert_eq!(ProgressSets::load(&store).wrong_answers(), &[1, 2]);

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn corrupt_file_starts_empty_and_is_rewritten() {
        let path = std::env::temp_dir().join(format!(
            "inf04_quiz_corrupt_{}.json",
            std::process::id()
        ));
        std::fs::write(&path, r#"{"wrongAnswers": "[1,"#).unwrap();

        let mut store = FileStore::open(&path).unwrap();
        assert_eq!(store.get(WRONG_ANSWERS_KEY), None);
        store.set(WRONG_ANSWERS_KEY, "[7]").unwrap();

        let reopened = FileStore::open(&path).unwrap();
        assert_eq!(reopened.get(WRONG_ANSWERS_KEY).as_deref(), Some("[7]"));
        assert_eq!(ProgressSets::load(&reopened).wrong_answers(), &[7]);

        let _ = std::fs::remove_file(&path);
    }
}
