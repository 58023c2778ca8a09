use url::Url;

pub const EXAM_SITE: &str = "https://www.praktycznyegzamin.pl/inf04/teoria/jedno/";
#[cfg(target_arch = "wasm32")]
const PROXIED_API: &str = "/api/inf04/teoria/jedno/";
const DEFAULT_ANSWER_TOKEN: &str = "evjhv";
#[cfg(not(target_arch = "wasm32"))]
const DEFAULT_PROGRESS_FILE: &str = "inf04_progress.json";

/// De dónde sale la respuesta correcta. Solo se usa una fuente.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AnswerSource {
    /// Segunda petición a `loadanswer.php`; la pista de la cabecera se ignora.
    #[default]
    Endpoint,
    /// Solo la pista "poprawna odpowiedź" de la cabecera, sin segunda petición.
    InlineHint,
}

impl AnswerSource {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "endpoint" => Some(AnswerSource::Endpoint),
            "inline" | "inline_hint" => Some(AnswerSource::InlineHint),
            _ => None,
        }
    }
}

#[derive(Clone, Debug)]
pub struct ExamConfig {
    /// Prefijo de `loadquestion.php` y `loadanswer.php`. En web es relativo (proxy).
    pub api_base: String,
    pub media_base: Url,
    pub answer_token: String,
    pub answer_source: AnswerSource,
    /// Número de pregunta (desde 1) con el que arrancar.
    pub start_question: Option<usize>,
    #[cfg(not(target_arch = "wasm32"))]
    pub progress_file: std::path::PathBuf,
}

fn normalize(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn with_trailing_slash(mut base: String) -> String {
    if !base.ends_with('/') {
        base.push('/');
    }
    base
}

/// Números de pregunta válidos: enteros positivos.
/// Último número de pregunta que se acepta al saltar.
pub const MAX_QUESTION_NUMBER: usize = u32::MAX as usize;

pub fn parse_question_number(value: &str) -> Option<usize> {
    value
        .trim()
        .parse::<usize>()
        .ok()
        .filter(|n| (1..=MAX_QUESTION_NUMBER).contains(n))
}

fn exam_site() -> Url {
    Url::parse(EXAM_SITE).expect("EXAM_SITE es una URL válida")
}

impl ExamConfig {
    pub fn question_url(&self) -> String {
        format!("{}loadquestion.php", self.api_base)
    }

    pub fn answer_url(&self) -> String {
        format!("{}loadanswer.php", self.api_base)
    }

    /// Índice base cero de la pregunta inicial.
    pub fn start_index(&self) -> usize {
        self.start_question.map(|n| n - 1).unwrap_or(0)
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl Default for ExamConfig {
    fn default() -> Self {
        Self {
            api_base: EXAM_SITE.to_string(),
            media_base: exam_site(),
            answer_token: DEFAULT_ANSWER_TOKEN.to_string(),
            answer_source: AnswerSource::Endpoint,
            start_question: None,
            progress_file: DEFAULT_PROGRESS_FILE.into(),
        }
    }
}

#[cfg(target_arch = "wasm32")]
impl Default for ExamConfig {
    fn default() -> Self {
        Self {
            api_base: PROXIED_API.to_string(),
            media_base: exam_site(),
            answer_token: DEFAULT_ANSWER_TOKEN.to_string(),
            answer_source: AnswerSource::Endpoint,
            start_question: None,
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl ExamConfig {
    /// Variables `INF04_*`; las vacías se ignoran.
    pub fn from_env() -> Self {
        let var = |name: &str| std::env::var(name).ok().as_deref().and_then(normalize);
        let mut config = Self::default();

        if let Some(api) = var("INF04_API_BASE") {
            config.api_base = with_trailing_slash(api);
        }
        if let Some(media) = var("INF04_MEDIA_BASE") {
            match Url::parse(&with_trailing_slash(media)) {
                Ok(url) => config.media_base = url,
                Err(err) => log::warn!("INF04_MEDIA_BASE no es una URL válida: {err}"),
            }
        }
        if let Some(token) = var("INF04_ANSWER_TOKEN") {
            config.answer_token = token;
        }
        if let Some(source) = var("INF04_ANSWER_SOURCE") {
            match AnswerSource::parse(&source) {
                Some(source) => config.answer_source = source,
                None => log::warn!("INF04_ANSWER_SOURCE desconocido: {source}"),
            }
        }
        if let Some(start) = var("INF04_START_QUESTION") {
            config.start_question = parse_question_number(&start);
            if config.start_question.is_none() {
                log::warn!("INF04_START_QUESTION ignorado: {start}");
            }
        }
        if let Some(path) = var("INF04_PROGRESS_FILE") {
            config.progress_file = path.into();
        }
        config
    }
}

#[cfg(target_arch = "wasm32")]
impl ExamConfig {
    /// Lee `?pytanie=N` (enlace directo) y `?api=...` de la URL de la página.
    pub fn from_location() -> Self {
        let mut config = Self::default();
        let Some(search) = web_sys::window().and_then(|w| w.location().search().ok()) else {
            return config;
        };
        for (key, value) in query_pairs(&search) {
            match key.as_str() {
                "pytanie" => config.start_question = parse_question_number(&value),
                "api" => {
                    if let Some(api) = normalize(&value) {
                        config.api_base = with_trailing_slash(api);
                    }
                }
                _ => {}
            }
        }
        config
    }
}

/// Pares clave/valor de una query string, con o sin `?` inicial.
pub fn query_pairs(search: &str) -> Vec<(String, String)> {
    let query = search.strip_prefix('?').unwrap_or(search);
    url::form_urlencoded::parse(query.as_bytes())
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn question_numbers_must_be_positive() {
        assert_eq!(parse_question_number(" 12 "), Some(12));
        assert_eq!(parse_question_number("0"), None);
        assert_eq!(parse_question_number("-3"), None);
        assert_eq!(parse_question_number("abc"), None);
        assert_eq!(parse_question_number(""), None);
        assert_eq!(
            parse_question_number(&MAX_QUESTION_NUMBER.to_string()),
            Some(MAX_QUESTION_NUMBER)
        );
        assert_eq!(parse_question_number(&usize::MAX.to_string()), None);
    }

    #[test]
    fn endpoints_hang_from_api_base() {
        let config = ExamConfig {
            api_base: with_trailing_slash("/api/inf04".into()),
            ..ExamConfig::default()
        };
        assert_eq!(config.question_url(), "/api/inf04/loadquestion.php");
        assert_eq!(config.answer_url(), "/api/inf04/loadanswer.php");
    }

    #[test]
    fn start_index_is_zero_based() {
        let mut config = ExamConfig::default();
        assert_eq!(config.start_index(), 0);
        config.start_question = Some(40);
        assert_eq!(config.start_index(), 39);
    }

    #[test]
    fn answer_source_names() {
        assert_eq!(AnswerSource::parse("Endpoint"), Some(AnswerSource::Endpoint));
        assert_eq!(AnswerSource::parse("inline"), Some(AnswerSource::InlineHint));
        assert_eq!(AnswerSource::parse("both"), None);
    }

    #[test]
    fn query_string_pairs_are_decoded() {
        let pairs = query_pairs("?pytanie=7&api=%2Fproxy%2F");
        assert_eq!(
            pairs,
            vec![
                ("pytanie".to_string(), "7".to_string()),
                ("api".to_string(), "/proxy/".to_string()),
            ]
        );
    }
}
