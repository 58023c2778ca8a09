// src/remote.rs

use crate::config::{AnswerSource, ExamConfig};
use crate::extract::{extract, resolve_correct_answer};
use crate::model::{Direction, QuestionRecord};
use std::sync::mpsc::Sender;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("la petición falló: {0}")]
    Transport(String),
    #[error("el servidor devolvió HTTP {0}")]
    HttpStatus(u16),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadRequest {
    pub token: u64,
    pub index: usize,
    pub direction: Direction,
}

impl LoadRequest {
    /// Número que espera el servidor (desde 1).
    pub fn number(&self) -> usize {
        self.index.saturating_add(1)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum LoadResult {
    Loaded(QuestionRecord),
    /// El HTML no trae la cabecera de la pregunta.
    NotFound,
    Failed(FetchError),
}

#[derive(Debug, Clone, PartialEq)]
pub struct LoadOutcome {
    pub token: u64,
    pub index: usize,
    pub result: LoadResult,
}

/// Origen de preguntas. La respuesta llega más tarde por `reply`.
pub trait QuestionSource {
    fn dispatch(&self, request: LoadRequest, reply: Sender<LoadOutcome>);
}

pub fn question_form(number: usize, direction: Direction) -> String {
    url::form_urlencoded::Serializer::new(String::new())
        .append_pair("value", &number.to_string())
        .append_pair("var", direction.as_form_value())
        .finish()
}

pub fn answer_form(number: usize, token: &str) -> String {
    url::form_urlencoded::Serializer::new(String::new())
        .append_pair("idp", &number.to_string())
        .append_pair("odp", token)
        .finish()
}

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Primer paso: HTML de la pregunta → registro, o el motivo de no tenerlo.
fn record_from_markup(
    request: &LoadRequest,
    markup: Result<String, FetchError>,
) -> Result<QuestionRecord, LoadResult> {
    let markup = markup.map_err(LoadResult::Failed)?;
    match extract(&markup) {
        Some(record) => {
            if record.index != request.index {
                log::warn!(
                    "Se pidió la pregunta {} y la cabecera dice {}",
                    request.number(),
                    record.index + 1
                );
            }
            Ok(record)
        }
        None => Err(LoadResult::NotFound),
    }
}

/// Segundo paso: con la fuente `Endpoint` la respuesta de `loadanswer.php`
/// sustituye a la pista de la cabecera. `None` deja la pista tal cual.
fn finish_load(
    mut record: QuestionRecord,
    request: &LoadRequest,
    answer_body: Option<Result<String, FetchError>>,
) -> LoadResult {
    let Some(body) = answer_body else {
        return LoadResult::Loaded(record);
    };
    match body {
        Ok(body) => {
            record.correct = resolve_correct_answer(&body);
            if record.correct.is_none() {
                log::info!(
                    "Sin respuesta correcta reconocible para la pregunta {}",
                    request.number()
                );
            }
            LoadResult::Loaded(record)
        }
        Err(err) => LoadResult::Failed(err),
    }
}

/// Cliente de praktycznyegzamin.pl.
#[derive(Clone)]
pub struct RemoteSource {
    config: ExamConfig,
    #[cfg(not(target_arch = "wasm32"))]
    client: reqwest::blocking::Client,
}

impl RemoteSource {
    pub fn new(config: ExamConfig) -> Self {
        Self {
            config,
            #[cfg(not(target_arch = "wasm32"))]
            client: reqwest::blocking::Client::new(),
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl RemoteSource {
    fn post_form(&self, url: &str, body: String) -> Result<String, FetchError> {
        let response = self
            .client
            .post(url)
            .header(reqwest::header::CONTENT_TYPE, FORM_CONTENT_TYPE)
            .body(body)
            .send()
            .map_err(|err| FetchError::Transport(err.to_string()))?;

        if !response.status().is_success() {
            return Err(FetchError::HttpStatus(response.status().as_u16()));
        }
        response
            .text()
            .map_err(|err| FetchError::Transport(err.to_string()))
    }

    pub fn load(&self, request: &LoadRequest) -> LoadResult {
        let markup = self.post_form(
            &self.config.question_url(),
            question_form(request.number(), request.direction),
        );
        let record = match record_from_markup(request, markup) {
            Ok(record) => record,
            Err(result) => return result,
        };

        let answer_body = match self.config.answer_source {
            AnswerSource::InlineHint => None,
            AnswerSource::Endpoint => Some(self.post_form(
                &self.config.answer_url(),
                answer_form(request.number(), &self.config.answer_token),
            )),
        };
        finish_load(record, request, answer_body)
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl QuestionSource for RemoteSource {
    fn dispatch(&self, request: LoadRequest, reply: Sender<LoadOutcome>) {
        let source = self.clone();
        std::thread::spawn(move || {
            let outcome = LoadOutcome {
                token: request.token,
                index: request.index,
                result: source.load(&request),
            };
            // Si la app ya se cerró no hay nadie escuchando.
            let _ = reply.send(outcome);
        });
    }
}

#[cfg(target_arch = "wasm32")]
async fn post_form(url: &str, body: String) -> Result<String, FetchError> {
    use wasm_bindgen::JsCast;
    use wasm_bindgen::JsValue;
    use wasm_bindgen_futures::JsFuture;
    use web_sys::{Request, RequestInit, RequestMode, Response};

    let js_err = |err: JsValue| FetchError::Transport(format!("{err:?}"));

    let opts = RequestInit::new();
    opts.set_method("POST");
    opts.set_mode(RequestMode::Cors);
    opts.set_body(&JsValue::from_str(&body));

    let window =
        web_sys::window().ok_or_else(|| FetchError::Transport("no existe window".into()))?;
    let request = Request::new_with_str_and_init(url, &opts).map_err(js_err)?;
    request
        .headers()
        .set("Content-Type", FORM_CONTENT_TYPE)
        .map_err(js_err)?;

    let value = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(js_err)?;
    let response: Response = value
        .dyn_into()
        .map_err(|_| FetchError::Transport("fetch no devolvió un Response".into()))?;

    if !response.ok() {
        return Err(FetchError::HttpStatus(response.status()));
    }

    let text = JsFuture::from(response.text().map_err(js_err)?)
        .await
        .map_err(js_err)?;
    text.as_string()
        .ok_or_else(|| FetchError::Transport("response.text() no devolvió string".into()))
}

#[cfg(target_arch = "wasm32")]
impl RemoteSource {
    pub async fn load(&self, request: &LoadRequest) -> LoadResult {
        let markup = post_form(
            &self.config.question_url(),
            question_form(request.number(), request.direction),
        )
        .await;
        let record = match record_from_markup(request, markup) {
            Ok(record) => record,
            Err(result) => return result,
        };

        let answer_body = match self.config.answer_source {
            AnswerSource::InlineHint => None,
            AnswerSource::Endpoint => Some(
                post_form(
                    &self.config.answer_url(),
                    answer_form(request.number(), &self.config.answer_token),
                )
                .await,
            ),
        };
        finish_load(record, request, answer_body)
    }
}

#[cfg(target_arch = "wasm32")]
impl QuestionSource for RemoteSource {
    fn dispatch(&self, request: LoadRequest, reply: Sender<LoadOutcome>) {
        let source = self.clone();
        wasm_bindgen_futures::spawn_local(async move {
            let outcome = LoadOutcome {
                token: request.token,
                index: request.index,
                result: source.load(&request).await,
            };
            let _ = reply.send(outcome);
        });
    }
}

/// Resuelve una carga con cuerpos ya conocidos, sin red.
/// `answer_body` es `None` cuando la fuente es la pista de la cabecera.
pub fn load_from_bodies(
    request: &LoadRequest,
    markup: Result<String, FetchError>,
    answer_body: Option<Result<String, FetchError>>,
) -> LoadResult {
    match record_from_markup(request, markup) {
        Ok(record) => finish_load(record, request, answer_body),
        Err(result) => result,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::AnswerLetter;

    const MARKUP: &str = r#"
        <h3 class="onequestion">Pytanie 3 poprawna odpowiedź A</h3>
        <div class="title">Ile bitów ma bajt?</div>
        <div id="odpa">A. 4</div><div id="odpb">B. 8</div>
        <div id="odpc">C. 16</div><div id="odpd">D. 32</div>
    "#;

    fn request(index: usize) -> LoadRequest {
        LoadRequest {
            token: 1,
            index,
            direction: Direction::Stay,
        }
    }

    #[test]
    fn forms_use_one_based_numbers() {
        let req = request(4);
        assert_eq!(question_form(req.number(), Direction::Stay), "value=5&var=0");
        assert_eq!(question_form(1, Direction::Back), "value=1&var=-1");
        assert_eq!(answer_form(req.number(), "evjhv"), "idp=5&odp=evjhv");
    }

    #[test]
    fn endpoint_answer_replaces_inline_hint() {
        let result = load_from_bodies(
            &request(2),
            Ok(MARKUP.into()),
            Some(Ok("<h3>Poprawna odpowiedź to B</h3>".into())),
        );
        let LoadResult::Loaded(record) = result else {
            panic!("expected a record, got {result:?}");
        };
        assert_eq!(record.correct, Some(AnswerLetter::B));
        assert_eq!(record.title, "Ile bitów ma bajt?");
    }

    #[test]
    fn unresolvable_endpoint_answer_leaves_correct_unknown() {
        let result = load_from_bodies(&request(2), Ok(MARKUP.into()), Some(Ok(String::new())));
        let LoadResult::Loaded(record) = result else {
            panic!("expected a record, got {result:?}");
        };
        assert_eq!(record.correct, None);
    }

    #[test]
    fn inline_hint_is_used_without_endpoint() {
        let result = load_from_bodies(&request(2), Ok(MARKUP.into()), None);
        let LoadResult::Loaded(record) = result else {
            panic!("expected a record, got {result:?}");
        };
        assert_eq!(record.correct, Some(AnswerLetter::A));
    }

    #[test]
    fn failures_and_missing_heading() {
        let failed = load_from_bodies(&request(0), Err(FetchError::HttpStatus(502)), None);
        assert_eq!(failed, LoadResult::Failed(FetchError::HttpStatus(502)));

        let not_found = load_from_bodies(&request(0), Ok("<p>brak</p>".into()), None);
        assert_eq!(not_found, LoadResult::NotFound);

        let answer_failed = load_from_bodies(
            &request(2),
            Ok(MARKUP.into()),
            Some(Err(FetchError::Transport("reset".into()))),
        );
        assert_eq!(
            answer_failed,
            LoadResult::Failed(FetchError::Transport("reset".into()))
        );
    }
}
