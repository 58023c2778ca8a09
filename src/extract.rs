// src/extract.rs

use crate::model::{AnswerLetter, Choices, QuestionRecord};
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use std::sync::LazyLock;
use url::Url;

static QUESTION_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)pytanie\s+(\d+)").expect("regex de número de pregunta"));

static INLINE_HINT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)poprawna odpowiedź.*?([a-d])").expect("regex de pista en cabecera")
});

static ANSWER_LABEL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-D]\.\s*").expect("regex de etiqueta de respuesta"));

// Patrón A: "to <letra>" en el texto que sigue a un "h3>", sin pasar del siguiente '<'.
static AFTER_HEADING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"h3>[^<]*?\bto\s+([a-d])\b").expect("regex de respuesta tras h3")
});

// Patrón B: "odpowiedź <letra> na pytanie".
static IN_PHRASE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"odpowiedź\s+([a-d])\s+na pytanie").expect("regex de respuesta en frase")
});

fn select_first<'a>(doc: &'a Html, css: &str) -> Option<ElementRef<'a>> {
    let selector = Selector::parse(css).ok()?;
    doc.select(&selector).next()
}

fn text_of(element: ElementRef<'_>) -> String {
    element.text().collect::<String>()
}

fn non_empty_attr(element: ElementRef<'_>, name: &str) -> Option<String> {
    element
        .value()
        .attr(name)
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

fn answer_text(doc: &Html, letter: AnswerLetter) -> String {
    let Some(element) = select_first(doc, &format!("#{}", letter.element_id())) else {
        return String::new();
    };
    let raw = text_of(element);
    ANSWER_LABEL
        .replace(raw.trim_start(), "")
        .trim()
        .to_string()
}

/// Convierte el HTML de `loadquestion.php` en una pregunta.
///
/// Devuelve `None` si no existe la cabecera `h3.onequestion`; el resto de
/// elementos ausentes se tratan como texto vacío o media inexistente.
pub fn extract(markup: &str) -> Option<QuestionRecord> {
    let doc = Html::parse_document(markup);

    let heading = text_of(select_first(&doc, "h3.onequestion")?);

    let index = QUESTION_NUMBER
        .captures(&heading)
        .and_then(|caps| caps[1].parse::<usize>().ok())
        .map(|number| number.saturating_sub(1))
        .unwrap_or(0);

    let correct = inline_hint(&heading);

    let title = select_first(&doc, "div.title")
        .map(|el| text_of(el).trim().to_string())
        .unwrap_or_default();

    let choices = Choices::new(
        answer_text(&doc, AnswerLetter::A),
        answer_text(&doc, AnswerLetter::B),
        answer_text(&doc, AnswerLetter::C),
        answer_text(&doc, AnswerLetter::D),
    );

    let image = select_first(&doc, "div.image img").and_then(|el| non_empty_attr(el, "src"));
    let video = select_first(&doc, "source").and_then(|el| non_empty_attr(el, "src"));

    Some(QuestionRecord {
        index,
        title,
        choices,
        image,
        video,
        correct,
    })
}

/// Pista "poprawna odpowiedź ... X" dentro del texto de la cabecera.
pub fn inline_hint(heading: &str) -> Option<AnswerLetter> {
    INLINE_HINT
        .captures(heading)
        .and_then(|caps| caps[1].chars().next())
        .and_then(AnswerLetter::from_char)
}

fn first_letter(re: &Regex, body: &str) -> Option<AnswerLetter> {
    re.captures(body)
        .and_then(|caps| caps[1].chars().next())
        .and_then(AnswerLetter::from_char)
}

/// Patrón A sobre el cuerpo ya normalizado (trim + minúsculas).
pub fn answer_after_heading(body: &str) -> Option<AnswerLetter> {
    first_letter(&AFTER_HEADING, body)
}

/// Patrón B sobre el cuerpo ya normalizado (trim + minúsculas).
pub fn answer_in_phrase(body: &str) -> Option<AnswerLetter> {
    first_letter(&IN_PHRASE, body)
}

/// Saca la letra correcta de la respuesta de `loadanswer.php`.
/// Primero el patrón A y, si falla, el B.
pub fn resolve_correct_answer(body: &str) -> Option<AnswerLetter> {
    let normalized = body.trim().to_lowercase();
    answer_after_heading(&normalized).or_else(|| answer_in_phrase(&normalized))
}

/// Las rutas relativas de imágenes y vídeos cuelgan de `base`.
pub fn resolve_media_url(src: &str, base: &Url) -> String {
    if let Ok(absolute) = Url::parse(src) {
        return absolute.into();
    }
    match base.join(src) {
        Ok(joined) => joined.into(),
        Err(err) => {
            log::warn!("No se pudo resolver la ruta de media {src:?}: {err}");
            src.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
        <h3 class="onequestion">Pytanie 5</h3>
        <div class="title"> Co to jest RAM? </div>
        <div id="odpa">A. Pamięć</div>
        <div id="odpb">B. Dysk</div>
        <div id="odpc">C. Procesor</div>
        <div id="odpd">D. Ekran</div>
    "#;

    #[test]
    fn extracts_the_sample_question() {
        let record = extract(SAMPLE).expect("record");
        assert_eq!(record.index, 4);
        assert_eq!(record.title, "Co to jest RAM?");
        assert_eq!(record.choices.text(AnswerLetter::A), "Pamięć");
        assert_eq!(record.choices.text(AnswerLetter::B), "Dysk");
        assert_eq!(record.choices.text(AnswerLetter::C), "Procesor");
        assert_eq!(record.choices.text(AnswerLetter::D), "Ekran");
        assert_eq!(record.image, None);
        assert_eq!(record.video, None);
        assert_eq!(record.correct, None);
    }

    #[test]
    fn missing_heading_is_not_found() {
        assert!(extract("").is_none());
        assert!(extract(r#"<div class="title">Bez nagłówka</div>"#).is_none());
        assert!(extract(r#"<h3>pytanie 3</h3><div id="odpa">A. x</div>"#).is_none());
    }

    #[test]
    fn missing_parts_become_empty_strings() {
        let record = extract(r#"<h3 class="onequestion">coś innego</h3>"#).expect("record");
        assert_eq!(record.index, 0);
        assert_eq!(record.title, "");
        for (_, text) in record.choices.iter() {
            assert_eq!(text, "");
        }
    }

    #[test]
    fn answers_without_label_are_kept_and_trimmed() {
        let html = r#"
            <h3 class="onequestion">pytanie 1</h3>
            <div id="odpa">
                A.   Pamięć operacyjna
            </div>
            <div id="odpb">bez etykiety</div>
            <div id="odpc">C.Procesor</div>
        "#;
        let record = extract(html).expect("record");
        assert_eq!(record.index, 0);
        assert_eq!(record.choices.text(AnswerLetter::A), "Pamięć operacyjna");
        assert_eq!(record.choices.text(AnswerLetter::B), "bez etykiety");
        assert_eq!(record.choices.text(AnswerLetter::C), "Procesor");
        assert_eq!(record.choices.text(AnswerLetter::D), "");
    }

    #[test]
    fn reads_media_and_inline_hint() {
        let html = r#"
            <h3 class="onequestion">PYTANIE 12 - poprawna odpowiedź: C</h3>
            <div class="image"><img src="obrazki/12.png"></div>
            <video controls><source src="https://cdn.example/12.mp4"></video>
        "#;
        let record = extract(html).expect("record");
        assert_eq!(record.index, 11);
        assert_eq!(record.image.as_deref(), Some("obrazki/12.png"));
        assert_eq!(record.video.as_deref(), Some("https://cdn.example/12.mp4"));
        assert_eq!(record.correct, Some(AnswerLetter::C));
    }

    #[test]
    fn empty_media_src_is_ignored() {
        let html = r#"<h3 class="onequestion">pytanie 2</h3><div class="image"><img src=""></div>"#;
        let record = extract(html).expect("record");
        assert_eq!(record.image, None);
    }

    #[test]
    fn extraction_is_deterministic() {
        assert_eq!(extract(SAMPLE), extract(SAMPLE));
    }

    #[test]
    fn pattern_a_reads_letter_after_heading() {
        assert_eq!(resolve_correct_answer("<h3>...</h3>to c"), Some(AnswerLetter::C));
        assert_eq!(
            resolve_correct_answer("  <h3>Poprawna odpowiedź to B</h3>\n"),
            Some(AnswerLetter::B)
        );
    }

    #[test]
    fn pattern_b_is_the_fallback() {
        let body = "Poprawna odpowiedź D na pytanie 7";
        assert_eq!(answer_after_heading(&body.to_lowercase()), None);
        assert_eq!(resolve_correct_answer(body), Some(AnswerLetter::D));
    }

    #[test]
    fn pattern_a_wins_over_pattern_b() {
        let body = "<h3>to a</h3> odpowiedź b na pytanie 1";
        assert_eq!(resolve_correct_answer(body), Some(AnswerLetter::A));
    }

    #[test]
    fn pattern_a_stops_at_the_next_tag() {
        let body = "<h3>Poprawna odpowiedź B na pytanie 4</h3><p>to a</p>";
        assert_eq!(answer_after_heading(&body.to_lowercase()), None);
        assert_eq!(resolve_correct_answer(body), Some(AnswerLetter::B));
    }

    #[test]
    fn unresolvable_answer_bodies() {
        assert_eq!(resolve_correct_answer(""), None);
        assert_eq!(resolve_correct_answer("<html>błąd serwera</html>"), None);
        assert_eq!(resolve_correct_answer("<h3>to x</h3>"), None);
        assert_eq!(resolve_correct_answer("<h3>pytanie to abc</h3>"), None);
    }

    #[test]
    fn media_urls_resolve_against_base() {
        let base = Url::parse("https://www.praktycznyegzamin.pl/inf04/teoria/jedno/").unwrap();
        assert_eq!(
            resolve_media_url("obrazki/1.png", &base),
            "https://www.praktycznyegzamin.pl/inf04/teoria/jedno/obrazki/1.png"
        );
        assert_eq!(
            resolve_media_url("https://cdn.example/a.mp4", &base),
            "https://cdn.example/a.mp4"
        );
    }
}
