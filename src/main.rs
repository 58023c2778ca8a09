#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use inf04_quiz::QuizApp;
use inf04_quiz::config::ExamConfig;

#[cfg(not(target_arch = "wasm32"))]
fn main() -> eframe::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = ExamConfig::from_env();
    log::info!("Usando {}", config.question_url());

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([960.0, 680.0]),
        ..Default::default()
    };
    eframe::run_native(
        "INF.04 - pytania egzaminacyjne",
        options,
        Box::new(|cc| Ok(Box::new(QuizApp::from_creation_context(cc, config)))),
    )
}

#[cfg(target_arch = "wasm32")]
fn main() {
    use wasm_bindgen::JsCast;

    eframe::WebLogger::init(log::LevelFilter::Info).ok();
    let config = ExamConfig::from_location();
    let web_options = eframe::WebOptions::default();

    wasm_bindgen_futures::spawn_local(async move {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            log::error!("No hay document en este entorno");
            return;
        };
        let canvas = match document
            .get_element_by_id("the_canvas_id")
            .map(|el| el.dyn_into::<web_sys::HtmlCanvasElement>())
        {
            Some(Ok(canvas)) => canvas,
            _ => {
                log::error!("Falta el <canvas id=\"the_canvas_id\">");
                return;
            }
        };

        let result = eframe::WebRunner::new()
            .start(
                canvas,
                web_options,
                Box::new(|cc| Ok(Box::new(QuizApp::from_creation_context(cc, config)))),
            )
            .await;
        if let Err(err) = result {
            log::error!("No se pudo arrancar eframe: {err:?}");
        }
    });
}
