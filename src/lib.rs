pub mod app;
pub mod config;
pub mod extract;
pub mod model;
pub mod remote;
pub mod storage;
pub mod ui;

pub use app::QuizApp;
