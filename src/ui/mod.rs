mod helpers;
pub mod layout;
pub mod views;

use crate::app::QuizApp;
use eframe::{APP_KEY, App, Frame, set_value};
use egui::Context;
use layout::{bottom_panel, side_panel, top_panel};
use std::time::Duration;

impl App for QuizApp {
    fn update(&mut self, ctx: &Context, _frame: &mut Frame) {
        self.poll_loads();
        if self.is_loading() {
            // Las respuestas llegan por canal; hay que seguir sondeando.
            ctx.request_repaint_after(Duration::from_millis(100));
        }

        top_panel(self, ctx);
        bottom_panel(self, ctx);
        if self.prefs.show_side_panel {
            side_panel(self, ctx);
        }

        if self.is_loading() {
            views::loading::ui_loading(self, ctx);
        } else {
            views::question::ui_question(self, ctx);
        }
    }

    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        set_value(storage, APP_KEY, &self.prefs);
    }
}
