//! # GUI Theme
//!
//! Dark theme with a red accent for the chat window.

use egui::{Color32, Context, Stroke, Visuals};

#[derive(Debug, Clone, Copy)]
pub struct Theme {
    pub background: Color32,
    pub text: Color32,
    pub accent: Color32,
    pub user_bubble: Color32,
    pub bot_bubble: Color32,
    pub dim: Color32,
    pub error: Color32,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            background: Color32::from_rgb(12, 12, 12),
            text: Color32::from_rgb(240, 240, 240),
            accent: Color32::from_rgb(204, 0, 0),
            user_bubble: Color32::from_rgb(68, 0, 0),
            bot_bubble: Color32::from_rgb(38, 38, 38),
            dim: Color32::from_rgb(150, 150, 150),
            error: Color32::from_rgb(255, 90, 90),
        }
    }
}

impl Theme {
    pub fn apply(&self, ctx: &Context) {
        let mut visuals = Visuals::dark();
        visuals.panel_fill = self.background;
        visuals.window_fill = self.background;
        visuals.override_text_color = Some(self.text);
        visuals.selection.bg_fill = self.accent;
        visuals.widgets.hovered.bg_stroke = Stroke::new(1.0, self.accent);
        ctx.set_visuals(visuals);
    }
}
