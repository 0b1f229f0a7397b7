//! # User Interface
//!
//! egui rendering. Everything here is synchronous; network work is handed to
//! the background tasks through [`App`].

pub mod screens;
pub mod theme;

use crate::app::App;
use theme::Theme;

/// Render one frame.
pub fn render(ctx: &egui::Context, app: &mut App) {
    let theme = Theme::default();
    screens::chat::render(ctx, app, &theme);
}
