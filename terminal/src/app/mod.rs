//! # Application
//!
//! [`App`] owns the shared [`ChatState`] and the [`ChatService`] used to reach
//! the backend, and implements `eframe::App`. Each frame renders the state; user
//! actions call [`App::send`] / [`App::login`], which spawn background tasks
//! that write their results back into the state.

pub mod state;
pub(crate) mod tasks;

pub use state::{ChatState, LoginForm, Message, Sender, Session, FALLBACK_REPLY};

use crate::core::ChatService;
use parking_lot::RwLock;
use std::sync::Arc;

pub struct App {
    pub state: Arc<RwLock<ChatState>>,
    service: Arc<dyn ChatService>,
    /// Message count at the last frame; growth triggers a scroll to the bottom.
    pub(crate) rendered_messages: usize,
}

impl App {
    pub fn new(service: Arc<dyn ChatService>, token: Option<String>) -> Self {
        Self {
            state: Arc::new(RwLock::new(ChatState::new(token))),
            service,
            rendered_messages: 0,
        }
    }

    /// Send the current input. No-op for blank input.
    pub fn send(&self, ctx: &egui::Context) {
        tasks::chat::send_message(self.state.clone(), self.service.clone(), ctx.clone());
    }

    pub fn login(&self, ctx: &egui::Context) {
        tasks::auth::login(self.state.clone(), self.service.clone(), ctx.clone());
    }

    pub fn logout(&self) {
        self.state.write().logout();
    }
}

impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        crate::ui::render(ctx, self);
    }
}
