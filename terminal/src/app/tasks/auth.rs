//! # Login Task

use crate::app::state::ChatState;
use crate::core::{ApiError, ChatService};
use crate::utils::runtime::TOKIO_RT;
use parking_lot::RwLock;
use std::sync::Arc;
use tokio::task::JoinHandle;

/// Settles the login exactly once, as cancelled if the task dies first, so
/// `login.pending` never stays set.
struct LoginGuard {
    state: Arc<RwLock<ChatState>>,
    username: Option<String>,
}

impl LoginGuard {
    fn settle(mut self, result: Result<String, ApiError>) {
        if let Some(username) = self.username.take() {
            self.state.write().finish_login(username, result);
        }
    }
}

impl Drop for LoginGuard {
    fn drop(&mut self) {
        if let Some(username) = self.username.take() {
            self.state.write().finish_login(username, Err(ApiError::Cancelled));
        }
    }
}

pub(crate) fn login(
    state: Arc<RwLock<ChatState>>,
    service: Arc<dyn ChatService>,
    ctx: egui::Context,
) -> Option<JoinHandle<()>> {
    let (username, password) = state.write().begin_login()?;

    Some(TOKIO_RT.spawn(async move {
        let guard = LoginGuard {
            state,
            username: Some(username.clone()),
        };
        let result = service.login(&username, &password).await;
        guard.settle(result);
        ctx.request_repaint();
    }))
}
