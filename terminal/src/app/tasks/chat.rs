//! # Chat Tasks
//!
//! Sending runs on the background runtime. The UI thread only flips state;
//! the task posts the message and records the outcome.

use crate::app::state::ChatState;
use crate::core::{ApiError, ChatService};
use crate::utils::runtime::TOKIO_RT;
use parking_lot::RwLock;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::debug;

/// Settles the in-flight send exactly once. If the task is dropped before a
/// result arrives (panic, runtime shutdown) the send is settled as cancelled,
/// so `loading` can never stay stuck.
struct SendGuard {
    state: Arc<RwLock<ChatState>>,
    settled: bool,
}

impl SendGuard {
    fn new(state: Arc<RwLock<ChatState>>) -> Self {
        Self {
            state,
            settled: false,
        }
    }

    fn settle(mut self, result: Result<String, ApiError>) {
        self.state.write().finish_send(result);
        self.settled = true;
    }
}

impl Drop for SendGuard {
    fn drop(&mut self) {
        if !self.settled {
            self.state.write().finish_send(Err(ApiError::Cancelled));
        }
    }
}

/// Send the current input, if there is one to send.
///
/// Returns the handle of the background request, or `None` when the input
/// was blank.
pub(crate) fn send_message(
    state: Arc<RwLock<ChatState>>,
    service: Arc<dyn ChatService>,
    ctx: egui::Context,
) -> Option<JoinHandle<()>> {
    // Lock released at the end of the block
    let (text, token) = {
        let mut state = state.write();
        let text = state.begin_send()?;
        (text, state.token())
    };

    debug!(chars = text.chars().count(), "Sending chat message");
    Some(TOKIO_RT.spawn(async move {
        run_send(state, service, text, token).await;
        ctx.request_repaint();
    }))
}

async fn run_send(
    state: Arc<RwLock<ChatState>>,
    service: Arc<dyn ChatService>,
    text: String,
    token: Option<String>,
) {
    let guard = SendGuard::new(state);
    let result = service.send_message(&text, token.as_deref()).await;
    guard.settle(result);
}
