//! # Conversation State
//!
//! The chat screen's whole model: the message list, the input line, the
//! loading flag and the optional login session. Background tasks and the UI
//! share it behind an `Arc<parking_lot::RwLock<_>>`; nobody holds the lock
//! across an `.await`.

use crate::core::ApiError;
use chrono::{DateTime, Utc};
use tracing::warn;

/// Bot text shown whenever a reply could not be obtained.
pub const FALLBACK_REPLY: &str = "Sorry, I encountered an error. Please try again later.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sender {
    User,
    Bot,
}

/// One line of the conversation. Never mutated after it is appended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    /// Milliseconds since the epoch, bumped when needed to stay strictly increasing.
    pub id: i64,
    pub content: String,
    pub sender: Sender,
    pub timestamp: DateTime<Utc>,
}

/// Signed-in user; the token is attached to chat requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub username: Option<String>,
    pub token: String,
}

#[derive(Debug, Clone, Default)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
    pub pending: bool,
    pub error: Option<String>,
}

#[derive(Debug, Default)]
pub struct ChatState {
    pub messages: Vec<Message>,
    pub input: String,
    pub loading: bool,
    pub session: Option<Session>,
    pub login: LoginForm,
    last_id: i64,
    in_flight: usize,
}

impl ChatState {
    pub fn new(token: Option<String>) -> Self {
        Self {
            session: token.map(|token| Session {
                username: None,
                token,
            }),
            ..Self::default()
        }
    }

    pub fn token(&self) -> Option<String> {
        self.session.as_ref().map(|s| s.token.clone())
    }

    fn next_id(&mut self, now: DateTime<Utc>) -> i64 {
        let id = now.timestamp_millis().max(self.last_id + 1);
        self.last_id = id;
        id
    }

    fn push(&mut self, sender: Sender, content: String) {
        let now = Utc::now();
        let id = self.next_id(now);
        self.messages.push(Message {
            id,
            content,
            sender,
            timestamp: now,
        });
    }

    /// Start sending the current input.
    ///
    /// Returns the text to post, or `None` when the input is blank. On `Some`
    /// the user message is appended, the input is cleared and `loading` is
    /// set. A send that is already in flight does not block another one; the
    /// disabled Send button is the only guard.
    pub fn begin_send(&mut self) -> Option<String> {
        if self.input.trim().is_empty() {
            return None;
        }
        let text = std::mem::take(&mut self.input);
        self.push(Sender::User, text.clone());
        self.in_flight += 1;
        self.loading = true;
        Some(text)
    }

    /// Record the outcome of a send: the reply, or the fallback text on any
    /// failure. `loading` clears once the last in-flight send settles.
    pub fn finish_send(&mut self, result: Result<String, ApiError>) {
        let content = match result {
            Ok(reply) => reply,
            Err(e) => {
                warn!(error = %e, "Chat request failed, showing fallback reply");
                FALLBACK_REPLY.to_string()
            }
        };
        self.push(Sender::Bot, content);
        self.in_flight = self.in_flight.saturating_sub(1);
        self.loading = self.in_flight > 0;
    }

    /// Start a login with the form's credentials.
    pub fn begin_login(&mut self) -> Option<(String, String)> {
        let form = &mut self.login;
        if form.pending || form.username.trim().is_empty() || form.password.is_empty() {
            return None;
        }
        form.pending = true;
        form.error = None;
        Some((form.username.trim().to_string(), std::mem::take(&mut form.password)))
    }

    pub fn finish_login(&mut self, username: String, result: Result<String, ApiError>) {
        self.login.pending = false;
        match result {
            Ok(token) => {
                self.session = Some(Session {
                    username: Some(username),
                    token,
                });
            }
            Err(ApiError::Status { message, .. }) => self.login.error = Some(message),
            Err(e) => self.login.error = Some(e.to_string()),
        }
    }

    pub fn logout(&mut self) {
        self.session = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_input(text: &str) -> ChatState {
        let mut state = ChatState::default();
        state.input = text.to_string();
        state
    }

    #[test]
    fn test_blank_input_is_ignored() {
        for text in ["", "   ", "\n\t "] {
            let mut state = with_input(text);
            assert_eq!(state.begin_send(), None);
            assert!(state.messages.is_empty());
            assert!(!state.loading);
        }
    }

    #[test]
    fn test_begin_send_appends_user_message() {
        let mut state = with_input("Hello");

        assert_eq!(state.begin_send().as_deref(), Some("Hello"));
        assert_eq!(state.messages.len(), 1);
        assert_eq!(state.messages[0].sender, Sender::User);
        assert_eq!(state.messages[0].content, "Hello");
        assert!(state.input.is_empty());
        assert!(state.loading);
    }

    #[test]
    fn test_back_to_back_sends_each_get_a_reply() {
        let mut state = with_input("one");
        assert_eq!(state.begin_send().as_deref(), Some("one"));
        state.input = "two".to_string();
        assert_eq!(state.begin_send().as_deref(), Some("two"));
        assert_eq!(state.messages.len(), 2);

        state.finish_send(Ok("first".to_string()));
        assert!(state.loading, "second send still pending");

        state.finish_send(Err(ApiError::Timeout));
        assert!(!state.loading);

        let users = state.messages.iter().filter(|m| m.sender == Sender::User).count();
        let bots = state.messages.iter().filter(|m| m.sender == Sender::Bot).count();
        assert_eq!((users, bots), (2, 2));
        assert_eq!(state.messages[2].content, "first");
        assert_eq!(state.messages[3].content, FALLBACK_REPLY);
    }

    #[test]
    fn test_reply_becomes_bot_message() {
        let mut state = with_input("Hello");
        state.begin_send();
        state.finish_send(Ok("X".to_string()));

        assert_eq!(state.messages.len(), 2);
        assert_eq!(state.messages[1].sender, Sender::Bot);
        assert_eq!(state.messages[1].content, "X");
        assert!(!state.loading);
    }

    #[test]
    fn test_every_failure_becomes_fallback() {
        let failures = [
            ApiError::Network("connection refused".to_string()),
            ApiError::Timeout,
            ApiError::Status {
                status: 503,
                message: "Model not loaded".to_string(),
            },
            ApiError::Parse("expected value".to_string()),
            ApiError::Cancelled,
        ];

        for failure in failures {
            let mut state = with_input("Hello");
            state.begin_send();
            state.finish_send(Err(failure));

            assert_eq!(state.messages[1].content, FALLBACK_REPLY);
            assert_eq!(state.messages[1].sender, Sender::Bot);
            assert!(!state.loading);
        }
    }

    #[test]
    fn test_ids_strictly_increase() {
        let mut state = ChatState::default();
        for i in 0..20 {
            state.input = format!("m{i}");
            state.begin_send();
            state.finish_send(Ok("r".to_string()));
        }

        assert!(state.messages.windows(2).all(|w| w[0].id < w[1].id));
    }

    #[test]
    fn test_login_flow() {
        let mut state = ChatState::default();
        assert_eq!(state.begin_login(), None);

        state.login.username = " alice ".to_string();
        state.login.password = "SecurePass123".to_string();
        let (username, password) = state.begin_login().unwrap();
        assert_eq!(username, "alice");
        assert_eq!(password, "SecurePass123");
        assert!(state.login.password.is_empty());

        state.finish_login(username, Ok("tok".to_string()));
        assert_eq!(state.token().as_deref(), Some("tok"));
        assert!(!state.login.pending);
    }

    #[test]
    fn test_login_failure_shows_server_message() {
        let mut state = ChatState::default();
        state.finish_login(
            "alice".to_string(),
            Err(ApiError::Status {
                status: 401,
                message: "Incorrect username or password".to_string(),
            }),
        );

        assert_eq!(state.login.error.as_deref(), Some("Incorrect username or password"));
        assert!(state.session.is_none());
    }
}
