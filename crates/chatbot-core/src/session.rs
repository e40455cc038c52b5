//! Chat session controller
//!
//! Drives one send/receive cycle: `Idle -> Sending -> Idle`. The controller
//! never touches widgets directly; it talks to whatever implements
//! [`ChatView`], which keeps the ordering rules testable without a terminal.
//!
//! A cycle is split into [`ChatSession::begin_send`] and
//! [`ChatSession::complete`] so an event loop can keep drawing while the
//! request is in flight. [`ChatSession::send`] runs both halves back to back.

use crate::api::{ChatClient, ChatRequest};
use crate::error::ChatError;
use crate::i18n::{Language, Localizer};
use crate::state::{ChatMessage, Conversation};

/// The display surface a session renders into.
pub trait ChatView {
    fn add_message(&mut self, content: &str, is_user: bool);
    fn show_typing_indicator(&mut self);
    fn hide_typing_indicator(&mut self);
    /// Clear the input and shrink it back to one line.
    fn reset_input(&mut self);
    fn set_send_enabled(&mut self, enabled: bool);
    fn focus_input(&mut self);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    Idle,
    Sending,
}

#[derive(Debug, Default)]
pub struct ChatSession {
    history: Conversation,
    state: SessionState,
}

impl ChatSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_sending(&self) -> bool {
        self.state == SessionState::Sending
    }

    pub fn history(&self) -> &Conversation {
        &self.history
    }

    /// Start a cycle for `input`.
    ///
    /// Returns the request to dispatch, or `None` when there is nothing to
    /// send: blank input, or a request already in flight. The send control is
    /// disabled before this returns, i.e. before the caller can suspend.
    pub fn begin_send(
        &mut self,
        input: &str,
        language: Language,
        view: &mut impl ChatView,
    ) -> Option<ChatRequest> {
        let message = input.trim();
        if message.is_empty() {
            return None;
        }
        if self.is_sending() {
            tracing::debug!("send ignored: a request is already in flight");
            return None;
        }

        view.add_message(message, true);

        let history = self.history.messages().to_vec();
        self.history.push(ChatMessage::user(message));

        view.reset_input();
        self.state = SessionState::Sending;
        view.set_send_enabled(false);
        view.show_typing_indicator();

        Some(ChatRequest {
            message: message.to_string(),
            history,
            language,
        })
    }

    /// Finish the in-flight cycle with the backend's outcome.
    ///
    /// Failures are shown as the localized error bubble and never enter the
    /// history. Either way the session ends `Idle` with the send control
    /// enabled and the input focused. Returns `true` on a successful reply.
    pub fn complete(
        &mut self,
        outcome: Result<String, ChatError>,
        i18n: &Localizer,
        view: &mut impl ChatView,
    ) -> bool {
        if !self.is_sending() {
            tracing::warn!("discarding chat outcome with no request in flight");
            return false;
        }

        view.hide_typing_indicator();
        let succeeded = match outcome {
            Ok(reply) => {
                view.add_message(&reply, false);
                self.history.push(ChatMessage::assistant(reply));
                true
            }
            Err(e) => {
                tracing::error!(error = %e, "chat request failed");
                view.add_message(i18n.translate("errorMessage"), false);
                false
            }
        };

        self.state = SessionState::Idle;
        view.set_send_enabled(true);
        view.focus_input();
        succeeded
    }

    /// Run a whole cycle against `client`. Returns `None` when nothing was
    /// sent, otherwise whether a reply arrived.
    pub async fn send(
        &mut self,
        input: &str,
        client: &ChatClient,
        i18n: &Localizer,
        view: &mut impl ChatView,
    ) -> Option<bool> {
        let request = self.begin_send(input, i18n.language(), view)?;
        let outcome = client.chat(&request).await;
        Some(self.complete(outcome, i18n, view))
    }
}
