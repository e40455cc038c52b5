use chatbot_core::{
    ChatClient, ChatError, ChatSession, ChatView, LocalizedView, Localizer, UiText,
};
use ratatui::layout::Rect;
use tokio::sync::mpsc;
use crate::input::InputBox;
use crate::tui::AppEvent;
use crate::view::MessageList;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Keys scroll the chat pane
    Normal,
    /// Keys go to the message input
    Editing,
}

/// Everything the chat screen displays.
#[derive(Debug)]
pub struct ChatScreen {
    pub messages: MessageList,
    pub input: InputBox,
    pub input_mode: InputMode,
    pub send_enabled: bool,
    pub text: UiText,
}

impl Default for ChatScreen {
    fn default() -> Self {
        Self {
            messages: MessageList::new(),
            input: InputBox::new(),
            input_mode: InputMode::Normal,
            send_enabled: true,
            text: UiText::default(),
        }
    }
}

impl ChatView for ChatScreen {
    fn add_message(&mut self, content: &str, is_user: bool) {
        self.messages.add_message(content, is_user);
    }

    fn show_typing_indicator(&mut self) {
        self.messages.show_typing_indicator();
    }

    fn hide_typing_indicator(&mut self) {
        self.messages.hide_typing_indicator();
    }

    fn reset_input(&mut self) {
        self.input.clear();
    }

    fn set_send_enabled(&mut self, enabled: bool) {
        self.send_enabled = enabled;
    }

    fn focus_input(&mut self) {
        self.input.focus();
        self.input_mode = InputMode::Editing;
    }
}

impl LocalizedView for ChatScreen {
    fn apply_ui_text(&mut self, text: &UiText) {
        self.text = text.clone();
    }
}

pub struct App {
    pub should_quit: bool,
    pub screen: ChatScreen,
    pub session: ChatSession,
    pub i18n: Localizer,
    pub client: ChatClient,

    // Animation state
    pub animation_frame: u8, // 0-2 for the typing indicator dots

    // Chat pane area for mouse hit-testing (updated during render)
    pub chat_area: Option<Rect>,

    events: mpsc::UnboundedSender<AppEvent>,
}

impl App {
    pub fn new(
        client: ChatClient,
        i18n: Localizer,
        events: mpsc::UnboundedSender<AppEvent>,
    ) -> Self {
        let mut screen = ChatScreen::default();
        i18n.update_ui_language(&mut screen);
        // The input has focus from the start
        screen.focus_input();

        Self {
            should_quit: false,
            screen,
            session: ChatSession::new(),
            i18n,
            client,
            animation_frame: 0,
            chat_area: None,
            events,
        }
    }

    /// Send whatever is in the input box. The request runs in the background
    /// and reports back as [`AppEvent::Reply`].
    pub fn submit(&mut self) {
        let input = self.screen.input.text().to_string();
        let Some(request) = self
            .session
            .begin_send(&input, self.i18n.language(), &mut self.screen)
        else {
            return;
        };

        let client = self.client.clone();
        let request_task = tokio::spawn(async move { client.chat(&request).await });

        let events = self.events.clone();
        tokio::spawn(async move {
            let outcome = match request_task.await {
                Ok(outcome) => outcome,
                Err(e) => Err(ChatError::Task(e.to_string())),
            };
            if events.send(AppEvent::Reply(outcome)).is_err() {
                tracing::debug!("chat reply arrived after the UI closed");
            }
        });
    }

    pub fn finish_send(&mut self, outcome: Result<String, ChatError>) {
        self.session.complete(outcome, &self.i18n, &mut self.screen);
    }

    pub fn toggle_language(&mut self) {
        self.i18n.toggle(&mut self.screen);
    }

    pub fn focus_input(&mut self) {
        self.screen.focus_input();
    }

    pub fn unfocus_input(&mut self) {
        self.screen.input.blur();
        self.screen.input_mode = InputMode::Normal;
    }

    /// Tick animation frame (called by Tick event)
    pub fn tick_animation(&mut self) {
        if self.screen.messages.typing_indicator().is_some() {
            self.animation_frame = (self.animation_frame + 1) % 3;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chatbot_core::{ChatMessage, Language, SessionState};
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_app(server_uri: &str) -> (App, mpsc::UnboundedReceiver<AppEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let app = App::new(
            ChatClient::new(server_uri),
            Localizer::new(Language::Ja),
            tx,
        );
        (app, rx)
    }

    fn type_str(app: &mut App, s: &str) {
        for c in s.chars() {
            app.screen.input.insert(c);
        }
    }

    async fn next_reply(rx: &mut mpsc::UnboundedReceiver<AppEvent>) -> Result<String, ChatError> {
        loop {
            match rx.recv().await {
                Some(AppEvent::Reply(outcome)) => return outcome,
                Some(_) => continue,
                None => panic!("event channel closed"),
            }
        }
    }

    #[test]
    fn test_starts_focused_with_japanese_text() {
        let (app, _rx) = test_app("http://127.0.0.1:9");
        assert!(app.screen.input.is_focused());
        assert_eq!(app.screen.input_mode, InputMode::Editing);
        assert!(app.screen.send_enabled);
        assert_eq!(app.screen.text.header_title, "🤖 AI チャットボット");
        assert_eq!(app.screen.text.placeholder, "メッセージを入力...");
        assert_eq!(app.screen.text.toggle_label, "EN");
    }

    #[test]
    fn test_toggle_language_updates_everything_at_once() {
        let (mut app, _rx) = test_app("http://127.0.0.1:9");
        app.toggle_language();

        assert_eq!(app.i18n.language(), Language::En);
        assert_eq!(app.screen.text.header_title, "🤖 AI Chatbot");
        assert_eq!(app.screen.text.placeholder, "Type a message...");
        assert_eq!(app.screen.text.toggle_label, "JP");
        assert_eq!(app.screen.text.toggle_caption, "言語");
    }

    #[tokio::test]
    async fn test_whitespace_submit_is_noop() {
        let (mut app, _rx) = test_app("http://127.0.0.1:9");
        type_str(&mut app, "   ");
        app.submit();

        assert!(app.session.history().is_empty());
        assert!(app.screen.messages.bubbles().is_empty());
        assert!(app.screen.messages.welcome_visible());
        assert!(app.screen.send_enabled);
    }

    #[tokio::test]
    async fn test_hello_end_to_end() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/chat"))
            .and(body_json(json!({"message": "Hello", "history": [], "language": "ja"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"response": "Hi there"})))
            .expect(1)
            .mount(&server)
            .await;

        let (mut app, mut rx) = test_app(&server.uri());
        type_str(&mut app, "Hello");
        app.submit();

        // While in flight: send disabled, indicator shown, input cleared
        assert!(!app.screen.send_enabled);
        assert!(app.screen.messages.typing_indicator().is_some());
        assert!(app.screen.input.is_empty());
        assert_eq!(app.session.state(), SessionState::Sending);

        let outcome = next_reply(&mut rx).await;
        app.finish_send(outcome);

        assert_eq!(
            app.session.history().messages(),
            &[ChatMessage::user("Hello"), ChatMessage::assistant("Hi there")]
        );
        assert!(app.screen.send_enabled);
        assert!(app.screen.input.is_focused());
        assert!(app.screen.messages.typing_indicator().is_none());
        assert_eq!(app.screen.messages.bubbles().len(), 2);
    }

    #[tokio::test]
    async fn test_server_error_end_to_end() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/chat"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let (mut app, mut rx) = test_app(&server.uri());
        type_str(&mut app, "Test");
        app.submit();
        let outcome = next_reply(&mut rx).await;
        app.finish_send(outcome);

        let bubbles = app.screen.messages.bubbles();
        assert_eq!(bubbles.len(), 2);
        assert!(!bubbles[1].is_user);
        assert_eq!(
            bubbles[1].content,
            "申し訳ございません。エラーが発生しました。もう一度お試しください。"
        );
        assert_eq!(app.session.history().messages(), &[ChatMessage::user("Test")]);
        assert!(app.screen.send_enabled);
    }

    #[tokio::test]
    async fn test_submit_while_sending_is_rejected() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/chat"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"response": "ok"})))
            .expect(1)
            .mount(&server)
            .await;

        let (mut app, mut rx) = test_app(&server.uri());
        type_str(&mut app, "first");
        app.submit();
        type_str(&mut app, "second");
        app.submit();

        assert_eq!(app.session.history().len(), 1);
        assert_eq!(app.screen.input.text(), "second");

        let outcome = next_reply(&mut rx).await;
        app.finish_send(outcome);
        assert_eq!(app.session.history().len(), 2);
    }

    #[tokio::test]
    async fn test_lost_request_task_shows_error_and_reenables_send() {
        let (mut app, _rx) = test_app("http://127.0.0.1:9");
        type_str(&mut app, "Hello");
        app.submit();
        assert_eq!(app.session.state(), SessionState::Sending);
        assert!(!app.screen.send_enabled);

        app.finish_send(Err(ChatError::Task("task panicked".to_string())));

        let bubbles = app.screen.messages.bubbles();
        assert_eq!(bubbles.len(), 2);
        assert!(!bubbles[1].is_user);
        assert_eq!(
            bubbles[1].content,
            "申し訳ございません。エラーが発生しました。もう一度お試しください。"
        );
        assert_eq!(app.session.state(), SessionState::Idle);
        assert_eq!(app.session.history().messages(), &[ChatMessage::user("Hello")]);
        assert!(app.screen.send_enabled);
        assert!(app.screen.input.is_focused());
        assert!(app.screen.messages.typing_indicator().is_none());
    }
}
