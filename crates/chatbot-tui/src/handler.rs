use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;
use crate::app::{App, InputMode};
use crate::input::InputAction;
use crate::tui::AppEvent;

pub fn handle_event(app: &mut App, event: AppEvent) {
    match event {
        AppEvent::Key(key) => handle_key(app, key),
        AppEvent::Mouse(mouse) => handle_mouse(app, mouse),
        AppEvent::Resize(_, _) => {}
        AppEvent::Tick => app.tick_animation(),
        AppEvent::Reply(outcome) => app.finish_send(outcome),
    }
}

fn handle_key(app: &mut App, key: KeyEvent) {
    // Global keys that work in any mode
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.should_quit = true;
        return;
    }
    if key.code == KeyCode::F(2) {
        app.toggle_language();
        return;
    }

    match app.screen.input_mode {
        InputMode::Normal => handle_normal_mode(app, key),
        InputMode::Editing => handle_editing_mode(app, key),
    }
}

fn handle_normal_mode(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') => app.should_quit = true,
        KeyCode::Char('i') | KeyCode::Enter | KeyCode::Tab => app.focus_input(),
        KeyCode::Char('l') => app.toggle_language(),

        KeyCode::Char('j') | KeyCode::Down => app.screen.messages.scroll_down(1),
        KeyCode::Char('k') | KeyCode::Up => app.screen.messages.scroll_up(1),
        KeyCode::Char('d') | KeyCode::PageDown => app.screen.messages.scroll_down(10),
        KeyCode::Char('u') | KeyCode::PageUp => app.screen.messages.scroll_up(10),
        KeyCode::Char('g') | KeyCode::Home => app.screen.messages.scroll_to_top(),
        KeyCode::Char('G') | KeyCode::End => app.screen.messages.scroll_to_bottom(),
        _ => {}
    }
}

fn handle_editing_mode(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Tab => {
            app.unfocus_input();
            return;
        }
        KeyCode::PageUp => {
            app.screen.messages.scroll_up(10);
            return;
        }
        KeyCode::PageDown => {
            app.screen.messages.scroll_down(10);
            return;
        }
        _ => {}
    }

    if app.screen.input.handle_key(key) == InputAction::Submit {
        app.submit();
    }
}

/// Check if a point is within a rectangle
fn point_in_rect(x: u16, y: u16, rect: Rect) -> bool {
    x >= rect.x && x < rect.x + rect.width && y >= rect.y && y < rect.y + rect.height
}

fn handle_mouse(app: &mut App, mouse: MouseEvent) {
    let in_chat = app
        .chat_area
        .map(|r| point_in_rect(mouse.column, mouse.row, r))
        .unwrap_or(false);
    if !in_chat {
        return;
    }

    match mouse.kind {
        MouseEventKind::ScrollDown => app.screen.messages.scroll_down(3),
        MouseEventKind::ScrollUp => app.screen.messages.scroll_up(3),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chatbot_core::{ChatClient, ChatError, Language, Localizer};
    use tokio::sync::mpsc;

    fn test_app() -> App {
        let (tx, _rx) = mpsc::unbounded_channel();
        App::new(
            ChatClient::new("http://127.0.0.1:9"),
            Localizer::new(Language::Ja),
            tx,
        )
    }

    fn press(app: &mut App, code: KeyCode) {
        handle_event(app, AppEvent::Key(KeyEvent::new(code, KeyModifiers::NONE)));
    }

    #[test]
    fn test_f2_toggles_language_while_typing() {
        let mut app = test_app();
        press(&mut app, KeyCode::Char('a'));
        press(&mut app, KeyCode::F(2));

        assert_eq!(app.i18n.language(), Language::En);
        assert_eq!(app.screen.input.text(), "a");
        press(&mut app, KeyCode::F(2));
        assert_eq!(app.i18n.language(), Language::Ja);
    }

    #[test]
    fn test_esc_leaves_input_and_i_returns() {
        let mut app = test_app();
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.screen.input_mode, InputMode::Normal);
        assert!(!app.screen.input.is_focused());

        // Typing in normal mode does not reach the input
        press(&mut app, KeyCode::Char('j'));
        assert!(app.screen.input.is_empty());

        press(&mut app, KeyCode::Char('i'));
        assert_eq!(app.screen.input_mode, InputMode::Editing);
        assert!(app.screen.input.is_focused());
    }

    #[test]
    fn test_ctrl_c_quits() {
        let mut app = test_app();
        handle_event(
            &mut app,
            AppEvent::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
        );
        assert!(app.should_quit);
    }

    #[test]
    fn test_stray_reply_is_ignored() {
        let mut app = test_app();
        handle_event(&mut app, AppEvent::Reply(Err(ChatError::Task("cancelled".to_string()))));

        assert!(app.screen.messages.bubbles().is_empty());
        assert!(app.screen.send_enabled);
    }

    #[tokio::test]
    async fn test_enter_with_blank_input_sends_nothing() {
        let mut app = test_app();
        press(&mut app, KeyCode::Char(' '));
        press(&mut app, KeyCode::Enter);

        assert!(app.session.history().is_empty());
        assert!(app.screen.send_enabled);
        assert_eq!(app.screen.input.text(), " ");
    }
}
