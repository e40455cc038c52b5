//! Message list state behind the chat pane.
//!
//! Holds what the pane shows (bubbles, the welcome block, the typing
//! indicator) and where it is scrolled. Drawing lives in `ui.rs`; this module
//! only decides what exists.

use unicode_width::UnicodeWidthChar;

/// Fixed identifier of the one typing indicator.
pub const TYPING_INDICATOR_ID: &str = "typing-indicator";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bubble {
    pub content: String,
    pub is_user: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypingIndicator {
    pub id: &'static str,
}

#[derive(Debug)]
pub struct MessageList {
    bubbles: Vec<Bubble>,
    welcome_visible: bool,
    typing: Option<TypingIndicator>,
    scroll: u16,
    max_scroll: u16,
    follow: bool,
}

impl Default for MessageList {
    fn default() -> Self {
        Self {
            bubbles: Vec::new(),
            welcome_visible: true,
            typing: None,
            scroll: 0,
            max_scroll: 0,
            follow: true,
        }
    }
}

impl MessageList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a bubble. The first one also retires the welcome block.
    pub fn add_message(&mut self, content: &str, is_user: bool) {
        self.bubbles.push(Bubble {
            content: content.to_string(),
            is_user,
        });
        self.welcome_visible = false;
        self.scroll_to_bottom();
    }

    pub fn show_typing_indicator(&mut self) {
        if self.typing.is_none() {
            self.typing = Some(TypingIndicator {
                id: TYPING_INDICATOR_ID,
            });
        }
        self.scroll_to_bottom();
    }

    pub fn hide_typing_indicator(&mut self) {
        self.typing = None;
    }

    pub fn typing_indicator(&self) -> Option<&TypingIndicator> {
        self.typing.as_ref()
    }

    pub fn bubbles(&self) -> &[Bubble] {
        &self.bubbles
    }

    pub fn welcome_visible(&self) -> bool {
        self.welcome_visible
    }

    pub fn scroll(&self) -> u16 {
        self.scroll
    }

    pub fn is_following(&self) -> bool {
        self.follow
    }

    pub fn scroll_to_bottom(&mut self) {
        self.follow = true;
        self.scroll = self.max_scroll;
    }

    pub fn scroll_to_top(&mut self) {
        self.follow = false;
        self.scroll = 0;
    }

    pub fn scroll_up(&mut self, lines: u16) {
        self.follow = false;
        self.scroll = self.scroll.saturating_sub(lines);
    }

    pub fn scroll_down(&mut self, lines: u16) {
        self.scroll = self.scroll.saturating_add(lines).min(self.max_scroll);
        if self.scroll >= self.max_scroll {
            self.follow = true;
        }
    }

    /// Reconcile the scroll offset with the laid-out content height.
    /// Called by the renderer every frame; returns the offset to draw at.
    pub fn fit(&mut self, total_lines: u16, viewport_height: u16) -> u16 {
        self.max_scroll = total_lines.saturating_sub(viewport_height);
        self.scroll = if self.follow {
            self.max_scroll
        } else {
            self.scroll.min(self.max_scroll)
        };
        self.scroll
    }
}

/// Hard-wrap `text` to `width` display columns, keeping explicit newlines.
///
/// Always returns at least one (possibly empty) line. A width of zero means
/// no wrapping.
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();

    for raw in text.split('\n') {
        if width == 0 {
            lines.push(raw.to_string());
            continue;
        }

        let mut line = String::new();
        let mut line_width = 0;
        for c in raw.chars() {
            let w = c.width().unwrap_or(0);
            if line_width + w > width && !line.is_empty() {
                lines.push(std::mem::take(&mut line));
                line_width = 0;
            }
            line.push(c);
            line_width += w;
        }
        lines.push(line);
    }

    lines
}
