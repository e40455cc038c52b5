use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph},
};
use unicode_width::UnicodeWidthStr;
use crate::app::{App, InputMode};
use crate::view::wrap_text;

pub fn render(app: &mut App, frame: &mut Frame) {
    let area = frame.area();
    let input_height = app.screen.input.height() + 2;

    // Main layout: header, chat, input, footer
    let [header_area, chat_area, input_area, footer_area] = Layout::vertical([
        Constraint::Length(2),
        Constraint::Min(3),
        Constraint::Length(input_height),
        Constraint::Length(1),
    ])
    .areas(area);

    render_header(app, frame, header_area);
    render_chat(app, frame, chat_area);
    render_input(app, frame, input_area);
    render_footer(app, frame, footer_area);
}

fn render_header(app: &App, frame: &mut Frame, area: Rect) {
    let text = &app.screen.text;
    let toggle = format!(" {} ", text.toggle_label);

    let [title_area, toggle_area] = Layout::horizontal([
        Constraint::Min(0),
        Constraint::Length(toggle.width() as u16 + 1),
    ])
    .areas(area);

    let header = Paragraph::new(vec![
        Line::from(Span::styled(
            format!(" {}", text.header_title),
            Style::default().fg(Color::Cyan).bold(),
        )),
        Line::from(Span::styled(
            format!(" {}", text.subtitle),
            Style::default().fg(Color::Gray),
        )),
    ])
    .style(Style::default().bg(Color::DarkGray));
    frame.render_widget(header, title_area);

    let toggle_button = Paragraph::new(Line::from(Span::styled(
        toggle,
        Style::default().bg(Color::Blue).fg(Color::White).bold(),
    )))
    .style(Style::default().bg(Color::DarkGray));
    frame.render_widget(toggle_button, toggle_area);
}

fn render_chat(app: &mut App, frame: &mut Frame, area: Rect) {
    app.chat_area = Some(area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(if app.screen.input_mode == InputMode::Normal {
            Color::Cyan
        } else {
            Color::DarkGray
        }));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let messages = &app.screen.messages;
    if messages.welcome_visible() && messages.bubbles().is_empty() {
        render_welcome(app, frame, inner);
        return;
    }

    let width = inner.width as usize;
    let mut lines: Vec<Line> = Vec::new();

    for bubble in messages.bubbles() {
        if bubble.is_user {
            for line in wrap_text(&bubble.content, width) {
                lines.push(
                    Line::from(Span::styled(line, Style::default().fg(Color::Cyan)))
                        .alignment(Alignment::Right),
                );
            }
        } else {
            for line in wrap_text(&bubble.content, width) {
                lines.push(Line::from(Span::styled(line, Style::default().fg(Color::White))));
            }
        }
        lines.push(Line::default());
    }

    if messages.typing_indicator().is_some() {
        // Animated dots: cycles through "•", "• •", "• • •"
        let dots = vec!["•"; app.animation_frame as usize + 1].join(" ");
        lines.push(Line::from(Span::styled(
            dots,
            Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
        )));
    }

    let total = lines.len().min(u16::MAX as usize) as u16;
    let scroll = app.screen.messages.fit(total, inner.height);

    let chat = Paragraph::new(Text::from(lines)).scroll((scroll, 0));
    frame.render_widget(chat, inner);
}

fn render_welcome(app: &App, frame: &mut Frame, area: Rect) {
    let text = &app.screen.text;
    let [_, welcome_area, _] = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(3),
        Constraint::Fill(1),
    ])
    .areas(area);

    let welcome = Paragraph::new(vec![
        Line::from(Span::styled(
            text.welcome_title.clone(),
            Style::default().fg(Color::Yellow).bold(),
        )),
        Line::default(),
        Line::from(Span::styled(
            text.welcome_message.clone(),
            Style::default().fg(Color::Gray),
        )),
    ])
    .alignment(Alignment::Center);
    frame.render_widget(welcome, welcome_area);
}

fn render_input(app: &mut App, frame: &mut Frame, area: Rect) {
    let editing = app.screen.input_mode == InputMode::Editing;
    let border_color = if editing { Color::Yellow } else { Color::DarkGray };

    // The send control: greyed out while a request is in flight
    let send_style = if app.screen.send_enabled {
        Style::default().fg(Color::Green).bold()
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color))
        .title(Line::from(Span::styled(" ➤ ", send_style)).alignment(Alignment::Right));
    let inner = block.inner(area);

    let input = &mut app.screen.input;
    input.set_width(inner.width);

    let content = if input.is_empty() {
        Text::from(Span::styled(
            app.screen.text.placeholder.clone(),
            Style::default().fg(Color::DarkGray),
        ))
    } else {
        let offset = input.scroll_offset() as usize;
        let lines: Vec<Line> = input
            .visual_lines()
            .into_iter()
            .skip(offset)
            .map(Line::from)
            .collect();
        Text::from(lines)
    };

    let paragraph = Paragraph::new(content)
        .style(Style::default().fg(Color::Cyan))
        .block(block);
    frame.render_widget(paragraph, area);

    // Show cursor when editing
    if editing {
        let (col, row) = input.cursor_position();
        let row = row.saturating_sub(input.scroll_offset());
        frame.set_cursor_position((inner.x + col, inner.y + row));
    }
}

fn render_footer(app: &App, frame: &mut Frame, area: Rect) {
    let (mode_text, mode_style) = match app.screen.input_mode {
        InputMode::Editing => (" CHAT ", Style::default().bg(Color::Yellow).fg(Color::Black)),
        InputMode::Normal => (" SCROLL ", Style::default().bg(Color::Blue).fg(Color::White)),
    };

    // Key style: dark background with bright text for visibility on both light/dark terminals
    let key_style = Style::default().bg(Color::DarkGray).fg(Color::White);
    let label_style = Style::default().bg(Color::Black).fg(Color::White);

    let mut hints = match app.screen.input_mode {
        InputMode::Editing => vec![
            Span::styled(" Enter ", key_style),
            Span::styled(" send ", label_style),
            Span::styled(" Shift+Enter ", key_style),
            Span::styled(" newline ", label_style),
            Span::styled(" Esc ", key_style),
            Span::styled(" scroll ", label_style),
        ],
        InputMode::Normal => vec![
            Span::styled(" j/k ", key_style),
            Span::styled(" scroll ", label_style),
            Span::styled(" i ", key_style),
            Span::styled(" type ", label_style),
            Span::styled(" q ", key_style),
            Span::styled(" quit ", label_style),
        ],
    };

    // The language toggle, labelled with the language it switches to
    hints.extend(vec![
        Span::styled(" F2 ", key_style),
        Span::styled(
            format!(" {} · {} ", app.screen.text.toggle_label, app.screen.text.toggle_caption),
            label_style,
        ),
    ]);

    let footer_content = Line::from(
        vec![
            Span::styled(mode_text, mode_style),
            Span::styled(" ", label_style),
        ]
        .into_iter()
        .chain(hints)
        .collect::<Vec<_>>(),
    );

    let footer = Paragraph::new(footer_content).style(Style::default().bg(Color::Black));
    frame.render_widget(footer, area);
}
