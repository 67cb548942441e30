//! Chat view rendering.
//!
//! Transcript on top (kept scrolled to the newest message), suggested
//! prompts on the right, and the input line at the bottom.

use greenmind_types::ChatRole;
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

use crate::app::App;
use crate::i18n::Message;

/// Render the Chat view.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::vertical([Constraint::Min(5), Constraint::Length(3)]).split(area);
    let body = if app.chat.suggestions.is_empty() {
        Layout::horizontal([Constraint::Fill(1)]).split(chunks[0])
    } else {
        Layout::horizontal([Constraint::Fill(1), Constraint::Length(36)]).split(chunks[0])
    };

    // ----- TRANSCRIPT -----
    let mut lines: Vec<Line> = Vec::new();
    for message in app.chat.messages() {
        let (who, color) = match message.role {
            ChatRole::User => ("You", app.theme.user),
            ChatRole::Assistant => ("GreenMind", app.theme.assistant),
        };
        let mut content = message.content.lines();
        lines.push(Line::from(vec![
            Span::styled(
                format!("{}: ", who),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            ),
            Span::raw(content.next().unwrap_or("").to_string()),
        ]));
        lines.extend(content.map(|l| Line::from(l.to_string())));
        lines.push(Line::from(""));
    }
    if app.chat.is_pending() {
        lines.push(Line::from(Span::styled(
            app.t(Message::ChatThinking),
            Style::default().add_modifier(Modifier::DIM),
        )));
    }

    let transcript_block = Block::default()
        .title(" GreenMind Copilot ")
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.border));
    let inner = transcript_block.inner(body[0]);

    // Rows as ratatui's word wrapper lays them out, so the newest line stays visible.
    let transcript = Paragraph::new(lines).wrap(Wrap { trim: false });
    let overflow = transcript
        .line_count(inner.width)
        .saturating_sub(inner.height as usize);
    let scroll = u16::try_from(overflow).unwrap_or(u16::MAX);

    frame.render_widget(
        transcript.block(transcript_block).scroll((scroll, 0)),
        body[0],
    );

    // ----- SUGGESTIONS -----
    if body.len() > 1 {
        let items: Vec<ListItem> = app
            .chat
            .suggestions
            .iter()
            .map(|s| ListItem::new(s.clone()))
            .collect();
        let list = List::new(items)
            .block(
                Block::default()
                    .title(format!(" {} ", app.t(Message::Suggestions)))
                    .borders(Borders::ALL)
                    .border_type(app.theme.border_type)
                    .border_style(Style::default().fg(app.theme.border)),
            )
            .highlight_style(app.theme.selected)
            .highlight_symbol("▶ ");
        let mut state = ListState::default();
        state.select(app.selected_suggestion);
        frame.render_stateful_widget(list, body[1], &mut state);
    }

    // ----- INPUT -----
    let (input, style) = if app.composing {
        (
            format!("> {}_", app.chat_input),
            Style::default().fg(app.theme.highlight),
        )
    } else if !app.chat_input.is_empty() {
        (format!("> {}", app.chat_input), Style::default())
    } else {
        (
            app.t(Message::ChatPlaceholder).to_string(),
            Style::default().add_modifier(Modifier::DIM),
        )
    };

    let input_block = Block::default()
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(if app.composing {
            Style::default().fg(app.theme.highlight)
        } else {
            Style::default().fg(app.theme.border)
        });

    frame.render_widget(Paragraph::new(input).style(style).block(input_block), chunks[1]);
}
