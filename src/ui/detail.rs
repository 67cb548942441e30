//! Detail overlay rendering.
//!
//! Displays a modal overlay with the selected issue: description, formatted
//! metrics and estimated savings.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, Wrap},
    Frame,
};

use crate::app::App;
use crate::data::metric::{issue_metric_rows, savings_labels};

/// Minimum width required for the detail overlay to render properly.
const MIN_OVERLAY_WIDTH: u16 = 50;
/// Minimum height required for the detail overlay to render properly.
const MIN_OVERLAY_HEIGHT: u16 = 16;

/// Render the issue detail as a modal overlay.
pub fn render_overlay(frame: &mut Frame, app: &App, area: Rect) {
    // Skip rendering if terminal is too small for the overlay
    if area.width < MIN_OVERLAY_WIDTH || area.height < MIN_OVERLAY_HEIGHT {
        return;
    }

    let Some(issue) = app.selected_issue() else {
        return;
    };

    // Width: 90% of screen, clamped to [MIN_OVERLAY_WIDTH, 100]
    let overlay_width = (area.width * 90 / 100).clamp(MIN_OVERLAY_WIDTH, 100);
    // Height: 80% of screen, clamped to [MIN_OVERLAY_HEIGHT, 40]
    let overlay_height = (area.height * 80 / 100).clamp(MIN_OVERLAY_HEIGHT, 40);

    let x = area.x + (area.width.saturating_sub(overlay_width)) / 2;
    let y = area.y + (area.height.saturating_sub(overlay_height)) / 2;
    let overlay_area = Rect::new(x, y, overlay_width, overlay_height);

    frame.render_widget(Clear, overlay_area);

    let chunks = Layout::vertical([
        Constraint::Min(6),    // Header with description
        Constraint::Min(5),    // Metrics table
        Constraint::Length(1), // Footer
    ])
    .split(overlay_area);

    // ===== HEADER SECTION =====
    let severity_style = app.theme.severity_style(issue.severity);
    let savings = savings_labels(issue);

    let mut header_lines = vec![
        Line::from(vec![Span::styled(
            format!(" {} ", issue.title),
            Style::default().add_modifier(Modifier::BOLD),
        )]),
        Line::from(vec![
            Span::raw(" Zone: "),
            Span::styled(
                app.zone_name(&issue.zone_id).to_string(),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::raw("    Severity: "),
            Span::styled(
                format!("{} {}", issue.severity.symbol(), issue.severity),
                severity_style.add_modifier(Modifier::BOLD),
            ),
        ]),
    ];
    if !savings.is_empty() {
        header_lines.push(Line::from(vec![
            Span::raw(" Potential savings: "),
            Span::styled(savings.join(" / "), Style::default().fg(app.theme.ok)),
        ]));
    }
    header_lines.push(Line::from(""));
    header_lines.extend(
        issue
            .description
            .lines()
            .map(|l| Line::from(format!(" {}", l))),
    );

    let header_block = Block::default()
        .title(" Issue Detail ")
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.highlight));

    frame.render_widget(
        Paragraph::new(header_lines)
            .block(header_block)
            .wrap(Wrap { trim: false }),
        chunks[0],
    );

    // ===== METRICS TABLE =====
    let metrics = issue_metric_rows(issue);
    let metrics_block = Block::default()
        .title(format!(" Metrics ({}) ", metrics.len()))
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.border));

    if metrics.is_empty() {
        let empty = Paragraph::new(Line::from(Span::styled(
            "  No metrics reported",
            Style::default().add_modifier(Modifier::DIM),
        )))
        .block(metrics_block);
        frame.render_widget(empty, chunks[1]);
    } else {
        let rows: Vec<Row> = metrics
            .into_iter()
            .map(|(label, value)| Row::new(vec![Cell::from(label), Cell::from(value)]))
            .collect();
        let table = Table::new(rows, [Constraint::Fill(2), Constraint::Fill(1)])
            .header(
                Row::new(vec![Cell::from("Metric"), Cell::from("Value")])
                    .height(1)
                    .style(app.theme.header),
            )
            .block(metrics_block);
        frame.render_widget(table, chunks[1]);
    }

    // ===== FOOTER =====
    let footer = Paragraph::new(Line::from(vec![Span::styled(
        " ↑↓:next issue  Esc:close ",
        Style::default().add_modifier(Modifier::DIM),
    )]));
    frame.render_widget(footer, chunks[2]);
}
