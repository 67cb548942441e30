//! Common UI components shared across views.
//!
//! This module contains the header bar, tab bar, status bar, and help overlay.

use greenmind_types::Severity;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Tabs},
    Frame,
};

use crate::app::{App, View};
use crate::data::duration::format_elapsed;
use crate::data::metric::to_fixed;
use crate::i18n::Message;

/// Render the header bar with plant overview.
///
/// Displays: worst severity indicator, zone counts by severity, total power,
/// active alerts and the current language.
pub fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let Some(ref dashboard) = app.dashboard else {
        let line = Line::from(vec![
            Span::styled(" GREENMIND ", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(format!("| {}", app.t(Message::Loading))),
        ]);
        frame.render_widget(Paragraph::new(line), area);
        return;
    };

    let severities = &dashboard.severities;
    let ok = severities.count(Severity::Ok);
    let warning = severities.count(Severity::Warning);
    let critical = severities.count(Severity::Critical);
    let summary = &dashboard.readings.summary;

    let line = Line::from(vec![
        Span::styled(" ● ", app.theme.severity_style(severities.worst())),
        Span::styled(
            format!("{} ", dashboard.factory.name),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw("│ "),
        Span::styled(format!("{}", ok), Style::default().fg(app.theme.ok)),
        Span::raw(" ok "),
        count_span(app, warning, Severity::Warning),
        Span::raw(" warn "),
        count_span(app, critical, Severity::Critical),
        Span::raw(" crit │ "),
        Span::raw(format!("{} kW", to_fixed(summary.total_power_kw, 1))),
        Span::raw(" │ "),
        Span::raw(format!("{} alerts", summary.active_alerts)),
        Span::raw(" │ "),
        Span::styled(
            app.language.code().to_uppercase(),
            Style::default().fg(app.theme.highlight),
        ),
    ]);

    frame.render_widget(Paragraph::new(line), area);
}

fn count_span(app: &App, count: usize, severity: Severity) -> Span<'static> {
    if count > 0 {
        Span::styled(format!("{}", count), app.theme.severity_style(severity))
    } else {
        Span::styled("0", Style::default().add_modifier(Modifier::DIM))
    }
}

/// Render the tab bar showing available views.
///
/// Highlights the currently active view.
pub fn render_tabs(frame: &mut Frame, app: &App, area: Rect) {
    let titles: Vec<Line> = View::ALL
        .iter()
        .enumerate()
        .map(|(i, view)| Line::from(format!(" {}:{} ", i + 1, view.label())))
        .collect();

    let selected = View::ALL
        .iter()
        .position(|v| *v == app.current_view)
        .unwrap_or(0);

    let tabs = Tabs::new(titles)
        .select(selected)
        .style(app.theme.tab_inactive)
        .highlight_style(app.theme.tab_active)
        .divider("|");

    frame.render_widget(tabs, area);
}

/// Render the status bar at the bottom.
///
/// Shows: backend description, time since last load, available controls.
/// Also displays temporary status messages and errors.
pub fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    // Check for temporary status message first
    if let Some(msg) = app.get_status_message() {
        let paragraph =
            Paragraph::new(format!(" {} ", msg)).style(Style::default().fg(app.theme.highlight));
        frame.render_widget(paragraph, area);
        return;
    }

    if let Some(ref err) = app.load_error {
        let paragraph = Paragraph::new(format!(" {} | q:quit r:retry", err))
            .style(Style::default().fg(app.theme.critical));
        frame.render_widget(paragraph, area);
        return;
    }

    let status = if let Some(ref dashboard) = app.dashboard {
        let controls = match app.current_view {
            View::Map | View::Readings => "↑↓:zone a:analyze r:reload L:lang ?:help q:quit",
            View::Analysis => "↑↓:issue Enter:detail a:analyze e:export ?:help q:quit",
            View::Chat => {
                if app.composing {
                    "Type a message | Enter:send Esc:cancel"
                } else {
                    "i:type ↑↓:suggestion Enter:send ?:help q:quit"
                }
            }
        };

        format!(
            " {} | Loaded {} | {}",
            app.source_description(),
            format_elapsed(dashboard.loaded_at.elapsed()),
            controls,
        )
    } else {
        format!(" {} | q:quit", app.t(Message::Loading))
    };

    let paragraph = Paragraph::new(status).style(Style::default().add_modifier(Modifier::DIM));

    frame.render_widget(paragraph, area);
}

/// Render the help overlay with keyboard shortcuts.
///
/// Displayed as a centered modal on top of the current view.
pub fn render_help(frame: &mut Frame, app: &App, area: Rect) {
    let section = |title: &'static str| {
        Line::from(vec![Span::styled(
            title,
            Style::default().add_modifier(Modifier::BOLD),
        )])
    };

    let help_text = vec![
        Line::from(vec![Span::styled("Keyboard Shortcuts", app.theme.header)]),
        Line::from(""),
        section(" Navigation"),
        Line::from("  Tab 1-4     Switch views"),
        Line::from("  ↑/↓ j/k     Select zone / issue"),
        Line::from("  Enter       Issue detail"),
        Line::from("  Esc         Go back"),
        Line::from(""),
        section(" Factory"),
        Line::from("  a         Run AI analysis"),
        Line::from("  r         Reload layout and readings"),
        Line::from("  L         Switch language"),
        Line::from("  e         Export to JSON"),
        Line::from(""),
        section(" Chat"),
        Line::from("  i         Type a message"),
        Line::from("  Enter     Send message / suggestion"),
        Line::from("  Esc       Stop typing"),
        Line::from(""),
        Line::from("  q         Quit"),
        Line::from(""),
        Line::from(vec![Span::styled(
            "Press any key to close",
            Style::default().add_modifier(Modifier::DIM),
        )]),
    ];

    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.highlight));

    let paragraph = Paragraph::new(help_text).block(block);

    // Center the help overlay - responsive to terminal size
    let help_width = 44u16.min(area.width.saturating_sub(4));
    let help_height = 25u16.min(area.height.saturating_sub(2));
    let x = area.x + (area.width.saturating_sub(help_width)) / 2;
    let y = area.y + (area.height.saturating_sub(help_height)) / 2;
    let help_area = Rect::new(x, y, help_width, help_height);

    // Clear the area behind the help
    frame.render_widget(Clear, help_area);
    frame.render_widget(paragraph, help_area);
}
