//! Factory floor plan view.
//!
//! Zones are drawn as boxes placed by their percentage coordinates, colored
//! by the worst severity found in the latest analysis.

use greenmind_types::Zone;
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{block::BorderType, Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::app::App;
use crate::data::metric::format_metric_value;
use crate::i18n::Message;

/// Screen rectangle for a zone whose position and size are percentages of
/// the floor plan. The result always lies inside `area`.
pub fn zone_rect(zone: &Zone, area: Rect) -> Rect {
    let scale = |pct: f64, len: u16| ((pct.clamp(0.0, 100.0) / 100.0) * len as f64).round() as u16;

    let x = scale(zone.x, area.width).min(area.width.saturating_sub(1));
    let y = scale(zone.y, area.height).min(area.height.saturating_sub(1));
    let w = scale(zone.w, area.width).max(1).min(area.width - x);
    let h = scale(zone.h, area.height).max(1).min(area.height - y);

    Rect::new(area.x + x, area.y + y, w, h)
}

/// Render the Map view: floor plan on the left, selected zone on the right.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let Some(ref dashboard) = app.dashboard else {
        let text = app.load_error.as_deref().unwrap_or(app.t(Message::Loading));
        frame.render_widget(Paragraph::new(text).wrap(Wrap { trim: true }), area);
        return;
    };

    let chunks = Layout::horizontal([Constraint::Fill(1), Constraint::Length(34)]).split(area);

    let plan = Block::default()
        .title(format!(" {} ", dashboard.factory.name))
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.border));
    let inner = plan.inner(chunks[0]);
    frame.render_widget(plan, chunks[0]);

    for (index, zone) in dashboard.factory.zones.iter().enumerate() {
        let rect = zone_rect(zone, inner);
        let severity = dashboard.severity(&zone.id);
        let selected = index == app.selected_zone_index;

        let border_style = if selected {
            app.theme.severity_style(severity).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(app.theme.severity_color(severity))
        };

        let block = Block::default()
            .title(format!(" {} ", zone.label))
            .borders(Borders::ALL)
            .border_type(if selected {
                BorderType::Double
            } else {
                app.theme.border_type
            })
            .border_style(border_style);

        let count = dashboard.issue_count(&zone.id);
        let body = vec![Line::from(vec![
            Span::styled(severity.symbol(), app.theme.severity_style(severity)),
            Span::raw(if count > 0 {
                format!(" {} issue{}", count, if count == 1 { "" } else { "s" })
            } else {
                String::new()
            }),
        ])];

        frame.render_widget(Paragraph::new(body).block(block), rect);
    }

    render_zone_panel(frame, app, chunks[1]);
}

fn render_zone_panel(frame: &mut Frame, app: &App, area: Rect) {
    let Some(ref dashboard) = app.dashboard else {
        return;
    };
    let Some(zone) = app.selected_zone() else {
        return;
    };

    let severity = dashboard.severity(&zone.id);
    let mut lines = vec![
        Line::from(Span::styled(
            zone.label.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(vec![
            Span::raw("Status: "),
            Span::styled(severity.symbol(), app.theme.severity_style(severity)),
        ]),
        Line::from(format!("Issues: {}", dashboard.issue_count(&zone.id))),
        Line::from(""),
    ];

    if let Some(reading) = dashboard.readings.zone(&zone.id) {
        for (name, value) in &reading.sensors {
            lines.push(Line::from(format!(
                "{}: {}",
                name,
                format_metric_value(name, *value)
            )));
        }
        for alert in &reading.alerts {
            lines.push(Line::from(Span::styled(
                format!("⚠ {}", alert),
                Style::default().fg(app.theme.warning),
            )));
        }
    }

    let block = Block::default()
        .title(format!(" Zone {} ", zone.id))
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.border));

    frame.render_widget(
        Paragraph::new(lines).block(block).wrap(Wrap { trim: false }),
        area,
    );
}
