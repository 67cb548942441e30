//! Readings view rendering.
//!
//! Plant-wide summary on top, a zone table on the left and the selected
//! zone's sensors and alerts on the right.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame,
};

use crate::app::App;
use crate::data::metric::{format_metric_label, format_metric_value, to_fixed};
use crate::i18n::Message;

/// Render the Readings view.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let Some(ref dashboard) = app.dashboard else {
        frame.render_widget(Paragraph::new(app.t(Message::Loading)), area);
        return;
    };

    let chunks = Layout::vertical([Constraint::Length(3), Constraint::Min(5)]).split(area);
    let summary = &dashboard.readings.summary;

    let summary_line = Line::from(vec![
        Span::raw(" Power: "),
        Span::styled(
            format_metric_value("total_power_kw", summary.total_power_kw),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw("   Efficiency: "),
        Span::styled(
            format_metric_value("overall_efficiency", summary.overall_efficiency),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw("   Output: "),
        Span::styled(
            format!("{} bottles/h", to_fixed(summary.production_rate_bottles_per_hour, 0)),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw("   Alerts: "),
        Span::styled(
            summary.active_alerts.to_string(),
            if summary.active_alerts > 0 {
                Style::default().fg(app.theme.warning)
            } else {
                Style::default()
            },
        ),
    ]);

    let title = if dashboard.readings.timestamp.is_empty() {
        " Plant ".to_string()
    } else {
        format!(" Plant @ {} ", dashboard.readings.timestamp)
    };
    let summary_block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.border));
    frame.render_widget(Paragraph::new(summary_line).block(summary_block), chunks[0]);

    let body = Layout::horizontal([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(chunks[1]);

    // ----- ZONE TABLE -----
    let header = Row::new(vec![
        Cell::from("Zone"),
        Cell::from("Sensors"),
        Cell::from("Alerts"),
        Cell::from("Status"),
    ])
    .height(1)
    .style(app.theme.header);

    let rows: Vec<Row> = dashboard
        .factory
        .zones
        .iter()
        .map(|zone| {
            let reading = dashboard.readings.zone(&zone.id);
            let sensors = reading.map_or(0, |r| r.sensors.len());
            let alerts = reading.map_or(0, |r| r.alerts.len());
            let severity = dashboard.severity(&zone.id);
            Row::new(vec![
                Cell::from(zone.label.clone()),
                Cell::from(sensors.to_string()),
                Cell::from(if alerts > 0 {
                    alerts.to_string()
                } else {
                    "-".to_string()
                }),
                Cell::from(severity.symbol()).style(app.theme.severity_style(severity)),
            ])
        })
        .collect();

    let widths = [
        Constraint::Fill(3),
        Constraint::Length(8),
        Constraint::Length(7),
        Constraint::Length(7),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(
            Block::default()
                .title(format!(" Zones ({}) ", dashboard.factory.zones.len()))
                .borders(Borders::ALL)
                .border_type(app.theme.border_type)
                .border_style(Style::default().fg(app.theme.border)),
        )
        .row_highlight_style(app.theme.selected)
        .highlight_symbol("▶ ");

    let mut state = TableState::default();
    if !dashboard.factory.zones.is_empty() {
        state.select(Some(app.selected_zone_index));
    }
    frame.render_stateful_widget(table, body[0], &mut state);

    // ----- SENSOR TABLE -----
    let zone = app.selected_zone();
    let reading = zone.and_then(|z| dashboard.readings.zone(&z.id));

    let mut sensor_rows: Vec<Row> = reading
        .map(|r| {
            r.sensors
                .iter()
                .map(|(name, value)| {
                    Row::new(vec![
                        Cell::from(format_metric_label(name)),
                        Cell::from(format_metric_value(name, *value)),
                    ])
                })
                .collect()
        })
        .unwrap_or_default();

    if let Some(reading) = reading {
        for alert in &reading.alerts {
            sensor_rows.push(Row::new(vec![
                Cell::from(format!("⚠ {}", alert)).style(Style::default().fg(app.theme.warning)),
                Cell::from(""),
            ]));
        }
    }

    let sensor_table = Table::new(sensor_rows, [Constraint::Fill(2), Constraint::Fill(1)])
        .header(
            Row::new(vec![Cell::from("Sensor"), Cell::from("Value")])
                .height(1)
                .style(app.theme.header),
        )
        .block(
            Block::default()
                .title(format!(
                    " {} ",
                    zone.map(|z| z.label.as_str()).unwrap_or("Sensors")
                ))
                .borders(Borders::ALL)
                .border_type(app.theme.border_type)
                .border_style(Style::default().fg(app.theme.border)),
        );

    frame.render_widget(sensor_table, body[1]);
}
