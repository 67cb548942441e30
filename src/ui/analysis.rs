//! Analysis view rendering.
//!
//! KPIs and the narrative on top, the issue list (worst first) below.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState, Wrap},
    Frame,
};

use crate::app::App;
use crate::data::metric::{savings_labels, to_fixed};
use crate::i18n::Message;

/// Render the Analysis view.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let analysis = app.dashboard.as_ref().and_then(|d| d.analysis.as_deref());

    let Some(analysis) = analysis else {
        let mut lines = Vec::new();
        if app.analyzing {
            lines.push(Line::from(app.t(Message::Analyzing)));
        } else {
            lines.push(Line::from(app.t(Message::NoAnalysis)));
        }
        if let Some(ref err) = app.analysis_error {
            lines.push(Line::from(Span::styled(
                err.clone(),
                Style::default().fg(app.theme.critical),
            )));
        }
        frame.render_widget(
            Paragraph::new(lines)
                .block(bordered(app, " Analysis "))
                .wrap(Wrap { trim: true }),
            area,
        );
        return;
    };

    let chunks = Layout::vertical([
        Constraint::Length(3),
        Constraint::Percentage(40),
        Constraint::Min(5),
    ])
    .split(area);

    // ----- KPIS -----
    let na = app.t(Message::NotAvailable);
    let kpis = analysis.kpis.as_ref();
    let kpi_line = Line::from(vec![
        Span::raw(" Energy / 1000 bottles: "),
        Span::styled(
            kpis.map(|k| format!("{} kWh", to_fixed(k.avg_energy_per_1000_bottles_kwh, 1)))
                .unwrap_or_else(|| na.to_string()),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw("   Scrap rate: "),
        Span::styled(
            kpis.and_then(|k| k.avg_scrap_rate_percent)
                .map(|v| format!("{}%", to_fixed(v, 1)))
                .unwrap_or_else(|| na.to_string()),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw("   CO₂: "),
        Span::styled(
            kpis.and_then(|k| k.estimated_co2_tonnes)
                .map(|v| format!("{} t", to_fixed(v, 1)))
                .unwrap_or_else(|| na.to_string()),
            Style::default().add_modifier(Modifier::BOLD),
        ),
    ]);

    let status = if app.analyzing {
        format!(" KPIs | {} ", app.t(Message::Analyzing))
    } else {
        " KPIs ".to_string()
    };
    frame.render_widget(
        Paragraph::new(kpi_line).block(bordered(app, &status)),
        chunks[0],
    );

    // ----- NARRATIVE -----
    let mut narrative: Vec<Line> = analysis
        .narrative
        .lines()
        .map(|l| Line::from(l.to_string()))
        .collect();
    if let Some(ref err) = app.analysis_error {
        narrative.push(Line::from(Span::styled(
            err.clone(),
            Style::default().fg(app.theme.critical),
        )));
    }
    frame.render_widget(
        Paragraph::new(narrative)
            .block(bordered(app, " Assessment "))
            .wrap(Wrap { trim: false }),
        chunks[1],
    );

    // ----- ISSUES -----
    let Some(ref dashboard) = app.dashboard else {
        return;
    };
    let issues = dashboard.issues_by_severity();

    if issues.is_empty() {
        frame.render_widget(
            Paragraph::new(app.t(Message::NoIssues)).block(bordered(app, " Issues (0) ")),
            chunks[2],
        );
        return;
    }

    let header = Row::new(vec![
        Cell::from("Status"),
        Cell::from("Zone"),
        Cell::from("Issue"),
        Cell::from("Savings"),
    ])
    .height(1)
    .style(app.theme.header);

    let rows: Vec<Row> = issues
        .iter()
        .map(|issue| {
            Row::new(vec![
                Cell::from(issue.severity.symbol())
                    .style(app.theme.severity_style(issue.severity)),
                Cell::from(app.zone_name(&issue.zone_id).to_string()),
                Cell::from(issue.title.clone()),
                Cell::from(savings_labels(issue).join(" / ")),
            ])
        })
        .collect();

    let widths = [
        Constraint::Length(6),
        Constraint::Fill(1),
        Constraint::Fill(2),
        Constraint::Length(20),
    ];

    let selected = app.selected_issue_index.min(issues.len() - 1);
    let title = format!(" Issues ({}) [{}/{}] ", issues.len(), selected + 1, issues.len());
    let table = Table::new(rows, widths)
        .header(header)
        .block(bordered(app, &title))
        .row_highlight_style(app.theme.selected)
        .highlight_symbol("▶ ");

    let mut state = TableState::default();
    state.select(Some(selected));
    frame.render_stateful_widget(table, chunks[2], &mut state);
}

fn bordered<'a>(app: &App, title: &'a str) -> Block<'a> {
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.border))
}
