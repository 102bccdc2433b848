//! Summary view rendering.
//!
//! Displays the overall cards (monitored targets, total checks, average
//! uptime) above a table of per-target uptime and latency.

use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame,
};

use crate::app::App;
use crate::data::{OverallStats, UptimeGrade};

use super::common::{format_latency, format_percent, placeholder};

/// Render the Summary view.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::vertical([
        Constraint::Length(4), // Cards
        Constraint::Min(4),    // Per-target table
    ])
    .split(area);

    let Some(loaded) = app.current() else {
        render_cards(frame, app, None, chunks[0]);
        placeholder(frame, app, " Uptime by URL ", "Loading data…", chunks[1]);
        return;
    };

    render_cards(frame, app, Some(&loaded.summary.overall), chunks[0]);

    let summary = &loaded.summary;
    if summary.targets.is_empty() {
        placeholder(
            frame,
            app,
            " Uptime by URL ",
            "Waiting for the collector to generate some checks…",
            chunks[1],
        );
        return;
    }

    let header = Row::new(vec![
        Cell::from("URL"),
        Cell::from("Total Checks"),
        Cell::from("Up"),
        Cell::from("Avg Latency (ms)"),
        Cell::from("Uptime %"),
        Cell::from("Status"),
    ])
    .height(1)
    .style(app.theme.header);

    let rows: Vec<Row> = summary
        .targets
        .iter()
        .map(|target| {
            let stats = &target.stats;
            let grade_style = app.theme.grade_style(stats.grade());
            Row::new(vec![
                Cell::from(target.url.clone()),
                Cell::from(stats.total.to_string()),
                Cell::from(stats.up.to_string()),
                Cell::from(format_latency(stats.avg_latency_ms)),
                Cell::from(format_percent(stats.uptime_percent)).style(grade_style),
                Cell::from(stats.grade().symbol()).style(grade_style),
            ])
        })
        .collect();

    let widths = [
        Constraint::Fill(4), // URL - gets the largest share
        Constraint::Fill(1), // Total
        Constraint::Fill(1), // Up
        Constraint::Fill(1), // Latency
        Constraint::Fill(1), // Uptime
        Constraint::Min(6),  // Status - fixed minimum
    ];

    let selected = app.selected_target_index.min(summary.targets.len().saturating_sub(1));
    let title = format!(
        " Uptime by URL ({}) [{}/{}] ",
        summary.targets.len(),
        selected + 1,
        summary.targets.len()
    );

    let table = Table::new(rows, widths)
        .header(header)
        .block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_type(app.theme.border_type)
                .border_style(Style::default().fg(app.theme.border)),
        )
        .row_highlight_style(app.theme.selected)
        .highlight_symbol("▶ ");

    let mut state = TableState::default();
    state.select(Some(selected));

    frame.render_stateful_widget(table, chunks[1], &mut state);
}

/// Render the three overall cards side by side.
fn render_cards(frame: &mut Frame, app: &App, overall: Option<&OverallStats>, area: Rect) {
    let cards = Layout::horizontal([
        Constraint::Fill(1),
        Constraint::Fill(1),
        Constraint::Fill(1),
    ])
    .split(area);

    let (targets, checks, uptime, uptime_style) = match overall {
        Some(o) => {
            let uptime = if o.monitored_targets == 0 {
                "—".to_string()
            } else {
                format_percent(o.avg_uptime_percent)
            };
            let style = if o.monitored_targets == 0 {
                Style::default()
            } else {
                app.theme.grade_style(UptimeGrade::from_percent(o.avg_uptime_percent))
            };
            (o.monitored_targets.to_string(), o.total_checks.to_string(), uptime, style)
        }
        None => ("—".to_string(), "—".to_string(), "—".to_string(), Style::default()),
    };

    render_card(frame, app, "Monitored URLs", targets, Style::default(), cards[0]);
    render_card(frame, app, "Total checks (period)", checks, Style::default(), cards[1]);
    render_card(frame, app, "Avg uptime across URLs", uptime, uptime_style, cards[2]);
}

fn render_card(frame: &mut Frame, app: &App, label: &str, value: String, style: Style, area: Rect) {
    let lines = vec![
        Line::from(Span::styled(
            value,
            style.add_modifier(Modifier::BOLD),
        )),
    ];
    let paragraph = Paragraph::new(lines).alignment(Alignment::Center).block(
        Block::default()
            .title(format!(" {} ", label))
            .borders(Borders::ALL)
            .border_type(app.theme.border_type)
            .border_style(Style::default().fg(app.theme.border)),
    );
    frame.render_widget(paragraph, area);
}
