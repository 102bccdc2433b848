//! Recent checks view rendering.
//!
//! Lists the checks of the current snapshot that pass the target filter, in
//! snapshot order.

use ratatui::{
    layout::{Constraint, Rect},
    style::Style,
    widgets::{Block, Borders, Cell, Row, Table, TableState},
    Frame,
};

use crate::app::App;
use crate::data::TargetFilter;

use super::common::{format_response_ms, placeholder};

/// Render the recent checks table.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let filter_info = match app.target_filter {
        TargetFilter::All => String::new(),
        ref filter => format!(" [f:{}]", filter),
    };

    if app.current().is_none() {
        placeholder(frame, app, " Recent Checks ", "Loading data…", area);
        return;
    }

    let checks = app.filtered_checks();
    if checks.is_empty() {
        placeholder(
            frame,
            app,
            &format!(" Recent Checks{} ", filter_info),
            "No checks in this period for the selected filter.",
            area,
        );
        return;
    }

    let header = Row::new(vec![
        Cell::from("Timestamp (UTC)"),
        Cell::from("URL"),
        Cell::from("Status"),
        Cell::from("Up?"),
        Cell::from("Response (ms)"),
    ])
    .height(1)
    .style(app.theme.header);

    let rows: Vec<Row> = checks
        .iter()
        .map(|check| {
            Row::new(vec![
                Cell::from(check.timestamp.clone()),
                Cell::from(check.url.clone()),
                Cell::from(check.status_code.map(|c| c.to_string()).unwrap_or_default()),
                Cell::from(if check.is_up { "UP" } else { "DOWN" })
                    .style(app.theme.up_style(check.is_up)),
                Cell::from(format_response_ms(check.response_ms)),
            ])
        })
        .collect();

    let widths = [
        Constraint::Min(26), // Timestamp
        Constraint::Fill(3), // URL
        Constraint::Length(6),
        Constraint::Length(5),
        Constraint::Fill(1),
    ];

    let selected = app.selected_check_index.min(checks.len().saturating_sub(1));
    let title = format!(
        " Recent Checks{} [{}/{}] ",
        filter_info,
        selected + 1,
        checks.len()
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

    frame.render_stateful_widget(table, area, &mut state);
}
