//! Common UI components shared across views.
//!
//! This module contains the header bar, tab bar, status bar, the help and
//! period overlays, and small cell formatters.

use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Tabs},
    Frame,
};

use crate::app::{App, View};
use crate::data::UptimeGrade;
use crate::source::WindowHours;

/// Format an average latency cell ("—" when unknown).
pub fn format_latency(ms: Option<u64>) -> String {
    ms.map_or_else(|| "—".to_string(), |ms| ms.to_string())
}

/// Format a percentage without a trailing ".0" (e.g. "50%", "66.7%").
pub fn format_percent(percent: f64) -> String {
    format!("{}%", percent)
}

/// Format a single check's response time (empty when absent).
pub fn format_response_ms(ms: Option<f64>) -> String {
    ms.map(|ms| ms.to_string()).unwrap_or_default()
}

/// Render a bordered box with a dimmed one-line message.
pub fn placeholder(frame: &mut Frame, app: &App, title: &str, message: &str, area: Rect) {
    let paragraph = Paragraph::new(format!(" {}", message))
        .style(Style::default().add_modifier(Modifier::DIM))
        .block(
            Block::default()
                .title(title.to_string())
                .borders(Borders::ALL)
                .border_type(app.theme.border_type)
                .border_style(Style::default().fg(app.theme.border)),
        );
    frame.render_widget(paragraph, area);
}

/// Render the "terminal too small" notice.
pub fn render_too_small(frame: &mut Frame, area: Rect) {
    let msg = format!(
        "Terminal too small: {}x{}\nMinimum: {}x{}\n\nResize to continue",
        area.width,
        area.height,
        super::MIN_WIDTH,
        super::MIN_HEIGHT
    );
    let paragraph = Paragraph::new(msg)
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::Yellow));
    let y = (area.height / 2).saturating_sub(2);
    let centered = Rect::new(0, y, area.width, 5.min(area.height));
    frame.render_widget(paragraph, centered);
}

/// Render the header bar with the overall status.
///
/// Displays: status indicator, target count, window, and source.
pub fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let Some(loaded) = app.current() else {
        let line = Line::from(vec![
            Span::styled(" PULSEPING ", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(format!("│ {} │ Loading...", app.source_description())),
        ]);
        frame.render_widget(Paragraph::new(line), area);
        return;
    };

    let overall = &loaded.summary.overall;
    let status_style = if overall.monitored_targets == 0 {
        Style::default().add_modifier(Modifier::DIM)
    } else {
        app.theme.grade_style(UptimeGrade::from_percent(overall.avg_uptime_percent))
    };

    let mut spans = vec![
        Span::styled(" ● ", status_style),
        Span::styled("PULSEPING ", Style::default().add_modifier(Modifier::BOLD)),
        Span::raw("│ "),
        Span::styled(
            format!("{}", overall.monitored_targets),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw(" targets │ last "),
        Span::styled(
            format!("{}h", loaded.snapshot.period_hours),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw(format!(" │ generated {} │ {}", loaded.snapshot.generated_at, app.source_description())),
    ];

    if app.is_loading() {
        spans.push(Span::styled(" │ loading…", Style::default().fg(app.theme.highlight)));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Render the tab bar showing available views.
///
/// Highlights the currently active view.
pub fn render_tabs(frame: &mut Frame, app: &App, area: Rect) {
    let titles: Vec<Line> = vec![
        Line::from(format!(" 1:{} ", View::Summary.label())),
        Line::from(format!(" 2:{} ", View::Checks.label())),
    ];

    let selected = match app.current_view {
        View::Summary => 0,
        View::Checks => 1,
    };

    let tabs = Tabs::new(titles)
        .select(selected)
        .style(app.theme.tab_inactive)
        .highlight_style(app.theme.tab_active)
        .divider("|");

    frame.render_widget(tabs, area);
}

/// Render the status bar at the bottom.
///
/// Shows temporary status messages first, then a fetch error, then the
/// window, filter, time since last update, and available controls.
pub fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    if let Some(msg) = app.get_status_message() {
        let paragraph =
            Paragraph::new(format!(" {} ", msg)).style(Style::default().fg(app.theme.highlight));
        frame.render_widget(paragraph, area);
        return;
    }

    if let Some(err) = app.load_error() {
        let paragraph = Paragraph::new(format!(
            " Error: {} ({}) | r:retry q:quit",
            err.user_message(),
            err
        ))
        .style(Style::default().fg(app.theme.error));
        frame.render_widget(paragraph, area);
        return;
    }

    let controls = match app.current_view {
        View::Summary => "r:refresh [/]:period w:type period Enter:checks e:export ?:help q:quit",
        View::Checks => "r:refresh f/F:filter a:all e:export ?:help q:quit",
    };

    let status = match app.current() {
        Some(loaded) => format!(
            " {} | filter: {} | Updated {:.1}s ago | {}",
            app.window,
            app.target_filter,
            loaded.received_at.elapsed().as_secs_f64(),
            controls,
        ),
        None if app.is_loading() => " Loading... | q:quit".to_string(),
        None => " No data | r:refresh q:quit".to_string(),
    };

    let paragraph = Paragraph::new(status).style(Style::default().add_modifier(Modifier::DIM));
    frame.render_widget(paragraph, area);
}

/// Render the period selector overlay while the user types a window.
pub fn render_window_input(frame: &mut Frame, app: &App, area: Rect) {
    let Some(ref text) = app.window_input else {
        return;
    };

    let lines = vec![
        Line::from(vec![
            Span::raw(" Hours: "),
            Span::styled(format!("{}_", text), app.theme.header),
        ]),
        Line::from(Span::styled(
            format!(
                " {}-{}, Enter:apply Esc:cancel",
                WindowHours::MIN,
                WindowHours::MAX
            ),
            Style::default().add_modifier(Modifier::DIM),
        )),
    ];

    let block = Block::default()
        .title(" Period ")
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.highlight));

    let width = 34u16.min(area.width.saturating_sub(4));
    let height = 4u16.min(area.height);
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    let popup = Rect::new(x, y, width, height);

    frame.render_widget(Clear, popup);
    frame.render_widget(Paragraph::new(lines).block(block), popup);
}

/// Render the help overlay with keyboard shortcuts.
///
/// Displayed as a centered modal on top of the current view.
pub fn render_help(frame: &mut Frame, app: &App, area: Rect) {
    let section = |title: &'static str| {
        Line::from(vec![Span::styled(title, Style::default().add_modifier(Modifier::BOLD))])
    };

    let help_text = vec![
        Line::from(vec![Span::styled("Keyboard Shortcuts", app.theme.header)]),
        Line::from(""),
        section(" Navigation"),
        Line::from("  Tab 1/2     Switch views"),
        Line::from("  ↑/↓ j/k     Navigate list"),
        Line::from("  PgUp/PgDn   Jump 10 items"),
        Line::from("  Home/End    Jump to first/last"),
        Line::from("  Enter       Show checks for target"),
        Line::from(""),
        section(" Data"),
        Line::from("  r         Refresh snapshot"),
        Line::from("  [ / ]     Period -1h / +1h"),
        Line::from("  w         Type a period"),
        Line::from("  f / F     Next / previous target"),
        Line::from("  a         All targets"),
        Line::from("  e         Export CSV"),
        Line::from(""),
        section(" General"),
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

    let help_width = 42u16.min(area.width.saturating_sub(4));
    let help_height = 23u16.min(area.height.saturating_sub(2));
    let x = area.x + (area.width.saturating_sub(help_width)) / 2;
    let y = area.y + (area.height.saturating_sub(help_height)) / 2;
    let help_area = Rect::new(x, y, help_width, help_height);

    frame.render_widget(Clear, help_area);
    frame.render_widget(paragraph, help_area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_latency() {
        assert_eq!(format_latency(Some(120)), "120");
        assert_eq!(format_latency(None), "—");
    }

    #[test]
    fn test_format_percent() {
        assert_eq!(format_percent(50.0), "50%");
        assert_eq!(format_percent(66.7), "66.7%");
    }

    #[test]
    fn test_format_response_ms() {
        assert_eq!(format_response_ms(Some(123.4)), "123.4");
        assert_eq!(format_response_ms(None), "");
    }
}
