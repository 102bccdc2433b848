use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers, MouseEvent, MouseEventKind};

use crate::app::{App, View};

/// Poll for events with a timeout
pub fn poll_event(timeout: Duration) -> Result<Option<Event>> {
    if event::poll(timeout)? {
        Ok(Some(event::read()?))
    } else {
        Ok(None)
    }
}

/// Handle a key event
pub fn handle_key_event(app: &mut App, key: KeyEvent) {
    // If help is shown, any key closes it
    if app.show_help {
        app.show_help = false;
        return;
    }

    // Period selector captures all typing while open
    if app.window_input.is_some() {
        handle_window_input(app, key);
        return;
    }

    match key.code {
        KeyCode::Char('q') => app.quit(),
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => app.quit(),

        // View switching
        KeyCode::Tab => {
            if key.modifiers.contains(KeyModifiers::SHIFT) {
                app.prev_view();
            } else {
                app.next_view();
            }
        }
        KeyCode::BackTab => app.prev_view(),
        KeyCode::Char('1') => app.set_view(View::Summary),
        KeyCode::Char('2') => app.set_view(View::Checks),
        KeyCode::Left | KeyCode::Char('h') => app.prev_view(),
        KeyCode::Right | KeyCode::Char('l') => app.next_view(),

        // Navigation
        KeyCode::Up | KeyCode::Char('k') => app.select_prev(),
        KeyCode::Down | KeyCode::Char('j') => app.select_next(),
        KeyCode::PageUp => app.select_prev_n(10),
        KeyCode::PageDown => app.select_next_n(10),
        KeyCode::Home => app.select_first(),
        KeyCode::End => app.select_last(),

        // Jump from a target row to its checks
        KeyCode::Enter => {
            if app.current_view == View::Summary {
                app.filter_to_selected_target();
            }
        }
        KeyCode::Esc | KeyCode::Backspace => {
            if app.current_view == View::Checks {
                app.set_view(View::Summary);
            }
        }

        // Snapshot requests
        KeyCode::Char('r') => app.refresh(),
        KeyCode::Char('[') | KeyCode::Char('-') => app.decrease_window(),
        KeyCode::Char(']') | KeyCode::Char('+') => app.increase_window(),
        KeyCode::Char('w') => app.start_window_input(),

        // Target filter
        KeyCode::Char('f') => app.next_target_filter(),
        KeyCode::Char('F') => app.prev_target_filter(),
        KeyCode::Char('a') => app.clear_target_filter(),

        KeyCode::Char('e') => app.export_with_feedback(),

        KeyCode::Char('?') => app.toggle_help(),

        _ => {}
    }
}

/// Handle key input while the period selector is open
fn handle_window_input(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Enter => app.commit_window_input(),
        KeyCode::Esc => app.cancel_window_input(),
        KeyCode::Backspace => app.window_input_pop(),
        KeyCode::Char(c) => app.window_input_push(c),
        _ => {}
    }
}

/// Handle mouse events
pub fn handle_mouse_event(app: &mut App, mouse: MouseEvent) {
    match mouse.kind {
        MouseEventKind::ScrollUp => app.select_prev(),
        MouseEventKind::ScrollDown => app.select_next(),
        _ => {}
    }
}
