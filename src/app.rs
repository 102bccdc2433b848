//! Application state and navigation logic.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use crate::data::{filter_checks, TargetFilter};
use crate::export::{self, ExportError};
use crate::source::{Check, FetchError, LoadedSnapshot, Resolution, SnapshotClient, WindowHours};
use crate::ui::Theme;

/// How long a status message stays visible.
const STATUS_MESSAGE_TTL: Duration = Duration::from_secs(3);

/// The current view/tab in the TUI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    /// Overall cards and the per-target uptime table.
    Summary,
    /// Recent checks for the selected target filter.
    Checks,
}

impl View {
    /// Cycle to the next view.
    pub fn next(self) -> Self {
        match self {
            View::Summary => View::Checks,
            View::Checks => View::Summary,
        }
    }

    /// Cycle to the previous view.
    pub fn prev(self) -> Self {
        // Two views: prev and next coincide
        self.next()
    }

    /// Returns the display label for this view.
    pub fn label(&self) -> &'static str {
        match self {
            View::Summary => "Summary",
            View::Checks => "Recent Checks",
        }
    }
}

/// Main application state.
#[derive(Debug)]
pub struct App {
    pub running: bool,
    pub current_view: View,
    pub show_help: bool,

    // Data source
    client: SnapshotClient,
    /// The period used for the next request.
    pub window: WindowHours,
    /// Text typed into the period selector, while it is open.
    pub window_input: Option<String>,

    // Navigation state
    pub target_filter: TargetFilter,
    pub selected_target_index: usize,
    pub selected_check_index: usize,

    // Export
    pub export_dir: PathBuf,

    // UI
    pub theme: Theme,

    // Status message (temporary feedback)
    pub status_message: Option<(String, Instant)>,
}

impl App {
    /// Create a new App that fetches through `client`.
    ///
    /// Nothing is requested until [`refresh`](Self::refresh) is called.
    pub fn new(client: SnapshotClient, window: WindowHours, export_dir: PathBuf) -> Self {
        Self {
            running: true,
            current_view: View::Summary,
            show_help: false,
            client,
            window,
            window_input: None,
            target_filter: TargetFilter::All,
            selected_target_index: 0,
            selected_check_index: 0,
            export_dir,
            theme: Theme::dark(),
            status_message: None,
        }
    }

    /// Use the given theme.
    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    /// Returns a description of the current data source.
    pub fn source_description(&self) -> &str {
        self.client.description()
    }

    /// The snapshot on screen, with its derived statistics.
    pub fn current(&self) -> Option<&LoadedSnapshot> {
        self.client.current()
    }

    /// True while a request is in flight.
    pub fn is_loading(&self) -> bool {
        self.client.is_loading()
    }

    /// The error from the latest request, if it failed.
    pub fn load_error(&self) -> Option<&FetchError> {
        self.client.error()
    }

    /// Mutable access to the snapshot client.
    pub fn client_mut(&mut self) -> &mut SnapshotClient {
        &mut self.client
    }

    /// Set a temporary status message that will be shown for a few seconds.
    pub fn set_status_message(&mut self, message: String) {
        self.status_message = Some((message, Instant::now()));
    }

    /// Get the current status message if it hasn't expired.
    pub fn get_status_message(&self) -> Option<&str> {
        if let Some((msg, time)) = &self.status_message {
            if time.elapsed() < STATUS_MESSAGE_TTL {
                return Some(msg);
            }
        }
        None
    }

    /// Request a fresh snapshot for the selected window.
    pub fn refresh(&mut self) {
        self.client.fetch_snapshot(self.window);
    }

    /// Select a new window and request it.
    pub fn apply_window(&mut self, window: WindowHours) {
        self.window = window;
        self.refresh();
    }

    /// Lengthen the window by one hour and request it.
    pub fn increase_window(&mut self) {
        self.apply_window(self.window.increment());
    }

    /// Shorten the window by one hour and request it.
    pub fn decrease_window(&mut self) {
        self.apply_window(self.window.decrement());
    }

    /// Apply any responses that have arrived.
    ///
    /// Returns true if the displayed snapshot changed.
    pub fn poll_updates(&mut self) -> bool {
        match self.client.poll() {
            Some(Resolution::Applied) => {
                self.clamp_selection();
                true
            }
            _ => false,
        }
    }

    /// Keep selection indices within the current data.
    pub fn clamp_selection(&mut self) {
        let targets = self.target_count();
        if self.selected_target_index >= targets {
            self.selected_target_index = targets.saturating_sub(1);
        }
        let checks = self.filtered_checks().len();
        if self.selected_check_index >= checks {
            self.selected_check_index = checks.saturating_sub(1);
        }
    }

    fn target_count(&self) -> usize {
        self.current().map_or(0, |c| c.summary.targets.len())
    }

    /// Checks shown in the recent-checks view.
    pub fn filtered_checks(&self) -> Vec<&Check> {
        self.current()
            .map(|c| filter_checks(&c.snapshot, &self.target_filter))
            .unwrap_or_default()
    }

    /// Distinct urls of the current snapshot, in first-seen order.
    pub fn target_urls(&self) -> Vec<&str> {
        self.current()
            .map(|c| c.summary.targets.iter().map(|t| t.url.as_str()).collect())
            .unwrap_or_default()
    }

    /// Select the next option of the target filter.
    pub fn next_target_filter(&mut self) {
        let next = self.target_filter.next(&self.target_urls());
        self.set_target_filter(next);
    }

    /// Select the previous option of the target filter.
    pub fn prev_target_filter(&mut self) {
        let prev = self.target_filter.prev(&self.target_urls());
        self.set_target_filter(prev);
    }

    /// Show all targets again.
    pub fn clear_target_filter(&mut self) {
        self.set_target_filter(TargetFilter::All);
    }

    fn set_target_filter(&mut self, filter: TargetFilter) {
        self.target_filter = filter;
        self.selected_check_index = 0;
    }

    /// Filter the recent checks to the target selected in the Summary table.
    pub fn filter_to_selected_target(&mut self) {
        let url = self
            .current()
            .and_then(|c| c.summary.targets.get(self.selected_target_index))
            .map(|t| t.url.clone());
        if let Some(url) = url {
            self.set_target_filter(TargetFilter::Url(url));
            self.current_view = View::Checks;
        }
    }

    /// Switch to the next view.
    pub fn next_view(&mut self) {
        self.current_view = self.current_view.next();
    }

    /// Switch to the previous view.
    pub fn prev_view(&mut self) {
        self.current_view = self.current_view.prev();
    }

    /// Switch to a specific view.
    pub fn set_view(&mut self, view: View) {
        self.current_view = view;
    }

    fn list_len(&self) -> usize {
        match self.current_view {
            View::Summary => self.target_count(),
            View::Checks => self.filtered_checks().len(),
        }
    }

    fn selection_mut(&mut self) -> &mut usize {
        match self.current_view {
            View::Summary => &mut self.selected_target_index,
            View::Checks => &mut self.selected_check_index,
        }
    }

    /// Move selection down by one item.
    pub fn select_next(&mut self) {
        self.select_next_n(1);
    }

    /// Move selection up by one item.
    pub fn select_prev(&mut self) {
        self.select_prev_n(1);
    }

    /// Move selection down by n items.
    pub fn select_next_n(&mut self, n: usize) {
        let max = self.list_len().saturating_sub(1);
        let selected = self.selection_mut();
        *selected = (*selected + n).min(max);
    }

    /// Move selection up by n items.
    pub fn select_prev_n(&mut self, n: usize) {
        let selected = self.selection_mut();
        *selected = selected.saturating_sub(n);
    }

    /// Jump to the first item in the list.
    pub fn select_first(&mut self) {
        *self.selection_mut() = 0;
    }

    /// Jump to the last item in the list.
    pub fn select_last(&mut self) {
        let last = self.list_len().saturating_sub(1);
        *self.selection_mut() = last;
    }

    /// Open the period selector.
    pub fn start_window_input(&mut self) {
        self.window_input = Some(String::new());
    }

    /// Append a character to the period input; non-digits are ignored.
    pub fn window_input_push(&mut self, c: char) {
        if let Some(ref mut text) = self.window_input {
            if c.is_ascii_digit() && text.len() < 4 {
                text.push(c);
            }
        }
    }

    /// Remove the last character from the period input.
    pub fn window_input_pop(&mut self) {
        if let Some(ref mut text) = self.window_input {
            text.pop();
        }
    }

    /// Close the period selector without applying it.
    pub fn cancel_window_input(&mut self) {
        self.window_input = None;
    }

    /// Close the period selector and request the typed window.
    ///
    /// Invalid input falls back to the current window.
    pub fn commit_window_input(&mut self) {
        if let Some(text) = self.window_input.take() {
            let window = WindowHours::from_input(&text, self.window);
            self.apply_window(window);
        }
    }

    /// Export the full current snapshot as CSV, ignoring the target filter.
    pub fn export_csv(&self) -> Result<PathBuf, ExportError> {
        let Some(loaded) = self.current() else {
            return Err(ExportError::Empty);
        };
        export::write_export(&loaded.snapshot, loaded.window, &self.export_dir)
    }

    /// Export and report the outcome in the status bar.
    pub fn export_with_feedback(&mut self) {
        let message = match self.export_csv() {
            Ok(path) => format!("Exported to {}", path.display()),
            Err(ExportError::Empty) => ExportError::Empty.to_string(),
            Err(e) => format!("Export failed: {}", e),
        };
        self.set_status_message(message);
    }

    /// Toggle the help overlay.
    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    /// Signal the application to quit.
    pub fn quit(&mut self) {
        self.running = false;
    }
}
