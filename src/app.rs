//! Application state and update handling.

use std::time::Instant;

use tokio::sync::mpsc;

use crate::display::{apply_document, ApplyReport, ElementRegistry};
use crate::poll::PollUpdate;
use crate::ui::Theme;

/// Main application state.
pub struct App {
    pub running: bool,
    pub show_help: bool,

    /// The page being updated.
    pub registry: ElementRegistry,

    // Poller bridge
    updates: mpsc::Receiver<PollUpdate>,
    source_description: String,

    /// Last completed cycle number (0 before the first).
    pub cycle: u64,
    /// Outcome of the last applied document.
    pub last_report: Option<ApplyReport>,
    /// Last transport/decode error, cleared on the next good cycle.
    pub last_error: Option<String>,
    /// When the page was last updated.
    pub last_updated: Option<Instant>,

    // Navigation state
    pub selected_index: usize,

    // UI
    pub theme: Theme,
}

impl App {
    /// Create a new App over a seeded registry and a poller channel.
    pub fn new(
        registry: ElementRegistry,
        updates: mpsc::Receiver<PollUpdate>,
        source_description: String,
    ) -> Self {
        Self {
            running: true,
            show_help: false,
            registry,
            updates,
            source_description,
            cycle: 0,
            last_report: None,
            last_error: None,
            last_updated: None,
            selected_index: 0,
            theme: Theme::auto_detect(),
        }
    }

    /// Returns a description of the polled source.
    pub fn source_description(&self) -> &str {
        &self.source_description
    }

    /// Drain all pending poller updates and apply them to the page.
    ///
    /// Failed cycles leave the page untouched and surface their error in
    /// the status bar. Called once per frame from the main loop.
    pub fn drain_updates(&mut self) {
        while let Ok(update) = self.updates.try_recv() {
            match update {
                PollUpdate::Document { cycle, document } => {
                    let report = apply_document(&mut self.registry, &document);
                    self.cycle = cycle;
                    self.last_updated = Some(Instant::now());
                    self.last_error = None;
                    self.last_report = Some(report);
                }
                PollUpdate::Failed { cycle, error } => {
                    self.cycle = cycle;
                    self.last_error = Some(error);
                }
            }
        }
    }

    pub fn quit(&mut self) {
        self.running = false;
    }

    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    /// Move selection down one element.
    pub fn select_next(&mut self) {
        if self.selected_index + 1 < self.registry.len() {
            self.selected_index += 1;
        }
    }

    /// Move selection up one element.
    pub fn select_prev(&mut self) {
        self.selected_index = self.selected_index.saturating_sub(1);
    }

    pub fn select_first(&mut self) {
        self.selected_index = 0;
    }

    pub fn select_last(&mut self) {
        self.selected_index = self.registry.len().saturating_sub(1);
    }
}
