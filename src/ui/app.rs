//! Dashboard state and keyboard handling

use crate::stream_core::{ScoredObservation, StreamController, StreamError, TickOutput};
use crossterm::event::KeyCode;
use std::collections::VecDeque;
use std::time::Duration;

/// Most recent alerts kept for the feed
pub const ALERT_FEED_CAPACITY: usize = 200;

// Sidebar control ranges for the dashboard
pub const THRESHOLD_RANGE: (f64, f64) = (1.0, 5.0);
pub const THRESHOLD_STEP: f64 = 0.1;
pub const CHUNK_RANGE: (usize, usize) = (10, 200);
pub const CHUNK_STEP: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppAction {
    Continue,
    /// A new run started; sinks should be recreated
    Reset,
    Quit,
}

pub struct App {
    controller: StreamController,
    pub last_output: Option<TickOutput>,
    /// Newest first
    pub alert_feed: VecDeque<ScoredObservation>,
    pub total_alerts: usize,
    pub refresh_interval: Duration,
    pub should_quit: bool,
}

impl App {
    pub fn new(controller: StreamController, refresh_interval: Duration) -> Self {
        Self {
            controller,
            last_output: None,
            alert_feed: VecDeque::with_capacity(ALERT_FEED_CAPACITY),
            total_alerts: 0,
            refresh_interval,
            should_quit: false,
        }
    }

    pub fn controller(&self) -> &StreamController {
        &self.controller
    }

    /// Advance the stream one tick, returning the alerts that surfaced
    ///
    /// While paused the previous output stays on screen and nothing is returned.
    pub fn on_tick(&mut self) -> Vec<ScoredObservation> {
        let output = match self.controller.tick() {
            Ok(output) => output,
            Err(StreamError::Paused) => return Vec::new(),
            Err(e) => {
                log::error!("Tick failed: {}", e);
                return Vec::new();
            }
        };

        for alert in &output.new_anomalies {
            self.alert_feed.push_front(*alert);
        }
        self.alert_feed.truncate(ALERT_FEED_CAPACITY);
        self.total_alerts += output.new_anomalies.len();

        let new_anomalies = output.new_anomalies.clone();
        self.last_output = Some(output);
        new_anomalies
    }

    pub fn handle_key(&mut self, code: KeyCode) -> AppAction {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.should_quit = true;
                return AppAction::Quit;
            }
            KeyCode::Char(' ') | KeyCode::Char('p') => {
                self.controller.toggle_pause();
            }
            KeyCode::Char('+') | KeyCode::Char('=') | KeyCode::Up => {
                self.adjust_threshold(THRESHOLD_STEP);
            }
            KeyCode::Char('-') | KeyCode::Down => {
                self.adjust_threshold(-THRESHOLD_STEP);
            }
            KeyCode::Char(']') | KeyCode::Right => {
                self.adjust_chunk_size(CHUNK_STEP as isize);
            }
            KeyCode::Char('[') | KeyCode::Left => {
                self.adjust_chunk_size(-(CHUNK_STEP as isize));
            }
            KeyCode::Char('r') => {
                self.controller.reset();
                self.last_output = None;
                self.alert_feed.clear();
                self.total_alerts = 0;
                return AppAction::Reset;
            }
            _ => {}
        }

        AppAction::Continue
    }

    fn adjust_threshold(&mut self, delta: f64) {
        let current = self.controller.threshold();
        // Round to one decimal so repeated steps do not drift
        let next = ((current + delta) * 10.0).round() / 10.0;
        let next = next.clamp(THRESHOLD_RANGE.0, THRESHOLD_RANGE.1);

        if next != current {
            if let Err(e) = self.controller.set_threshold(next) {
                log::warn!("Threshold not applied: {}", e);
            }
        }
    }

    fn adjust_chunk_size(&mut self, delta: isize) {
        let current = self.controller.chunk_size();
        let next = current
            .saturating_add_signed(delta)
            .clamp(CHUNK_RANGE.0, CHUNK_RANGE.1);

        if next != current {
            if let Err(e) = self.controller.set_chunk_size(next) {
                log::warn!("Chunk size not applied: {}", e);
            }
        }
    }
}
