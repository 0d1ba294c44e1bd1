//! Presentation side channels.
//!
//! The engine never touches a window title or a background color itself.
//! A front end implements [`PresentationSink`] and calls [`present`] after
//! each state change.

use crate::timer::{AmbientColor, TimerEngine};

pub trait PresentationSink {
    /// Countdown label, e.g. a window title or status bar.
    fn set_status_text(&mut self, text: &str);
    /// Background cue for the current step.
    fn set_ambient_color(&mut self, color: AmbientColor);
    /// Transient user-facing warning.
    fn notify(&mut self, message: &str);
}

/// Push the engine's derived status text and color into `sink`.
pub fn present(engine: &TimerEngine, sink: &mut impl PresentationSink) {
    sink.set_status_text(&engine.status_text());
    sink.set_ambient_color(engine.ambient_color());
}

/// Sink that keeps every call, for tests and headless runs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordingSink {
    pub status_texts: Vec<String>,
    pub colors: Vec<AmbientColor>,
    pub notices: Vec<String>,
}

impl RecordingSink {
    pub fn last_status_text(&self) -> Option<&str> {
        self.status_texts.last().map(String::as_str)
    }

    pub fn last_color(&self) -> Option<AmbientColor> {
        self.colors.last().copied()
    }
}

impl PresentationSink for RecordingSink {
    fn set_status_text(&mut self, text: &str) {
        self.status_texts.push(text.to_string());
    }

    fn set_ambient_color(&mut self, color: AmbientColor) {
        self.colors.push(color);
    }

    fn notify(&mut self, message: &str) {
        self.notices.push(message.to_string());
    }
}
