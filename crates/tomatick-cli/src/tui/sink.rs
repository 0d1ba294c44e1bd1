//! Terminal presentation: status bar text, panel color, window title and a
//! transient warning line.

use std::time::{Duration, Instant};

use ratatui::style::Color;
use tomatick_core::{AmbientColor, PresentationSink};

const NOTICE_TTL: Duration = Duration::from_secs(3);

pub fn terminal_color(color: AmbientColor) -> Color {
    match color {
        AmbientColor::Red => Color::Red,
        AmbientColor::LightBlue => Color::LightBlue,
        AmbientColor::Blue => Color::Blue,
        AmbientColor::White => Color::White,
    }
}

#[derive(Debug, Clone)]
pub struct TerminalSink {
    status_text: String,
    color: AmbientColor,
    notice: Option<(String, Instant)>,
    mirror_title: bool,
    /// Title the event loop still has to write to the terminal.
    pending_title: Option<String>,
}

impl TerminalSink {
    pub fn new(mirror_title: bool) -> Self {
        Self {
            status_text: String::new(),
            color: AmbientColor::White,
            notice: None,
            mirror_title,
            pending_title: None,
        }
    }

    pub fn status_text(&self) -> &str {
        &self.status_text
    }

    pub fn color(&self) -> AmbientColor {
        self.color
    }

    pub fn notice(&self, now: Instant) -> Option<&str> {
        self.notice
            .as_ref()
            .filter(|(_, since)| now.saturating_duration_since(*since) < NOTICE_TTL)
            .map(|(text, _)| text.as_str())
    }

    pub fn take_pending_title(&mut self) -> Option<String> {
        self.pending_title.take()
    }
}

impl PresentationSink for TerminalSink {
    fn set_status_text(&mut self, text: &str) {
        if self.status_text == text {
            return;
        }
        self.status_text = text.to_string();
        if self.mirror_title {
            self.pending_title = Some(self.status_text.clone());
        }
    }

    fn set_ambient_color(&mut self, color: AmbientColor) {
        self.color = color;
    }

    fn notify(&mut self, message: &str) {
        self.notice = Some((message.to_string(), Instant::now()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_is_queued_only_on_change() {
        let mut sink = TerminalSink::new(true);
        sink.set_status_text("00:15 - work");
        assert_eq!(sink.take_pending_title().as_deref(), Some("00:15 - work"));
        sink.set_status_text("00:15 - work");
        assert_eq!(sink.take_pending_title(), None);
    }

    #[test]
    fn title_mirroring_can_be_disabled() {
        let mut sink = TerminalSink::new(false);
        sink.set_status_text("00:15 - work");
        assert_eq!(sink.status_text(), "00:15 - work");
        assert_eq!(sink.take_pending_title(), None);
    }

    #[test]
    fn notices_expire() {
        let mut sink = TerminalSink::new(false);
        sink.notify("cannot remove the last remaining step");
        let now = Instant::now();
        assert!(sink.notice(now).is_some());
        assert!(sink.notice(now + NOTICE_TTL).is_none());
    }
}
