//! Derived presentation values: countdown text and ambient color.

use serde::{Deserialize, Serialize};

use super::step::StepKind;

/// Background cue for the current step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AmbientColor {
    Red,
    LightBlue,
    Blue,
    White,
}

impl AmbientColor {
    /// Palette lookup. `None` (no current step) maps to white.
    pub fn for_kind(kind: Option<&StepKind>) -> Self {
        match kind {
            Some(StepKind::Work) => AmbientColor::Red,
            Some(StepKind::ShortBreak) => AmbientColor::LightBlue,
            Some(StepKind::LongBreak) => AmbientColor::Blue,
            Some(StepKind::Custom(_)) | None => AmbientColor::White,
        }
    }

    /// CSS-style hex value.
    pub fn hex(self) -> &'static str {
        match self {
            AmbientColor::Red => "#ff0000",
            AmbientColor::LightBlue => "#add8e6",
            AmbientColor::Blue => "#0000ff",
            AmbientColor::White => "#ffffff",
        }
    }
}

/// Format seconds as `mm:ss`. Minutes past 99 are printed in full.
pub fn display_time(secs: u64) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

/// `mm:ss - name`
pub fn status_text(remaining_secs: u64, step_name: &str) -> String {
    format!("{} - {}", display_time(remaining_secs), step_name)
}
