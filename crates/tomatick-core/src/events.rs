use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::timer::{AmbientColor, StepId, StepKind, TimerStatus};

/// Every state change in the system produces an Event.
/// The terminal UI logs them; `simulate` prints them as JSON lines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    TimerStarted {
        step_id: StepId,
        step_name: String,
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    TimerPaused {
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    TimerTicked {
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    /// The front step ran out and the next one became current.
    StepAdvanced {
        completed_step: StepId,
        next_step: StepId,
        duration_secs: u64,
        at: DateTime<Utc>,
    },
    TimerSkipped {
        from_step: StepId,
        /// `None` when the skipped step was the last one.
        to_step: Option<StepId>,
        at: DateTime<Utc>,
    },
    TimerRedone {
        step_id: StepId,
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    TimerRestarted {
        at: DateTime<Utc>,
    },
    /// Every step has been consumed.
    SessionDone {
        at: DateTime<Utc>,
    },
    StepAdded {
        step_id: StepId,
        kind: StepKind,
        duration_secs: u64,
        at: DateTime<Utc>,
    },
    StepRemoved {
        step_id: StepId,
        at: DateTime<Utc>,
    },
    StepsReordered {
        order: Vec<StepId>,
        at: DateTime<Utc>,
    },
    StepDurationChanged {
        step_id: StepId,
        duration_secs: u64,
        at: DateTime<Utc>,
    },
    StateSnapshot {
        status: TimerStatus,
        step_id: Option<StepId>,
        step_name: Option<String>,
        remaining_secs: u64,
        total_secs: u64,
        steps_left: usize,
        status_text: String,
        ambient_color: AmbientColor,
        at: DateTime<Utc>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_type_tag() {
        let event = Event::TimerSkipped {
            from_step: 8,
            to_step: None,
            at: Utc::now(),
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "TimerSkipped");
        assert_eq!(json["from_step"], 8);
        assert!(json["to_step"].is_null());
    }
}
