//! Keyboard shortcuts for the timer.

use serde::{Deserialize, Serialize};

use crate::timer::TimerStatus;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerCommand {
    /// Start when stopped, stop when running.
    Toggle,
    /// Reset the current step to its full duration and pause.
    Redo,
    /// Consume the current step.
    Skip,
    /// Back to the initial seeded sequence.
    Restart,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Space,
    Left,
    Right,
    Up,
}

/// Map a key to a timer command given the current status.
///
/// Once the session is done only restart is accepted.
pub fn command_for(key: Key, status: TimerStatus) -> Option<TimerCommand> {
    let command = match key {
        Key::Up => return Some(TimerCommand::Restart),
        Key::Space => TimerCommand::Toggle,
        Key::Left => TimerCommand::Redo,
        Key::Right => TimerCommand::Skip,
    };
    (status != TimerStatus::Done).then_some(command)
}
