//! Timer engine implementation.
//!
//! The engine is a tick-driven state machine over a [`StepList`]. It owns no
//! thread and reads no clock: the caller invokes `tick()` once per second
//! while the engine is running. Every transition is computed from the
//! engine's current state only, so a scheduler can never observe a stale
//! step list.
//!
//! ## State Transitions
//!
//! ```text
//! Ready -> Running <-> Paused
//!             |
//!             +-> (front step expires or is skipped) -> next step | Done
//! ```
//!
//! The current step is always the front of the list. Expiry and skip both
//! consume it.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::display::{self, AmbientColor};
use super::step::{Step, StepId, StepKind, StepList};
use crate::editor::StepListOwner;
use crate::error::StepListError;
use crate::events::Event;
use crate::shortcuts::TimerCommand;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerStatus {
    Ready,
    Running,
    Paused,
    /// Every step has been consumed.
    Done,
}

/// Durations handed to steps created through `add`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefaultDurations {
    pub work: u64,
    pub short_break: u64,
    pub long_break: u64,
}

impl DefaultDurations {
    pub fn for_kind(&self, kind: &StepKind) -> u64 {
        match kind {
            StepKind::Work | StepKind::Custom(_) => self.work,
            StepKind::ShortBreak => self.short_break,
            StepKind::LongBreak => self.long_break,
        }
    }
}

impl Default for DefaultDurations {
    fn default() -> Self {
        Self {
            work: 15,
            short_break: 3,
            long_break: 6,
        }
    }
}

/// Core timer engine. Authoritative owner of the step list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimerEngine {
    /// What `restart` returns to.
    initial: StepList,
    steps: StepList,
    status: TimerStatus,
    remaining_secs: u64,
    durations: DefaultDurations,
}

impl TimerEngine {
    /// Create an engine seeded with `steps`, in the `Ready` state with the
    /// first step's full duration on the clock.
    pub fn new(steps: StepList) -> Self {
        let remaining_secs = steps.front().map(|s| s.duration_secs).unwrap_or(0);
        Self {
            initial: steps.clone(),
            steps,
            status: TimerStatus::Ready,
            remaining_secs,
            durations: DefaultDurations::default(),
        }
    }

    pub fn with_durations(mut self, durations: DefaultDurations) -> Self {
        self.durations = durations;
        self
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn status(&self) -> TimerStatus {
        self.status
    }

    pub fn is_running(&self) -> bool {
        self.status == TimerStatus::Running
    }

    pub fn is_done(&self) -> bool {
        self.status == TimerStatus::Done
    }

    pub fn remaining_secs(&self) -> u64 {
        self.remaining_secs
    }

    pub fn current_step(&self) -> Option<&Step> {
        self.steps.front()
    }

    pub fn step_list(&self) -> &StepList {
        &self.steps
    }

    /// Full duration of the current step.
    pub fn total_secs(&self) -> u64 {
        self.current_step().map(|s| s.duration_secs).unwrap_or(0)
    }

    /// `mm:ss - stepName`, or `00:00 - done` once the list is exhausted.
    pub fn status_text(&self) -> String {
        let name = self.current_step().map(Step::name).unwrap_or("done");
        display::status_text(self.remaining_secs, name)
    }

    pub fn ambient_color(&self) -> AmbientColor {
        AmbientColor::for_kind(self.current_step().map(|s| &s.kind))
    }

    /// Build a full state snapshot event.
    pub fn snapshot(&self) -> Event {
        let step = self.current_step();
        Event::StateSnapshot {
            status: self.status,
            step_id: step.map(|s| s.id),
            step_name: step.map(|s| s.name().to_string()),
            remaining_secs: self.remaining_secs,
            total_secs: self.total_secs(),
            steps_left: self.steps.len(),
            status_text: self.status_text(),
            ambient_color: self.ambient_color(),
            at: Utc::now(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    pub fn apply(&mut self, command: TimerCommand) -> Option<Event> {
        match command {
            TimerCommand::Toggle => self.toggle(),
            TimerCommand::Redo => self.redo(),
            TimerCommand::Skip => self.skip(),
            TimerCommand::Restart => self.restart(),
        }
    }

    /// Start or resume.
    pub fn start(&mut self) -> Option<Event> {
        match self.status {
            TimerStatus::Ready | TimerStatus::Paused => {
                let step = self.steps.front()?;
                self.status = TimerStatus::Running;
                info!(step = step.id, remaining = self.remaining_secs, "timer started");
                Some(Event::TimerStarted {
                    step_id: step.id,
                    step_name: step.name().to_string(),
                    remaining_secs: self.remaining_secs,
                    at: Utc::now(),
                })
            }
            TimerStatus::Running | TimerStatus::Done => None,
        }
    }

    pub fn stop(&mut self) -> Option<Event> {
        if self.status != TimerStatus::Running {
            return None;
        }
        self.status = TimerStatus::Paused;
        info!(remaining = self.remaining_secs, "timer paused");
        Some(Event::TimerPaused {
            remaining_secs: self.remaining_secs,
            at: Utc::now(),
        })
    }

    pub fn toggle(&mut self) -> Option<Event> {
        if self.is_running() {
            self.stop()
        } else {
            self.start()
        }
    }

    /// Advance the countdown by one second.
    ///
    /// Only acts while running. When the remaining time would reach zero the
    /// front step is consumed and the next one starts at its full duration.
    pub fn tick(&mut self) -> Option<Event> {
        if self.status != TimerStatus::Running {
            return None;
        }
        if self.remaining_secs > 1 {
            self.remaining_secs -= 1;
            debug!(remaining = self.remaining_secs, "tick");
            return Some(Event::TimerTicked {
                remaining_secs: self.remaining_secs,
                at: Utc::now(),
            });
        }
        let completed = self.steps.pop_front()?;
        match self.steps.front().map(|s| (s.id, s.duration_secs)) {
            Some((next, duration_secs)) => {
                self.remaining_secs = duration_secs;
                info!(completed = completed.id, next, "step advanced");
                Some(Event::StepAdvanced {
                    completed_step: completed.id,
                    next_step: next,
                    duration_secs,
                    at: Utc::now(),
                })
            }
            None => Some(self.finish()),
        }
    }

    /// Consume the current step without waiting for it to expire.
    pub fn skip(&mut self) -> Option<Event> {
        if self.is_done() {
            return None;
        }
        let skipped = self.steps.pop_front()?;
        let to_step = self.steps.front().map(|s| (s.id, s.duration_secs));
        match to_step {
            Some((_, duration)) => self.remaining_secs = duration,
            None => {
                self.finish();
            }
        }
        info!(from = skipped.id, to = ?to_step.map(|(id, _)| id), "step skipped");
        Some(Event::TimerSkipped {
            from_step: skipped.id,
            to_step: to_step.map(|(id, _)| id),
            at: Utc::now(),
        })
    }

    /// Put the current step's full duration back on the clock and pause.
    pub fn redo(&mut self) -> Option<Event> {
        if self.is_done() {
            return None;
        }
        let step = self.steps.front()?;
        self.remaining_secs = step.duration_secs;
        if self.status == TimerStatus::Running {
            self.status = TimerStatus::Paused;
        }
        info!(step = step.id, "step redone");
        Some(Event::TimerRedone {
            step_id: step.id,
            remaining_secs: self.remaining_secs,
            at: Utc::now(),
        })
    }

    /// Return to the initial seeded sequence. Accepted in every state.
    pub fn restart(&mut self) -> Option<Event> {
        self.steps = self.initial.clone();
        self.status = TimerStatus::Ready;
        self.remaining_secs = self.total_secs();
        info!(steps = self.steps.len(), "session restarted");
        Some(Event::TimerRestarted { at: Utc::now() })
    }

    // ── Step list edits ──────────────────────────────────────────────

    pub fn add_step(&mut self, kind: StepKind) -> Result<Event, StepListError> {
        let duration_secs = self.durations.for_kind(&kind);
        let front = self.front_id();
        let step_id = self.steps.add(kind.clone(), duration_secs)?;
        if self.is_done() {
            self.status = TimerStatus::Ready;
        }
        self.front_changed(front);
        Ok(Event::StepAdded {
            step_id,
            kind,
            duration_secs,
            at: Utc::now(),
        })
    }

    pub fn remove_step(&mut self, id: StepId) -> Result<Event, StepListError> {
        let front = self.front_id();
        self.steps.remove(id)?;
        self.front_changed(front);
        Ok(Event::StepRemoved {
            step_id: id,
            at: Utc::now(),
        })
    }

    pub fn reorder_steps(&mut self, new_order: &[Step]) -> Result<Event, StepListError> {
        let front = self.front_id();
        self.steps.reorder(new_order)?;
        self.front_changed(front);
        Ok(Event::StepsReordered {
            order: self.steps.ids(),
            at: Utc::now(),
        })
    }

    /// Edits to the current step reach the clock immediately only before
    /// the timer has been started; otherwise on the next redo or advance.
    /// The clock never shows more than the step's new duration.
    pub fn change_step_duration(
        &mut self,
        id: StepId,
        duration_secs: u64,
    ) -> Result<Event, StepListError> {
        self.steps.change_duration(id, duration_secs)?;
        if self.front_id() == Some(id) {
            self.remaining_secs = if self.status == TimerStatus::Ready {
                duration_secs
            } else {
                self.remaining_secs.min(duration_secs)
            };
        }
        Ok(Event::StepDurationChanged {
            step_id: id,
            duration_secs,
            at: Utc::now(),
        })
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn front_id(&self) -> Option<StepId> {
        self.steps.front().map(|s| s.id)
    }

    /// A different step now sits at the front: it starts from its full
    /// duration. The run status is kept.
    fn front_changed(&mut self, previous: Option<StepId>) {
        if self.front_id() != previous {
            self.remaining_secs = self.total_secs();
        }
    }

    fn finish(&mut self) -> Event {
        self.status = TimerStatus::Done;
        self.remaining_secs = 0;
        info!("all steps consumed");
        Event::SessionDone { at: Utc::now() }
    }
}

impl Default for TimerEngine {
    fn default() -> Self {
        Self::new(StepList::seed())
    }
}

impl StepListOwner for TimerEngine {
    fn steps(&self) -> &[Step] {
        self.steps.steps()
    }

    fn on_add(&mut self, kind: StepKind) -> Result<(), StepListError> {
        self.add_step(kind).map(drop)
    }

    fn on_remove(&mut self, id: StepId) -> Result<(), StepListError> {
        self.remove_step(id).map(drop)
    }

    fn on_reorder(&mut self, new_order: &[Step]) -> Result<(), StepListError> {
        self.reorder_steps(new_order).map(drop)
    }

    fn on_change_duration(&mut self, id: StepId, duration_secs: u64) -> Result<(), StepListError> {
        self.change_step_duration(id, duration_secs).map(drop)
    }
}
