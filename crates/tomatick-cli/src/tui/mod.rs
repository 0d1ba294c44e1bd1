//! Interactive terminal UI.
//!
//! Model-View-Intent:
//! - Model (this file): `App`, owning the engine and the editor
//! - View (view.rs): pure rendering from `App`
//! - Intent (input.rs): terminal events turned into `Action`s

pub mod input;
pub mod layout;
pub mod sink;
pub mod view;

use std::time::Instant;

use tomatick_core::{
    command_for, present, Config, CoreError, DragOrigin, DropOutcome, PresentationSink, StepId,
    StepListEditor, StepListError, TimerEngine,
};
use tracing::{debug, warn};

use crate::ticker::Ticker;
use input::Action;
use layout::{scroll_offset, ScreenLayout};
use sink::TerminalSink;

pub struct App {
    pub engine: TimerEngine,
    pub editor: StepListEditor,
    pub sink: TerminalSink,
    pub ticker: Ticker,
    /// Geometry of the last drawn frame, used for hit-testing.
    pub layout: ScreenLayout,
    pub selected: usize,
    pub adjust_step: u64,
    pub show_help: bool,
    pub should_quit: bool,
}

impl App {
    pub fn new(config: &Config) -> Result<Self, CoreError> {
        let engine = config.engine()?;
        let editor = StepListEditor::new(engine.step_list().steps());
        let mut app = Self {
            engine,
            editor,
            sink: TerminalSink::new(config.ui.mirror_title),
            ticker: Ticker::default(),
            layout: ScreenLayout::default(),
            selected: 0,
            adjust_step: config.durations.adjust_step.max(1),
            show_help: config.ui.show_help,
            should_quit: false,
        };
        app.refresh(Instant::now());
        Ok(app)
    }

    pub fn selected_id(&self) -> Option<StepId> {
        self.editor.steps().get(self.selected).map(|s| s.id)
    }

    pub fn scroll_offset(&self) -> usize {
        scroll_offset(self.selected, self.layout.visible_rows())
    }

    pub fn dispatch(&mut self, action: Action, now: Instant) {
        debug!(?action, "dispatch");
        match action {
            Action::Quit => self.should_quit = true,
            Action::Timer(key) => {
                if let Some(command) = command_for(key, self.engine.status()) {
                    if let Some(event) = self.engine.apply(command) {
                        debug!(?event, "timer command applied");
                    }
                }
            }
            Action::SelectNext => {
                if self.selected + 1 < self.editor.steps().len() {
                    self.selected += 1;
                }
            }
            Action::SelectPrev => self.selected = self.selected.saturating_sub(1),
            Action::Select(id) => self.select(id),
            Action::Add(kind) => {
                let result = self.editor.add(kind, &mut self.engine);
                self.report(result);
            }
            Action::Remove(id) => {
                let result = self.editor.remove(id, &mut self.engine);
                self.report(result);
            }
            Action::RemoveSelected => {
                if let Some(id) = self.selected_id() {
                    self.dispatch(Action::Remove(id), now);
                }
            }
            Action::Adjust { id, increase } => self.adjust(id, increase),
            Action::AdjustSelected { increase } => {
                if let Some(id) = self.selected_id() {
                    self.adjust(id, increase);
                }
            }
            Action::BeginDrag(id) => {
                self.select(id);
                self.editor.begin_drag(id, DragOrigin::Handle);
            }
            Action::DragOver(Some(id)) => self.editor.drag_enter(id),
            Action::DragOver(None) => self.editor.drag_leave(),
            Action::Drop(target) => {
                let dragged = self.editor.drag().dragging();
                match self.editor.drop_on(target, &mut self.engine) {
                    Ok(DropOutcome::Reordered) => {
                        if let Some(id) = dragged {
                            self.select(id);
                        }
                    }
                    Ok(DropOutcome::Unchanged | DropOutcome::Cancelled) => {}
                    Err(e) => self.report(Err(e)),
                }
            }
            Action::CancelDrag => self.editor.end_drag(),
            Action::ToggleHelp => self.show_help = !self.show_help,
        }
        self.refresh(now);
    }

    /// Run every tick that came due, then re-derive presentation.
    pub fn on_timer(&mut self, now: Instant) {
        let due = self.ticker.fire(now);
        if due == 0 {
            return;
        }
        for _ in 0..due {
            if self.engine.tick().is_none() {
                break;
            }
        }
        self.refresh(now);
    }

    /// Tear down the repeating timer and any gesture in flight.
    pub fn shutdown(&mut self, now: Instant) {
        self.ticker.set_running(false, now);
        self.editor.end_drag();
    }

    fn select(&mut self, id: StepId) {
        if let Some(index) = self.editor.steps().iter().position(|s| s.id == id) {
            self.selected = index;
        }
    }

    fn adjust(&mut self, id: StepId, increase: bool) {
        let Some(step) = self.editor.steps().iter().find(|s| s.id == id) else {
            return;
        };
        let current = step.duration_secs;
        let updated = if increase {
            current.saturating_add(self.adjust_step)
        } else {
            current.saturating_sub(self.adjust_step).max(1)
        };
        if updated != current {
            let result = self.editor.change_duration(id, updated, &mut self.engine);
            self.report(result);
        }
    }

    fn report(&mut self, result: Result<(), StepListError>) {
        if let Err(e) = result {
            warn!(error = %e, "edit rejected");
            self.sink.notify(&e.to_string());
        }
    }

    /// Re-sync everything derived from the engine after a change.
    fn refresh(&mut self, now: Instant) {
        self.editor.sync(self.engine.step_list().steps());
        let len = self.editor.steps().len();
        if self.selected >= len {
            self.selected = len.saturating_sub(1);
        }
        present(&self.engine, &mut self.sink);
        self.ticker.set_running(self.engine.is_running(), now);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tomatick_core::{Key, StepKind, TimerStatus};

    fn app() -> App {
        App::new(&Config::default()).unwrap()
    }

    #[test]
    fn space_starts_and_arms_ticker() {
        let mut app = app();
        let now = Instant::now();
        assert!(!app.ticker.is_armed());
        app.dispatch(Action::Timer(Key::Space), now);
        assert_eq!(app.engine.status(), TimerStatus::Running);
        assert!(app.ticker.is_armed());

        app.dispatch(Action::Timer(Key::Space), now);
        assert!(!app.ticker.is_armed());
    }

    #[test]
    fn ticker_drives_countdown_and_title() {
        let mut app = app();
        let start = Instant::now();
        app.dispatch(Action::Timer(Key::Space), start);
        app.sink.take_pending_title();

        app.on_timer(start + Duration::from_secs(1));
        assert_eq!(app.engine.remaining_secs(), 14);
        assert_eq!(app.sink.status_text(), "00:14 - work");
        assert_eq!(app.sink.take_pending_title().as_deref(), Some("00:14 - work"));
    }

    #[test]
    fn finishing_disarms_ticker() {
        let mut app = app();
        let start = Instant::now();
        app.dispatch(Action::Timer(Key::Space), start);
        app.on_timer(start + Duration::from_secs(200));
        assert!(app.engine.is_done());
        assert!(!app.ticker.is_armed());
        assert_eq!(app.sink.status_text(), "00:00 - done");
    }

    #[test]
    fn removing_last_step_shows_notice() {
        let mut app = app();
        let now = Instant::now();
        for _ in 0..7 {
            app.dispatch(Action::RemoveSelected, now);
        }
        assert_eq!(app.editor.steps().len(), 1);
        app.dispatch(Action::RemoveSelected, now);
        assert_eq!(app.editor.steps().len(), 1);
        assert_eq!(
            app.sink.notice(Instant::now()),
            Some("cannot remove the last remaining step")
        );
    }

    #[test]
    fn drag_gesture_reorders_and_follows_selection() {
        let mut app = app();
        let now = Instant::now();
        app.dispatch(Action::BeginDrag(2), now);
        app.dispatch(Action::DragOver(Some(3)), now);
        app.dispatch(Action::DragOver(Some(5)), now);
        app.dispatch(Action::Drop(Some(5)), now);
        assert_eq!(app.engine.step_list().ids(), vec![1, 3, 4, 5, 2, 6, 7, 8]);
        assert_eq!(app.selected_id(), Some(2));
        assert!(!app.editor.drag().is_active());
    }

    #[test]
    fn aborted_drag_changes_nothing() {
        let mut app = app();
        let now = Instant::now();
        app.dispatch(Action::BeginDrag(2), now);
        app.dispatch(Action::DragOver(Some(6)), now);
        app.dispatch(Action::CancelDrag, now);
        app.dispatch(Action::Drop(Some(6)), now);
        assert_eq!(app.engine.step_list().ids(), (1..=8).collect::<Vec<_>>());
    }

    #[test]
    fn adjust_never_reaches_zero() {
        let mut app = app();
        let now = Instant::now();
        app.dispatch(Action::Adjust { id: 2, increase: false }, now);
        app.dispatch(Action::Adjust { id: 2, increase: false }, now);
        app.dispatch(Action::Adjust { id: 2, increase: false }, now);
        assert_eq!(app.engine.step_list().get(2).map(|s| s.duration_secs), Some(1));
        app.dispatch(Action::Adjust { id: 2, increase: true }, now);
        assert_eq!(app.engine.step_list().get(2).map(|s| s.duration_secs), Some(2));
    }

    #[test]
    fn add_appends_with_configured_duration() {
        let mut app = app();
        app.dispatch(Action::Add(StepKind::LongBreak), Instant::now());
        let last = app.engine.step_list().steps().last().cloned().unwrap();
        assert_eq!(last.kind, StepKind::LongBreak);
        assert_eq!(last.duration_secs, 6);
    }
}
