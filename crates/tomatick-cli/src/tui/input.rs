//! Terminal events -> Action
//!
//! Keyboard and mouse events are mapped to semantic actions. Nothing here
//! touches application state.

use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind,
};
use tomatick_core::{Key, Step, StepId, StepKind};

use super::layout::{Hit, ScreenLayout};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Quit,
    /// Timer shortcut, gated by the current status.
    Timer(Key),
    SelectNext,
    SelectPrev,
    Select(StepId),
    Add(StepKind),
    Remove(StepId),
    RemoveSelected,
    Adjust { id: StepId, increase: bool },
    AdjustSelected { increase: bool },
    BeginDrag(StepId),
    DragOver(Option<StepId>),
    Drop(Option<StepId>),
    CancelDrag,
    ToggleHelp,
}

/// Map one terminal event. Losing focus aborts any drag in flight.
pub fn event_action(
    event: Event,
    layout: &ScreenLayout,
    steps: &[Step],
    offset: usize,
    drag_active: bool,
) -> Option<Action> {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => key_action(key, drag_active),
        Event::Mouse(mouse) => mouse_action(mouse, layout, steps, offset, drag_active),
        Event::FocusLost if drag_active => Some(Action::CancelDrag),
        _ => None,
    }
}

pub fn key_action(key: KeyEvent, drag_active: bool) -> Option<Action> {
    let action = match key.code {
        KeyCode::Esc if drag_active => Action::CancelDrag,
        KeyCode::Esc | KeyCode::Char('q') => Action::Quit,
        KeyCode::Char(' ') => Action::Timer(Key::Space),
        KeyCode::Left => Action::Timer(Key::Left),
        KeyCode::Right => Action::Timer(Key::Right),
        KeyCode::Up => Action::Timer(Key::Up),
        KeyCode::Char('j') | KeyCode::Down => Action::SelectNext,
        KeyCode::Char('k') => Action::SelectPrev,
        KeyCode::Char('w') => Action::Add(StepKind::Work),
        KeyCode::Char('s') => Action::Add(StepKind::ShortBreak),
        KeyCode::Char('l') => Action::Add(StepKind::LongBreak),
        KeyCode::Char('d') | KeyCode::Delete => Action::RemoveSelected,
        KeyCode::Char('+') | KeyCode::Char('=') => Action::AdjustSelected { increase: true },
        KeyCode::Char('-') => Action::AdjustSelected { increase: false },
        KeyCode::Char('?') => Action::ToggleHelp,
        _ => return None,
    };
    Some(action)
}

pub fn mouse_action(
    event: MouseEvent,
    layout: &ScreenLayout,
    steps: &[Step],
    offset: usize,
    drag_active: bool,
) -> Option<Action> {
    let (column, row) = (event.column, event.row);
    match event.kind {
        MouseEventKind::Down(MouseButton::Left) => match layout.hit(column, row, steps, offset) {
            Hit::Handle(id) => Some(Action::BeginDrag(id)),
            Hit::Body(id) => Some(Action::Select(id)),
            Hit::Decrease(id) => Some(Action::Adjust { id, increase: false }),
            Hit::Increase(id) => Some(Action::Adjust { id, increase: true }),
            Hit::Remove(id) => Some(Action::Remove(id)),
            Hit::Add(kind) => Some(Action::Add(kind.step_kind())),
            Hit::Nothing => None,
        },
        MouseEventKind::Drag(MouseButton::Left) if drag_active => {
            Some(Action::DragOver(layout.row_at(column, row, steps, offset)))
        }
        MouseEventKind::Up(MouseButton::Left) if drag_active => {
            Some(Action::Drop(layout.row_at(column, row, steps, offset)))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyModifiers, MouseEvent};
    use ratatui::layout::Rect;
    use tomatick_core::StepList;

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn esc_cancels_drag_before_quitting() {
        assert_eq!(key_action(key(KeyCode::Esc), true), Some(Action::CancelDrag));
        assert_eq!(key_action(key(KeyCode::Esc), false), Some(Action::Quit));
    }

    #[test]
    fn arrows_are_timer_shortcuts() {
        assert_eq!(key_action(key(KeyCode::Char(' ')), false), Some(Action::Timer(Key::Space)));
        assert_eq!(key_action(key(KeyCode::Left), false), Some(Action::Timer(Key::Left)));
        assert_eq!(key_action(key(KeyCode::Right), false), Some(Action::Timer(Key::Right)));
        assert_eq!(key_action(key(KeyCode::Up), false), Some(Action::Timer(Key::Up)));
        assert_eq!(key_action(key(KeyCode::Char('x')), false), None);
    }

    #[test]
    fn press_on_handle_begins_drag_press_on_body_selects() {
        let layout = ScreenLayout::new(Rect::new(0, 0, 60, 20));
        let list = StepList::seed();
        let y = layout.list.y;
        let handle = mouse(MouseEventKind::Down(MouseButton::Left), layout.list.x + 1, y);
        let body = mouse(MouseEventKind::Down(MouseButton::Left), layout.list.x + 8, y);
        assert_eq!(
            mouse_action(handle, &layout, list.steps(), 0, false),
            Some(Action::BeginDrag(1))
        );
        assert_eq!(
            mouse_action(body, &layout, list.steps(), 0, false),
            Some(Action::Select(1))
        );
    }

    #[test]
    fn focus_loss_cancels_drag() {
        let layout = ScreenLayout::new(Rect::new(0, 0, 60, 20));
        let list = StepList::seed();
        assert_eq!(
            event_action(Event::FocusLost, &layout, list.steps(), 0, true),
            Some(Action::CancelDrag)
        );
        assert_eq!(event_action(Event::FocusLost, &layout, list.steps(), 0, false), None);
        assert_eq!(
            event_action(Event::Key(key(KeyCode::Char('q'))), &layout, list.steps(), 0, false),
            Some(Action::Quit)
        );
    }

    #[test]
    fn drag_motion_only_while_dragging() {
        let layout = ScreenLayout::new(Rect::new(0, 0, 60, 20));
        let list = StepList::seed();
        let over = mouse(MouseEventKind::Drag(MouseButton::Left), 30, layout.list.y + 3);
        assert_eq!(mouse_action(over, &layout, list.steps(), 0, false), None);
        assert_eq!(
            mouse_action(over, &layout, list.steps(), 0, true),
            Some(Action::DragOver(Some(4)))
        );

        let outside = mouse(MouseEventKind::Up(MouseButton::Left), 30, 0);
        assert_eq!(
            mouse_action(outside, &layout, list.steps(), 0, true),
            Some(Action::Drop(None))
        );
    }
}
