//! Screen geometry and mouse hit-testing.
//!
//! The view draws rows with the same column ranges used here, so a press is
//! always resolved against what is on screen.

use std::ops::Range;

use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::widgets::Block;
use tomatick_core::{Step, StepId, StepKind};

/// Grip column. The only place a drag may start.
pub const HANDLE: Range<u16> = 0..3;
pub const NAME: Range<u16> = 3..19;
pub const DECREASE: Range<u16> = 19..22;
pub const TIME: Range<u16> = 22..31;
pub const INCREASE: Range<u16> = 31..34;
/// Remove icon, right-aligned.
pub const REMOVE_WIDTH: u16 = 3;

pub const ADD_BUTTONS: [(&str, AddKind); 3] = [
    ("[+ work]", AddKind::Work),
    ("[+ short break]", AddKind::ShortBreak),
    ("[+ long break]", AddKind::LongBreak),
];
const ADD_GAP: u16 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddKind {
    Work,
    ShortBreak,
    LongBreak,
}

impl AddKind {
    pub fn step_kind(self) -> StepKind {
        match self {
            AddKind::Work => StepKind::Work,
            AddKind::ShortBreak => StepKind::ShortBreak,
            AddKind::LongBreak => StepKind::LongBreak,
        }
    }
}

/// What sits under a screen cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hit {
    Handle(StepId),
    Decrease(StepId),
    Increase(StepId),
    Remove(StepId),
    /// Anywhere else on a step row.
    Body(StepId),
    Add(AddKind),
    Nothing,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScreenLayout {
    pub timer: Rect,
    /// Bordered block around the step rows.
    pub list_block: Rect,
    /// Step rows, inside the border.
    pub list: Rect,
    pub add_bar: Rect,
    pub status: Rect,
    pub help: Rect,
}

impl ScreenLayout {
    pub fn new(area: Rect) -> Self {
        let [timer, list_block, add_bar, status, help] = Layout::vertical([
            Constraint::Length(5),
            Constraint::Min(3),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(area);
        Self {
            timer,
            list_block,
            list: Block::bordered().inner(list_block),
            add_bar,
            status,
            help,
        }
    }

    pub fn visible_rows(&self) -> usize {
        self.list.height as usize
    }

    /// Step under a cell of the list area, regardless of column.
    pub fn row_at(&self, column: u16, row: u16, steps: &[Step], offset: usize) -> Option<StepId> {
        if !contains(self.list, column, row) {
            return None;
        }
        let index = offset + (row - self.list.y) as usize;
        steps.get(index).map(|s| s.id)
    }

    pub fn hit(&self, column: u16, row: u16, steps: &[Step], offset: usize) -> Hit {
        if let Some(id) = self.row_at(column, row, steps, offset) {
            let x = column - self.list.x;
            let remove_start = self.list.width.saturating_sub(REMOVE_WIDTH);
            return if HANDLE.contains(&x) {
                Hit::Handle(id)
            } else if x >= remove_start {
                Hit::Remove(id)
            } else if DECREASE.contains(&x) {
                Hit::Decrease(id)
            } else if INCREASE.contains(&x) {
                Hit::Increase(id)
            } else {
                Hit::Body(id)
            };
        }
        if contains(self.add_bar, column, row) {
            let x = column - self.add_bar.x;
            for (range, kind) in add_button_ranges() {
                if range.contains(&x) {
                    return Hit::Add(kind);
                }
            }
        }
        Hit::Nothing
    }
}

/// Column ranges of the add buttons, relative to the add bar.
pub fn add_button_ranges() -> Vec<(Range<u16>, AddKind)> {
    let mut x = 0;
    ADD_BUTTONS
        .iter()
        .map(|(label, kind)| {
            let width = label.chars().count() as u16;
            let range = x..x + width;
            x += width + ADD_GAP;
            (range, *kind)
        })
        .collect()
}

pub fn add_button_gap() -> u16 {
    ADD_GAP
}

/// First visible row so that `selected` stays on screen.
pub fn scroll_offset(selected: usize, visible_rows: usize) -> usize {
    if visible_rows == 0 {
        return selected;
    }
    (selected + 1).saturating_sub(visible_rows)
}

fn contains(rect: Rect, column: u16, row: u16) -> bool {
    column >= rect.x && column < rect.x + rect.width && row >= rect.y && row < rect.y + rect.height
}
