//! Rendering. Every frame is drawn from `App` state alone.

use std::time::Instant;

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Paragraph},
    Frame,
};
use tomatick_core::{display_time, Placement, Step, TimerStatus};

use super::layout::{self, ScreenLayout, ADD_BUTTONS};
use super::sink::terminal_color;
use super::App;

const HELP: &str = "[space] start/stop  [\u{2190}] redo  [\u{2192}] skip  [\u{2191}] restart  \
[w/s/l] add  [d] remove  [+/-] duration  [j/k] select  [?] help  [q] quit";

pub fn render(frame: &mut Frame, app: &mut App, now: Instant) {
    app.layout = ScreenLayout::new(frame.area());
    let layout = app.layout;

    render_timer(frame, app, layout.timer);
    render_steps(frame, app, &layout);
    render_add_bar(frame, layout.add_bar);
    render_status(frame, app, layout.status, now);
    if app.show_help {
        frame.render_widget(Paragraph::new(HELP).dark_gray(), layout.help);
    }
}

fn status_label(status: TimerStatus) -> &'static str {
    match status {
        TimerStatus::Ready => "Ready",
        TimerStatus::Running => "Running",
        TimerStatus::Paused => "Paused",
        TimerStatus::Done => "Done",
    }
}

fn render_timer(frame: &mut Frame, app: &App, area: Rect) {
    let background = terminal_color(app.sink.color());
    let engine = &app.engine;
    let detail = if engine.is_done() {
        "All steps done. Press \u{2191} to restart.".to_string()
    } else {
        format!(
            "{}  \u{b7}  {} step(s) left",
            status_label(engine.status()),
            engine.step_list().len()
        )
    };
    let lines = vec![
        Line::from(app.sink.status_text().to_string()).bold().centered(),
        Line::from(""),
        Line::from(detail).centered(),
    ];
    let panel = Paragraph::new(lines).block(
        Block::bordered()
            .title(" Tomatick ")
            .style(Style::default().bg(background).fg(Color::Black)),
    );
    frame.render_widget(panel, area);
}

fn render_steps(frame: &mut Frame, app: &App, layout: &ScreenLayout) {
    let editor = &app.editor;
    let indicator = editor.indicator();
    let offset = app.scroll_offset();
    let width = layout.list.width;

    let lines: Vec<Line> = editor
        .steps()
        .iter()
        .enumerate()
        .skip(offset)
        .take(layout.visible_rows())
        .map(|(index, step)| {
            let marker = indicator
                .filter(|i| i.target == step.id)
                .map(|i| i.placement);
            let mut style = Style::default();
            if index == app.selected {
                style = style.add_modifier(Modifier::REVERSED);
            }
            if editor.drag().is_dragging(step.id) {
                style = style.add_modifier(Modifier::DIM);
            }
            if index == 0 && !app.engine.is_done() {
                style = style.add_modifier(Modifier::BOLD);
            }
            step_row(step, marker, width).style(style)
        })
        .collect();

    let block = Block::bordered().title(" Steps (drag \u{2261} to reorder) ");
    frame.render_widget(Paragraph::new(lines).block(block), layout.list_block);
}

/// One step as a line whose columns line up with the hit-test ranges.
fn step_row(step: &Step, marker: Option<Placement>, width: u16) -> Line<'static> {
    let handle = match marker {
        Some(Placement::Above) => Span::styled(" \u{25b2} ", Style::default().fg(Color::Yellow)),
        Some(Placement::Below) => Span::styled(" \u{25bc} ", Style::default().fg(Color::Yellow)),
        None => Span::raw(" \u{2261} "),
    };
    let name_width = layout::NAME.len();
    let name: String = step.name().chars().take(name_width).collect();
    let time_width = layout::TIME.len();
    let used = layout::INCREASE.end;
    let filler = width.saturating_sub(used + layout::REMOVE_WIDTH) as usize;

    Line::from(vec![
        handle,
        Span::raw(format!("{name:<name_width$}")),
        Span::raw("[-]"),
        Span::raw(format!("{:^time_width$}", display_time(step.duration_secs))),
        Span::raw("[+]"),
        Span::raw(" ".repeat(filler)),
        Span::styled(" \u{2715} ", Style::default().fg(Color::Red)),
    ])
}

fn render_add_bar(frame: &mut Frame, area: Rect) {
    let gap = " ".repeat(layout::add_button_gap() as usize);
    let mut spans = Vec::with_capacity(ADD_BUTTONS.len() * 2);
    for (i, (label, _)) in ADD_BUTTONS.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw(gap.clone()));
        }
        spans.push(Span::raw(*label).green());
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_status(frame: &mut Frame, app: &App, area: Rect, now: Instant) {
    let line = if let Some(notice) = app.sink.notice(now) {
        Line::from(notice.to_string()).yellow()
    } else if let Some(id) = app.editor.drag().dragging() {
        let text = match app.editor.drag().hover() {
            Some(target) if target != id => format!("moving step {id} onto step {target}"),
            _ => format!("moving step {id}, release over a step to drop"),
        };
        Line::from(text).cyan()
    } else {
        Line::from("")
    };
    frame.render_widget(Paragraph::new(line), area);
}
