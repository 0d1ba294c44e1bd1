//! Integration tests for a full timer session.
//!
//! Drives the engine the way a front end does: commands from shortcuts,
//! edits through the editor, presentation pushed into a recording sink.

use tomatick_core::{
    command_for, present, AmbientColor, DragOrigin, DropOutcome, Event, Key, RecordingSink,
    StepKind, StepList, StepListEditor, StepListError, TimerEngine, TimerStatus,
};

#[test]
fn test_seed_runs_to_completion_in_order() {
    let mut engine = TimerEngine::default();
    let mut sink = RecordingSink::default();
    let mut completed = Vec::new();

    engine.start();
    loop {
        match engine.tick() {
            Some(Event::StepAdvanced { completed_step, .. }) => completed.push(completed_step),
            Some(Event::SessionDone { .. }) => {
                completed.push(8);
                break;
            }
            Some(_) => {}
            None => panic!("engine stopped ticking before finishing"),
        }
        present(&engine, &mut sink);
    }
    present(&engine, &mut sink);

    assert_eq!(completed, (1..=8).collect::<Vec<_>>());
    assert_eq!(engine.status(), TimerStatus::Done);
    assert_eq!(engine.remaining_secs(), 0);
    assert_eq!(sink.last_status_text(), Some("00:00 - done"));
    assert_eq!(sink.last_color(), Some(AmbientColor::White));
    assert!(sink.colors.contains(&AmbientColor::Blue));
}

#[test]
fn test_shortcuts_drive_engine() {
    let mut engine = TimerEngine::default();
    let press = |engine: &mut TimerEngine, key: Key| {
        command_for(key, engine.status()).and_then(|cmd| engine.apply(cmd))
    };

    assert!(press(&mut engine, Key::Space).is_some());
    assert_eq!(engine.status(), TimerStatus::Running);
    engine.tick();
    assert!(press(&mut engine, Key::Left).is_some());
    assert_eq!(engine.status(), TimerStatus::Paused);
    assert_eq!(engine.remaining_secs(), 15);

    for _ in 0..8 {
        press(&mut engine, Key::Right);
    }
    assert!(engine.is_done());
    assert!(press(&mut engine, Key::Space).is_none());
    assert!(press(&mut engine, Key::Right).is_none());

    assert!(press(&mut engine, Key::Up).is_some());
    assert_eq!(engine.status(), TimerStatus::Ready);
}

#[test]
fn test_restart_round_trip_after_edits() {
    let mut engine = TimerEngine::default();
    let mut editor = StepListEditor::new(engine.step_list().steps());

    editor.add(StepKind::LongBreak, &mut engine).unwrap();
    editor.remove(3, &mut engine).unwrap();
    editor.change_duration(1, 99, &mut engine).unwrap();
    editor.begin_drag(8, DragOrigin::Handle);
    editor.drag_enter(1);
    assert_eq!(editor.drop_on(Some(1), &mut engine).unwrap(), DropOutcome::Reordered);
    engine.start();
    engine.tick();
    engine.skip();

    engine.restart();
    editor.sync(engine.step_list().steps());

    assert_eq!(engine.step_list(), &StepList::seed());
    assert_eq!(engine.status(), TimerStatus::Ready);
    assert_eq!(engine.remaining_secs(), 15);
    assert!(!engine.is_done());
    assert_eq!(editor.steps(), StepList::seed().steps());
}

#[test]
fn test_redo_is_idempotent() {
    let mut engine = TimerEngine::default();
    engine.skip();
    engine.start();
    engine.tick();
    for _ in 0..5 {
        engine.redo();
        assert_eq!(engine.remaining_secs(), 3);
        assert_eq!(engine.current_step().map(|s| s.id), Some(2));
        assert_eq!(engine.step_list().len(), 7);
    }
}

#[test]
fn test_drag_current_step_away_resets_clock() {
    let mut engine = TimerEngine::default();
    let mut editor = StepListEditor::new(engine.step_list().steps());
    engine.start();
    engine.tick();

    editor.begin_drag(1, DragOrigin::Handle);
    editor.drag_enter(2);
    editor.drop_on(Some(2), &mut engine).unwrap();

    assert_eq!(engine.current_step().map(|s| s.id), Some(2));
    assert_eq!(engine.remaining_secs(), 3);
    assert_eq!(engine.status(), TimerStatus::Running);
}

#[test]
fn test_remove_down_to_one_step() {
    let mut engine = TimerEngine::default();
    let mut editor = StepListEditor::new(engine.step_list().steps());
    for id in 1..8 {
        editor.remove(id, &mut engine).unwrap();
    }
    assert_eq!(editor.remove(8, &mut engine), Err(StepListError::LastStep));
    assert_eq!(engine.step_list().ids(), vec![8]);
    assert_eq!(engine.remaining_secs(), 6);
}
