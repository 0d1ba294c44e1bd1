//! Property tests for step list reordering and removal.

use proptest::prelude::*;
use tomatick_core::{
    DragOrigin, DropOutcome, Step, StepId, StepKind, StepList, StepListEditor, StepListError,
    TimerEngine,
};

fn kind_strategy() -> impl Strategy<Value = StepKind> {
    prop_oneof![
        Just(StepKind::Work),
        Just(StepKind::ShortBreak),
        Just(StepKind::LongBreak),
        "[a-z]{1,8}".prop_map(StepKind::Custom),
    ]
}

fn list_strategy() -> impl Strategy<Value = StepList> {
    prop::collection::vec((kind_strategy(), 1u64..3600), 1..16).prop_map(|specs| {
        let steps = specs
            .into_iter()
            .zip(1..)
            .map(|((kind, secs), id)| Step::new(id, kind, secs))
            .collect();
        StepList::from_steps(steps).unwrap()
    })
}

fn without(ids: &[StepId], id: StepId) -> Vec<StepId> {
    ids.iter().copied().filter(|&other| other != id).collect()
}

proptest! {
    #[test]
    fn move_preserves_others(list in list_strategy(), a in any::<prop::sample::Index>(), b in any::<prop::sample::Index>()) {
        let before = list.ids();
        let source = before[a.index(before.len())];
        let target = before[b.index(before.len())];
        let target_pos = list.position(target).unwrap();

        let mut moved = list.clone();
        let changed = moved.move_step(source, target).unwrap();
        let after = moved.ids();

        prop_assert_eq!(after.len(), before.len());
        if source == target {
            prop_assert!(!changed);
            prop_assert_eq!(&after, &before);
        } else {
            prop_assert!(changed);
            prop_assert_eq!(after[target_pos], source);
            prop_assert_eq!(without(&after, source), without(&before, source));
        }
    }

    #[test]
    fn editor_drop_matches_list_move(list in list_strategy(), a in any::<prop::sample::Index>(), b in any::<prop::sample::Index>()) {
        let ids = list.ids();
        let source = ids[a.index(ids.len())];
        let target = ids[b.index(ids.len())];

        let mut engine = TimerEngine::new(list.clone());
        let mut editor = StepListEditor::new(engine.step_list().steps());
        editor.begin_drag(source, DragOrigin::Handle);
        editor.drag_enter(target);
        let outcome = editor.drop_on(Some(target), &mut engine).unwrap();

        let mut expected = list;
        expected.move_step(source, target).unwrap();
        prop_assert_eq!(engine.step_list().ids(), expected.ids());
        prop_assert_eq!(editor.steps(), engine.step_list().steps());
        prop_assert_eq!(outcome == DropOutcome::Unchanged, source == target);
        prop_assert!(!editor.drag().is_active());
    }

    #[test]
    fn remove_from_single_step_list_is_rejected(kind in kind_strategy(), secs in 1u64..3600, id in 1u64..1000) {
        let mut list = StepList::from_steps(vec![Step::new(id, kind, secs)]).unwrap();
        let before = list.clone();
        prop_assert_eq!(list.remove(id), Err(StepListError::LastStep));
        prop_assert_eq!(list, before);
    }
}
