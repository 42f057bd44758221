//! Selection invariants over random scenes.

mod common;

use common::{engine, record, Ball};
use pickselect::*;
use proptest::prelude::*;

fn balls() -> impl Strategy<Value = Vec<Ball>> {
    prop::collection::vec((0.0..800.0f32, 0.0..600.0f32, 5.0..60.0f32), 1..8).prop_map(|specs| {
        specs
            .into_iter()
            .enumerate()
            .map(|(i, (x, y, r))| Ball::new(i as u32, Vec3::new(x, y, 0.0), r))
            .collect()
    })
}

fn candidates(balls: &[Ball]) -> Vec<&dyn SpatialObject> {
    balls.iter().map(|b| b as &dyn SpatialObject).collect()
}

proptest! {
    #[test]
    fn prop_second_traversal_changes_nothing(
        balls in balls(),
        x in 0..800i32,
        y in 0..600i32,
        hover in any::<bool>(),
        group in any::<bool>(),
        toggle in any::<bool>(),
    ) {
        let (mut engine, clock) = engine();
        engine.set_on_hover(hover);
        engine.set_group_selection(group);
        engine.set_toggle_selection(toggle);
        let events = record(&mut engine);
        let candidates = candidates(&balls);

        clock.advance(1.0);
        engine.set_pick_position(IVec2::new(x, y));
        engine.click();
        engine.traverse(&candidates, true).unwrap();
        let selected = engine.selected_objects().to_vec();
        let seen = events.borrow().len();

        clock.advance(0.1);
        engine.traverse(&candidates, true).unwrap();
        prop_assert_eq!(engine.selected_objects(), selected.as_slice());
        prop_assert_eq!(events.borrow().len(), seen);
    }

    #[test]
    fn prop_single_selection_holds_at_most_one(
        balls in balls(),
        pointers in prop::collection::vec((0..800i32, 0..600i32), 1..6),
        hover in any::<bool>(),
    ) {
        let (mut engine, clock) = engine();
        engine.set_on_hover(hover);
        let candidates = candidates(&balls);

        for (x, y) in pointers {
            clock.advance(1.0);
            engine.set_pick_position(IVec2::new(x, y));
            engine.click();
            engine.traverse(&candidates, false).unwrap();
            engine.unclick();
            prop_assert!(engine.count() <= 1);
        }
    }

    #[test]
    fn prop_selection_matches_records(
        balls in balls(),
        pointers in prop::collection::vec((0..800i32, 0..600i32), 1..6),
        group in any::<bool>(),
        toggle in any::<bool>(),
    ) {
        let (mut engine, clock) = engine();
        engine.set_group_selection(group);
        engine.set_toggle_selection(toggle);
        let candidates = candidates(&balls);

        for (x, y) in pointers {
            clock.advance(1.0);
            engine.set_pick_position(IVec2::new(x, y));
            engine.click();
            engine.traverse(&candidates, false).unwrap();
            engine.unclick();
            engine.traverse(&candidates, false).unwrap();

            let mut flagged: Vec<ObjectId> = engine
                .picking_infos()
                .filter(|(_, info)| info.selected)
                .map(|(id, _)| id)
                .collect();
            let mut selected = engine.selected_objects().to_vec();
            flagged.sort_by_key(|id| id.get());
            selected.sort_by_key(|id| id.get());
            prop_assert_eq!(flagged, selected);
        }
    }
}
