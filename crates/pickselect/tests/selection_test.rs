//! Selection laws and end-to-end picking scenarios.

mod common;

use common::{click_at, engine, record, Ball};
use pickselect::*;

#[test]
fn test_objects_off_the_ray_are_not_picked() {
    let (mut engine, _) = engine();
    engine.set_on_hover(true);
    engine.set_check_on_screen_box(true);
    let far = Ball::new(0, Vec3::new(600.0, 100.0, 0.0), 20.0);

    engine.set_pick_position(IVec2::new(100, 500));
    engine.traverse(&[&far], true).unwrap();

    let info = engine.picking_info(far.id).unwrap();
    assert_eq!(info.result, PickResult::NotPicked);
    assert!(!info.selected);
    assert!(!engine.has_picked());
}

#[test]
fn test_click_scenario() {
    let (mut engine, _) = engine();
    let events = record(&mut engine);
    let a = Ball::new(0, Vec3::new(400.0, 300.0, 0.0), 50.0);

    // Window coordinates; y flips to 600 - 300 = 300
    engine.set_pointer(400, 300);
    engine.click();
    assert!(engine.traverse(&[&a], true).unwrap());

    let info = engine.picking_info(a.id).unwrap();
    assert_eq!(info.result, PickResult::PickedSphere);
    assert!(info.selected);
    assert_eq!(engine.selected_objects(), &[a.id]);
    assert_eq!(*events.borrow(), vec![(a.id, true)]);

    let hit = engine.intersection().unwrap();
    assert!((hit - Vec3::new(400.0, 300.0, 50.0)).length() < 1e-2);
}

#[test]
fn test_drag_box_scenario() {
    let (mut engine, _) = engine();
    engine.set_group_selection(true);
    engine.set_use_picking_box(true);
    let events = record(&mut engine);

    // In pick space the box spans x 100..300, y 300..500
    let a = Ball::new(0, Vec3::new(150.0, 400.0, 0.0), 10.0);
    let b = Ball::new(1, Vec3::new(250.0, 450.0, 0.0), 10.0);
    let outside = Ball::new(2, Vec3::new(600.0, 100.0, 0.0), 10.0);

    engine.set_pointer(100, 100);
    engine.click();
    engine.set_pointer(300, 300);
    engine.traverse(&[&a, &outside, &b], true).unwrap();

    assert_eq!(engine.pick_box(), Rect::new(100, 300, 200, 200));
    assert_eq!(engine.selected_objects(), &[a.id, b.id]);
    assert!(engine.picking_info(a.id).unwrap().selected);
    assert!(engine.picking_info(b.id).unwrap().selected);
    assert!(engine.picking_info(a.id).unwrap().pick_box_contains);
    assert!(!engine.picking_info(outside.id).unwrap().selected);
    assert_eq!(*events.borrow(), vec![(a.id, true), (b.id, true)]);
}

#[test]
fn test_traverse_is_idempotent_within_a_frame() {
    let (mut engine, _) = engine();
    engine.set_group_selection(true);
    let events = record(&mut engine);
    let a = Ball::new(0, Vec3::new(100.0, 100.0, 0.0), 20.0);
    let b = Ball::new(1, Vec3::new(300.0, 300.0, 0.0), 20.0);

    engine.set_pick_position(IVec2::new(100, 100));
    engine.click();
    engine.traverse(&[&a, &b], true).unwrap();
    let first = engine.selected_objects().to_vec();
    let first_events = events.borrow().len();

    engine.traverse(&[&a, &b], true).unwrap();
    assert_eq!(engine.selected_objects(), first.as_slice());
    assert_eq!(events.borrow().len(), first_events);
}

#[test]
fn test_hover_is_idempotent_within_a_frame() {
    let (mut engine, _) = engine();
    engine.set_on_hover(true);
    let events = record(&mut engine);
    let a = Ball::new(0, Vec3::new(100.0, 100.0, 0.0), 20.0);

    engine.set_pick_position(IVec2::new(100, 100));
    engine.traverse(&[&a], true).unwrap();
    engine.traverse(&[&a], true).unwrap();

    assert_eq!(engine.selected_objects(), &[a.id]);
    assert_eq!(*events.borrow(), vec![(a.id, true)]);
}

#[test]
fn test_hover_with_group_keeps_first_hit() {
    let (mut engine, _) = engine();
    engine.set_on_hover(true);
    engine.set_group_selection(true);
    let events = record(&mut engine);
    let a = Ball::new(0, Vec3::new(100.0, 100.0, 0.0), 20.0);
    let b = Ball::new(1, Vec3::new(105.0, 100.0, 0.0), 20.0);

    engine.set_pick_position(IVec2::new(102, 100));
    engine.traverse(&[&a, &b], true).unwrap();
    assert!(!engine.should_continue());
    engine.traverse(&[&a, &b], true).unwrap();

    assert_eq!(engine.selected_objects(), &[a.id]);
    assert_eq!(*events.borrow(), vec![(a.id, true)]);
}

#[test]
fn test_toggle_law() {
    let (mut engine, clock) = engine();
    engine.set_toggle_selection(true);
    let events = record(&mut engine);
    let a = Ball::new(0, Vec3::new(100.0, 100.0, 0.0), 20.0);

    let mut states = Vec::new();
    for _ in 0..4 {
        click_at(&mut engine, &clock, &[&a], 100, 100);
        states.push(engine.picking_info(a.id).unwrap().selected);
    }

    assert_eq!(states, vec![true, false, true, false]);
    assert_eq!(
        *events.borrow(),
        vec![(a.id, true), (a.id, false), (a.id, true), (a.id, false)]
    );
}

#[test]
fn test_toggle_fires_once_per_gesture() {
    let (mut engine, clock) = engine();
    engine.set_toggle_selection(true);
    let a = Ball::new(0, Vec3::new(100.0, 100.0, 0.0), 20.0);

    clock.advance(1.0);
    engine.set_pick_position(IVec2::new(100, 100));
    engine.click();
    for _ in 0..3 {
        clock.advance(0.1);
        engine.traverse(&[&a], false).unwrap();
    }
    assert!(engine.picking_info(a.id).unwrap().selected);
}

#[test]
fn test_group_law_with_toggle_clicks() {
    let (mut engine, clock) = engine();
    engine.set_group_selection(true);
    engine.set_toggle_selection(true);
    let a = Ball::new(0, Vec3::new(100.0, 100.0, 0.0), 20.0);
    let b = Ball::new(1, Vec3::new(300.0, 100.0, 0.0), 20.0);
    let c = Ball::new(2, Vec3::new(500.0, 100.0, 0.0), 20.0);
    let candidates: [&dyn SpatialObject; 3] = [&a, &b, &c];

    click_at(&mut engine, &clock, &candidates, 300, 100);
    click_at(&mut engine, &clock, &candidates, 500, 100);
    click_at(&mut engine, &clock, &candidates, 100, 100);
    assert_eq!(engine.selected_objects(), &[b.id, c.id, a.id]);
    assert_eq!(engine.count(), 3);

    // Toggling one off keeps the others in order
    click_at(&mut engine, &clock, &candidates, 500, 100);
    assert_eq!(engine.selected_objects(), &[b.id, a.id]);
}

#[test]
fn test_group_law_within_one_gesture() {
    let (mut engine, _) = engine();
    engine.set_group_selection(true);
    let a = Ball::new(0, Vec3::new(100.0, 100.0, 0.0), 20.0);
    let b = Ball::new(1, Vec3::new(300.0, 100.0, 0.0), 20.0);
    let candidates: [&dyn SpatialObject; 2] = [&a, &b];

    engine.set_pick_position(IVec2::new(300, 100));
    engine.click();
    engine.traverse(&candidates, false).unwrap();
    engine.set_pick_position(IVec2::new(100, 100));
    engine.traverse(&candidates, false).unwrap();
    engine.set_pick_position(IVec2::new(300, 100));
    engine.traverse(&candidates, false).unwrap();

    assert_eq!(engine.selected_objects(), &[b.id, a.id]);
}

#[test]
fn test_single_selection_law_on_hover() {
    let (mut engine, _) = engine();
    engine.set_on_hover(true);
    let events = record(&mut engine);
    let a = Ball::new(0, Vec3::new(100.0, 100.0, 0.0), 20.0);
    let b = Ball::new(1, Vec3::new(300.0, 300.0, 0.0), 20.0);
    let candidates: [&dyn SpatialObject; 2] = [&b, &a];

    engine.set_pick_position(IVec2::new(100, 100));
    engine.traverse(&candidates, true).unwrap();
    assert_eq!(engine.selected_objects(), &[a.id]);

    // B comes first and stops the traversal; A is still reported
    engine.set_pick_position(IVec2::new(300, 300));
    engine.traverse(&candidates, true).unwrap();
    assert_eq!(engine.selected_objects(), &[b.id]);
    assert!(!engine.picking_info(a.id).unwrap().selected);
    assert_eq!(
        *events.borrow(),
        vec![(a.id, true), (a.id, false), (b.id, true)]
    );
}

#[test]
fn test_single_selection_law_on_toggle_click() {
    let (mut engine, clock) = engine();
    engine.set_toggle_selection(true);
    let events = record(&mut engine);
    let a = Ball::new(0, Vec3::new(100.0, 100.0, 0.0), 20.0);
    let b = Ball::new(1, Vec3::new(300.0, 300.0, 0.0), 20.0);
    let candidates: [&dyn SpatialObject; 2] = [&a, &b];

    click_at(&mut engine, &clock, &candidates, 100, 100);
    click_at(&mut engine, &clock, &candidates, 300, 300);

    assert_eq!(engine.selected_objects(), &[b.id]);
    assert_eq!(
        *events.borrow(),
        vec![(a.id, true), (a.id, false), (b.id, true)]
    );
}

#[test]
fn test_hover_away_deselects() {
    let (mut engine, _) = engine();
    engine.set_on_hover(true);
    let events = record(&mut engine);
    let a = Ball::new(0, Vec3::new(100.0, 100.0, 0.0), 20.0);

    engine.set_pick_position(IVec2::new(100, 100));
    engine.traverse(&[&a], true).unwrap();
    engine.set_pick_position(IVec2::new(700, 500));
    engine.traverse(&[&a], true).unwrap();

    assert!(!engine.has_picked());
    assert_eq!(*events.borrow(), vec![(a.id, true), (a.id, false)]);
}

#[test]
fn test_click_miss_clears_selection() {
    let (mut engine, clock) = engine();
    let events = record(&mut engine);
    let a = Ball::new(0, Vec3::new(100.0, 100.0, 0.0), 20.0);

    click_at(&mut engine, &clock, &[&a], 100, 100);
    assert!(engine.has_picked());
    // The press clears silently
    click_at(&mut engine, &clock, &[&a], 700, 500);
    assert!(!engine.has_picked());
    assert_eq!(*events.borrow(), vec![(a.id, true)]);
}

#[test]
fn test_invisible_objects_are_skipped() {
    let (mut engine, _) = engine();
    engine.set_on_hover(true);
    let mut a = Ball::new(0, Vec3::new(100.0, 100.0, 0.0), 20.0);
    a.visible = false;

    engine.set_pick_position(IVec2::new(100, 100));
    engine.traverse(&[&a], false).unwrap();
    assert!(!engine.has_picked());
    assert!(engine.picking_info(a.id).is_none());
}

#[test]
fn test_listener_removal() {
    let (mut engine, _) = engine();
    engine.set_on_hover(true);
    let kept = record(&mut engine);
    let dropped: common::Events = Default::default();
    let sink = std::rc::Rc::clone(&dropped);
    let id = engine.add_listener(move |object: &dyn SpatialObject, _: &PickingInfo, selected: bool| {
        sink.borrow_mut().push((object.id(), selected));
    });
    assert_eq!(engine.listener_count(), 2);
    assert!(engine.remove_listener(id));
    assert!(!engine.remove_listener(id));

    let a = Ball::new(0, Vec3::new(100.0, 100.0, 0.0), 20.0);
    engine.set_pick_position(IVec2::new(100, 100));
    engine.traverse(&[&a], true).unwrap();

    assert_eq!(kept.borrow().len(), 1);
    assert!(dropped.borrow().is_empty());
}

#[test]
fn test_listeners_silent_without_notify() {
    let (mut engine, _) = engine();
    engine.set_on_hover(true);
    let events = record(&mut engine);
    let a = Ball::new(0, Vec3::new(100.0, 100.0, 0.0), 20.0);

    engine.set_pick_position(IVec2::new(100, 100));
    engine.traverse(&[&a], false).unwrap();
    assert!(engine.has_picked());
    assert!(events.borrow().is_empty());
}

#[test]
fn test_removed_object_state_does_not_leak() {
    let (mut engine, clock) = engine();
    let mut scene = Scene::new();
    let a = scene.add(SceneObject::cube("a", 20.0).with_position(Vec3::new(100.0, 100.0, 0.0)));
    scene.add(SceneObject::cube("b", 20.0).with_position(Vec3::new(300.0, 100.0, 0.0)));

    click_at(&mut engine, &clock, &scene.candidates(), 100, 100);
    assert_eq!(engine.selected_objects(), &[a]);

    scene.remove(a).unwrap();
    assert!(engine.purge(a));
    assert!(!engine.has_picked());

    let c = scene.add(SceneObject::cube("c", 20.0).with_position(Vec3::new(500.0, 100.0, 0.0)));
    assert_ne!(c, a);
    assert!(engine.picking_info(c).is_none());
}

#[test]
fn test_retain_against_scene() {
    let (mut engine, _) = engine();
    engine.set_group_selection(true);
    let mut scene = Scene::new();
    let a = scene.add(SceneObject::cube("a", 20.0).with_position(Vec3::new(100.0, 100.0, 0.0)));
    let b = scene.add(SceneObject::cube("b", 20.0).with_position(Vec3::new(300.0, 100.0, 0.0)));

    engine.set_pick_position(IVec2::new(100, 100));
    engine.click();
    engine.traverse(&scene.candidates(), false).unwrap();
    assert_eq!(engine.selected_objects(), &[a]);

    scene.remove(a).unwrap();
    engine.retain(|id| scene.contains(id));
    assert!(engine.picking_info(a).is_none());
    assert!(engine.picking_info(b).is_some());
    assert!(!engine.has_picked());
}

#[test]
fn test_configured_from_json() {
    let options = PickOptions::from_json(
        r#"{ "screen_width": 800, "screen_height": 600, "trigger": "Hover", "check_aabb": true }"#,
    )
    .unwrap();
    let mut engine = PickSelection::with_options(&options);
    engine.set_camera(common::TopDown);
    let a = Ball::new(0, Vec3::new(100.0, 100.0, 0.0), 20.0);

    // Inside both the sphere and its box
    engine.set_pointer(110, 490);
    engine.traverse(&[&a], false).unwrap();
    assert_eq!(engine.good_pick_result(), PickResult::PickedAABB);
    assert_eq!(engine.selected_objects(), &[a.id]);
}
