//! Shared fixtures for the integration tests.

#![allow(dead_code)]

use std::any::Any;
use std::cell::RefCell;
use std::rc::Rc;

use pickselect::*;

/// Camera looking straight down -Z; pick space maps 1:1 onto world x/y.
pub struct TopDown;

impl PickCamera for TopDown {
    fn pick_ray(&self, screen: Vec2) -> Option<Ray> {
        Some(Ray::new(screen.extend(1000.0), Vec3::NEG_Z))
    }

    fn project(&self, world: Vec3) -> Vec3 {
        world
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// A sphere-bounded object with an explicit radius.
#[derive(Debug)]
pub struct Ball {
    pub id: ObjectId,
    pub center: Vec3,
    pub radius: f32,
    pub visible: bool,
}

impl Ball {
    pub fn new(id: u32, center: Vec3, radius: f32) -> Self {
        Self {
            id: ObjectId(id),
            center,
            radius,
            visible: true,
        }
    }
}

impl SpatialObject for Ball {
    fn id(&self) -> ObjectId {
        self.id
    }

    fn bounding_sphere(&self) -> BoundingSphere {
        BoundingSphere::new(self.center, self.radius)
    }

    fn original_bounding_box(&self) -> BoundingBox {
        BoundingBox::from_center_half_extents(Vec3::ZERO, Vec3::splat(self.radius))
    }

    fn transform(&self) -> Mat4 {
        Mat4::from_translation(self.center)
    }

    fn position(&self) -> Vec3 {
        self.center
    }

    fn scale(&self) -> Vec3 {
        Vec3::ONE
    }

    fn is_visible(&self) -> bool {
        self.visible
    }
}

/// Selection events in the order listeners saw them.
pub type Events = Rc<RefCell<Vec<(ObjectId, bool)>>>;

/// Registers a listener recording every event.
pub fn record(engine: &mut PickSelection) -> Events {
    let events: Events = Rc::default();
    let sink = Rc::clone(&events);
    engine.add_listener(move |object: &dyn SpatialObject, _: &PickingInfo, selected: bool| {
        sink.borrow_mut().push((object.id(), selected));
    });
    events
}

/// An 800x600 engine with a top-down camera and a manual clock.
pub fn engine() -> (PickSelection, ManualClock) {
    let clock = ManualClock::new();
    let mut engine = PickSelection::with_clock(clock.clone());
    engine.set_screen_dimensions(800, 600);
    engine.set_camera(TopDown);
    (engine, clock)
}

/// Presses and releases the picker at a pick-space position, traversing once
/// while it is down.
pub fn click_at(
    engine: &mut PickSelection,
    clock: &ManualClock,
    candidates: &[&dyn SpatialObject],
    x: i32,
    y: i32,
) {
    clock.advance(1.0);
    engine.set_pick_position(IVec2::new(x, y));
    engine.click();
    engine.traverse(candidates, true).unwrap();
    engine.unclick();
    engine.traverse(candidates, true).unwrap();
}
