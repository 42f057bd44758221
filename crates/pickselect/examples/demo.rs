#![allow(clippy::cast_possible_truncation)]
//! Headless pick-selection walkthrough.
//!
//! Builds a small scene, renders a software pick pass into a
//! [`PickPixelBuffer`] and drives the engine through click, toggle, drag and
//! hover gestures. Run with `RUST_LOG=debug` to see the engine's log output.

use pickselect::*;

const WIDTH: u32 = 800;
const HEIGHT: u32 = 600;

/// Draws every visible object's projected box into the pick buffer, far to
/// near, so nearer objects overwrite farther ones.
fn render_pick_pass(scene: &Scene, camera: &Camera, buffer: &mut PickPixelBuffer) {
    buffer.clear();
    let mut objects: Vec<&SceneObject> = scene.iter().filter(|o| o.is_visible()).collect();
    objects.sort_by(|a, b| {
        let da = a.position().distance_squared(camera.position);
        let db = b.position().distance_squared(camera.position);
        db.total_cmp(&da)
    });
    for object in objects {
        let corners = object
            .original_bounding_box()
            .transformed_corners(&object.transform());
        let (min, max) = corners.iter().fold(
            (Vec2::splat(f32::INFINITY), Vec2::splat(f32::NEG_INFINITY)),
            |(min, max), &corner| {
                let screen = camera.world_to_screen(corner).truncate();
                (min.min(screen), max.max(screen))
            },
        );
        buffer.fill_rect(Rect::enclosing(min, max), encode_object_color(object.id()));
    }
}

/// Pick-space position of an object's center.
fn screen_position(camera: &Camera, scene: &Scene, id: ObjectId) -> IVec2 {
    scene.get(id).map_or(IVec2::ZERO, |object| {
        let screen = camera.world_to_screen(object.position());
        IVec2::new(screen.x as i32, screen.y as i32)
    })
}

fn print_selection(label: &str, picking: &PickSelection, scene: &Scene) {
    let names: Vec<&str> = picking
        .selected_objects()
        .iter()
        .filter_map(|&id| scene.get(id).map(SceneObject::name))
        .collect();
    println!("{label:<28} selected: {names:?}");
}

fn main() -> Result<()> {
    env_logger::init();

    let mut scene = Scene::new();
    let left = scene.add(SceneObject::cube("left", 1.0).with_position(Vec3::new(-2.0, 0.0, 0.0)));
    let middle = scene.add(
        SceneObject::cube("middle", 1.0)
            .with_rotation(Quat::from_rotation_y(std::f32::consts::FRAC_PI_4)),
    );
    let right = scene.add(SceneObject::cube("right", 1.0).with_position(Vec3::new(2.0, 0.0, 0.0)));
    // Sits in front of the middle cube and hides most of it
    let front = scene.add(
        SceneObject::cube("front", 0.6)
            .with_position(Vec3::new(0.0, 0.0, 1.5))
            .with_scale(Vec3::splat(1.2)),
    );

    let mut camera = Camera::new(WIDTH, HEIGHT);
    camera.frame(&scene.bounds());

    let mut picking = PickSelection::new();
    picking.set_screen_dimensions(WIDTH, HEIGHT);
    picking.set_camera(camera.clone());
    picking.set_pixel_checker(PickPixelBuffer::new(WIDTH, HEIGHT)?);
    picking.set_check_fbo_pixels(true);
    picking.add_listener(|object: &dyn SpatialObject, info: &PickingInfo, selected: bool| {
        let state = if selected { "selected" } else { "deselected" };
        println!("  {} {state} ({})", object.id(), info.result.name());
    });

    if let Some(buffer) = picking.pixel_checker_mut::<PickPixelBuffer>() {
        render_pick_pass(&scene, &camera, buffer);
    }

    // Plain click on the front cube
    picking.set_pick_position(screen_position(&camera, &scene, front));
    picking.click();
    picking.traverse(&scene.candidates(), true)?;
    picking.unclick();
    picking.traverse(&scene.candidates(), true)?;
    print_selection("click front", &picking, &scene);

    // Toggle group: add the side cubes, then drop the left one again
    picking.set_group_selection(true);
    picking.set_toggle_selection(true);
    for (label, id) in [("toggle left", left), ("toggle right", right), ("toggle left again", left)] {
        picking.set_pick_position(screen_position(&camera, &scene, id));
        picking.click();
        picking.traverse(&scene.candidates(), true)?;
        picking.unclick();
        picking.traverse(&scene.candidates(), true)?;
        print_selection(label, &picking, &scene);
    }

    // Drag a box across the whole row; the pick pass hides most of the
    // middle cube, but its edges still show
    picking.set_toggle_selection(false);
    picking.set_use_picking_box(true);
    picking.set_pointer(50, 200);
    picking.click();
    picking.set_pointer(750, 400);
    picking.traverse(&scene.candidates(), true)?;
    picking.unclick();
    print_selection("drag box", &picking, &scene);
    if let Some(info) = picking.picking_info(middle) {
        println!("  middle on screen at {:?}", info.on_screen);
    }

    // Hover sweep from left to right
    picking.set_use_picking_box(false);
    picking.set_group_selection(false);
    picking.set_on_hover(true);
    for id in [left, front, right] {
        picking.set_pick_position(screen_position(&camera, &scene, id));
        picking.traverse(&scene.candidates(), true)?;
    }
    print_selection("hover sweep", &picking, &scene);

    // Removing an object also forgets its selection state
    scene.remove(right)?;
    picking.purge(right);
    print_selection("after removing right", &picking, &scene);

    Ok(())
}
