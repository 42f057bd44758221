//! A minimal scene of pickable objects.
//!
//! [`Scene`] owns [`SceneObject`]s and hands them to the engine as
//! candidates. Ids are assigned on insertion, increase monotonically and are
//! never reused, so a removed object's picking state can never leak onto a
//! newcomer. Removing an object should still be followed by
//! [`crate::PickSelection::purge`] to release its record.

use pickselect_core::{
    BoundingBox, BoundingSphere, Mat4, ObjectId, PickError, Quat, Result, SpatialObject, Vec3,
};

/// A named object with a model-space box and a world transform.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneObject {
    id: ObjectId,
    name: String,
    original_box: BoundingBox,
    translation: Vec3,
    rotation: Quat,
    scale: Vec3,
    visible: bool,
}

impl SceneObject {
    /// Creates a visible object at the origin with the given model-space box.
    ///
    /// The id stays unassigned (zero) until the object is added to a [`Scene`].
    pub fn new(name: impl Into<String>, original_box: BoundingBox) -> Self {
        Self {
            id: ObjectId::default(),
            name: name.into(),
            original_box,
            translation: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
            visible: true,
        }
    }

    /// Creates a visible cube with edge length `size` centered at the origin.
    pub fn cube(name: impl Into<String>, size: f32) -> Self {
        Self::new(
            name,
            BoundingBox::from_center_half_extents(Vec3::ZERO, Vec3::splat(size * 0.5)),
        )
    }

    /// Sets the position (builder style).
    #[must_use]
    pub fn with_position(mut self, position: Vec3) -> Self {
        self.translation = position;
        self
    }

    /// Sets the rotation (builder style).
    #[must_use]
    pub fn with_rotation(mut self, rotation: Quat) -> Self {
        self.rotation = rotation.normalize();
        self
    }

    /// Sets the scale (builder style).
    #[must_use]
    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    /// Returns the object's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Renames the object.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Moves the object to `position`.
    pub fn set_position(&mut self, position: Vec3) {
        self.translation = position;
    }

    /// Moves the object by `offset`.
    pub fn translate(&mut self, offset: Vec3) {
        self.translation += offset;
    }

    /// Returns the rotation.
    pub fn rotation(&self) -> Quat {
        self.rotation
    }

    /// Replaces the rotation.
    pub fn set_rotation(&mut self, rotation: Quat) {
        self.rotation = rotation.normalize();
    }

    /// Applies an extra rotation after the current one.
    pub fn rotate(&mut self, rotation: Quat) {
        self.rotation = (rotation * self.rotation).normalize();
    }

    /// Replaces the scale.
    pub fn set_scale(&mut self, scale: Vec3) {
        self.scale = scale;
    }

    /// Shows or hides the object. Hidden objects are skipped by traversal.
    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }
}

impl SpatialObject for SceneObject {
    fn id(&self) -> ObjectId {
        self.id
    }

    fn bounding_sphere(&self) -> BoundingSphere {
        let center = self.transform().transform_point3(self.original_box.center());
        let radius = (self.scale * self.original_box.half_extents()).length();
        BoundingSphere::new(center, radius)
    }

    fn original_bounding_box(&self) -> BoundingBox {
        self.original_box
    }

    fn transform(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.translation)
    }

    fn position(&self) -> Vec3 {
        self.translation
    }

    fn scale(&self) -> Vec3 {
        self.scale
    }

    fn is_visible(&self) -> bool {
        self.visible
    }
}

/// Ordered collection of scene objects with never-reused ids.
#[derive(Debug, Default)]
pub struct Scene {
    objects: Vec<SceneObject>,
    next_id: u32,
}

impl Scene {
    /// Creates an empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an object, assigning it a fresh id, and returns that id.
    pub fn add(&mut self, mut object: SceneObject) -> ObjectId {
        let id = ObjectId(self.next_id);
        self.next_id += 1;
        object.id = id;
        log::debug!("scene: added '{}' as {id}", object.name);
        self.objects.push(object);
        id
    }

    /// Gets an object by id.
    pub fn get(&self, id: ObjectId) -> Option<&SceneObject> {
        self.objects.iter().find(|o| o.id == id)
    }

    /// Gets a mutable object by id.
    pub fn get_mut(&mut self, id: ObjectId) -> Option<&mut SceneObject> {
        self.objects.iter_mut().find(|o| o.id == id)
    }

    /// Finds the first object with the given name.
    pub fn find(&self, name: &str) -> Option<&SceneObject> {
        self.objects.iter().find(|o| o.name == name)
    }

    /// Checks if an object with the given id exists.
    pub fn contains(&self, id: ObjectId) -> bool {
        self.get(id).is_some()
    }

    /// Removes an object by id. Remaining ids are left untouched.
    pub fn remove(&mut self, id: ObjectId) -> Result<SceneObject> {
        let index = self
            .objects
            .iter()
            .position(|o| o.id == id)
            .ok_or(PickError::ObjectNotFound(id))?;
        let object = self.objects.remove(index);
        log::debug!("scene: removed '{}' ({id})", object.name);
        Ok(object)
    }

    /// Removes the first object with the given name.
    pub fn remove_by_name(&mut self, name: &str) -> Option<SceneObject> {
        let index = self.objects.iter().position(|o| o.name == name)?;
        Some(self.objects.remove(index))
    }

    /// Removes all objects. Ids keep counting from where they were.
    pub fn clear(&mut self) {
        self.objects.clear();
    }

    /// Returns an iterator over objects in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &SceneObject> {
        self.objects.iter()
    }

    /// Returns a mutable iterator over objects in insertion order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut SceneObject> {
        self.objects.iter_mut()
    }

    /// Returns every object as a picking candidate, in insertion order.
    pub fn candidates(&self) -> Vec<&dyn SpatialObject> {
        self.objects
            .iter()
            .map(|o| o as &dyn SpatialObject)
            .collect()
    }

    /// Returns the world-space box enclosing every visible object, or an
    /// empty box if nothing is visible.
    pub fn bounds(&self) -> BoundingBox {
        let mut bounds = BoundingBox::empty();
        for object in self.objects.iter().filter(|o| o.visible) {
            for corner in object.bounding_box().corners() {
                bounds.extend(corner);
            }
        }
        bounds
    }

    /// Returns the number of objects.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Returns true if the scene has no objects.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}
