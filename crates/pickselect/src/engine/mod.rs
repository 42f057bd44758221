//! The pick-selection engine.

mod cascade;
mod frame;
mod selection;

use pickselect_core::{
    Clock, IVec2, ModeFlags, ObjectId, PickCamera, PickOptions, PickResult, PickingInfo,
    PickingInfoPool, PixelChecker, Ray, Rect, SystemClock, Vec3,
};

use crate::listener::{ListenerId, ListenerList, SelectionListener};

/// Pick-begin timestamp meaning "no gesture in progress".
const NO_PICK_BEGIN: f64 = -1.0;

/// Decides which objects are under the pointer and tracks the selection set.
///
/// The engine is driven once per frame through [`PickSelection::traverse`]
/// (or a manual [`PickSelection::begin`] / [`PickSelection::perform_full_check`]
/// / [`PickSelection::end`] bracket). Objects are only borrowed for the
/// duration of a call; the engine keeps their ids and a pooled
/// [`PickingInfo`] record per id.
pub struct PickSelection {
    flags: ModeFlags,
    camera: Option<Box<dyn PickCamera>>,
    pixel_checker: Option<Box<dyn PixelChecker>>,
    clock: Box<dyn Clock>,
    listeners: ListenerList,
    pool: PickingInfoPool,
    /// Selected ids in selection order.
    selected: Vec<ObjectId>,
    /// Ids knocked out of the selection by the last single-selection hit.
    displaced: Vec<ObjectId>,
    ray: Option<Ray>,
    pick_pos: IVec2,
    pick_pos_begin: IVec2,
    pick_time_begin: f64,
    pick_box: Rect,
    good_pick_result: PickResult,
    screen_width: u32,
    screen_height: u32,
}

impl Default for PickSelection {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for PickSelection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PickSelection")
            .field("flags", &self.flags)
            .field("has_camera", &self.camera.is_some())
            .field("has_pixel_checker", &self.pixel_checker.is_some())
            .field("listeners", &self.listeners)
            .field("selected", &self.selected)
            .field("pick_pos", &self.pick_pos)
            .field("pick_box", &self.pick_box)
            .field("good_pick_result", &self.good_pick_result)
            .finish_non_exhaustive()
    }
}

impl PickSelection {
    /// Creates an engine in click mode with the system clock.
    pub fn new() -> Self {
        Self::with_clock(SystemClock::new())
    }

    /// Creates an engine in click mode that stamps selections with `clock`.
    pub fn with_clock(clock: impl Clock + 'static) -> Self {
        Self {
            flags: ModeFlags::default(),
            camera: None,
            pixel_checker: None,
            clock: Box::new(clock),
            listeners: ListenerList::default(),
            pool: PickingInfoPool::with_capacity(64),
            selected: Vec::new(),
            displaced: Vec::new(),
            ray: None,
            pick_pos: IVec2::ZERO,
            pick_pos_begin: IVec2::ZERO,
            pick_time_begin: NO_PICK_BEGIN,
            pick_box: Rect::default(),
            good_pick_result: PickResult::NotPicked,
            screen_width: 0,
            screen_height: 0,
        }
    }

    /// Creates an engine configured from `options`.
    pub fn with_options(options: &PickOptions) -> Self {
        let mut engine = Self::new();
        engine.apply_options(options);
        engine
    }

    // ========================================================================
    // Configuration
    // ========================================================================

    /// Applies screen size and mode flags from `options`.
    pub fn apply_options(&mut self, options: &PickOptions) {
        self.set_screen_dimensions(options.screen_width, options.screen_height);
        let internal = self.flags & ModeFlags::INTERNAL;
        self.flags = options.mode_flags() | internal;
        log::debug!("pick selection options applied: {:?}", self.mode_flags());
    }

    /// Returns the current configuration as options.
    pub fn options(&self) -> PickOptions {
        let mut options = PickOptions {
            screen_width: self.screen_width,
            screen_height: self.screen_height,
            ..PickOptions::default()
        };
        options.set_mode_flags(self.mode_flags());
        options
    }

    /// Returns the configurable mode flags.
    pub fn mode_flags(&self) -> ModeFlags {
        self.flags & ModeFlags::PUBLIC
    }

    /// Restores the default mode (click, no extra checks).
    ///
    /// Only the public mode bits are reset. An open bracket and a held
    /// picker stay as they are, so a following [`PickSelection::end`] or
    /// [`PickSelection::unclick`] still pairs up.
    pub fn reset_flags(&mut self) {
        self.flags = ModeFlags::default() | (self.flags & ModeFlags::INTERNAL);
    }

    /// Sets the screen size in pixels.
    pub fn set_screen_dimensions(&mut self, width: u32, height: u32) {
        self.screen_width = width;
        self.screen_height = height;
    }

    /// Sets the screen width in pixels.
    pub fn set_screen_width(&mut self, width: u32) {
        self.screen_width = width;
    }

    /// Sets the screen height in pixels.
    pub fn set_screen_height(&mut self, height: u32) {
        self.screen_height = height;
    }

    /// Returns the screen size in pixels.
    pub fn screen_dimensions(&self) -> (u32, u32) {
        (self.screen_width, self.screen_height)
    }

    /// Attaches the camera used for pick rays and projection.
    pub fn set_camera(&mut self, camera: impl PickCamera) {
        self.camera = Some(Box::new(camera));
    }

    /// Detaches the camera. The current ray is dropped with it.
    pub fn clear_camera(&mut self) {
        self.camera = None;
        self.ray = None;
    }

    /// Returns the attached camera.
    pub fn camera(&self) -> Option<&dyn PickCamera> {
        self.camera.as_deref()
    }

    /// Returns the attached camera as its concrete type.
    pub fn camera_mut<T: PickCamera>(&mut self) -> Option<&mut T> {
        self.camera.as_mut()?.as_any_mut().downcast_mut::<T>()
    }

    /// Attaches the pixel checker used to confirm hits against the pick pass.
    pub fn set_pixel_checker(&mut self, checker: impl PixelChecker) {
        self.pixel_checker = Some(Box::new(checker));
    }

    /// Detaches the pixel checker. Pixel checks are skipped until a new one
    /// is attached.
    pub fn clear_pixel_checker(&mut self) {
        self.pixel_checker = None;
    }

    /// Returns the attached pixel checker as its concrete type.
    pub fn pixel_checker_mut<T: PixelChecker>(&mut self) -> Option<&mut T> {
        self.pixel_checker.as_mut()?.as_any_mut().downcast_mut::<T>()
    }

    /// Returns true if a pixel checker is attached.
    pub fn has_pixel_checker(&self) -> bool {
        self.pixel_checker.is_some()
    }

    /// Registers a listener. Listeners are notified in registration order.
    pub fn add_listener(&mut self, listener: impl SelectionListener + 'static) -> ListenerId {
        self.listeners.add(Box::new(listener))
    }

    /// Removes a listener. Returns false if it was not registered.
    pub fn remove_listener(&mut self, id: ListenerId) -> bool {
        self.listeners.remove(id)
    }

    /// Returns the number of registered listeners.
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    // ========================================================================
    // Mode flags
    // ========================================================================

    /// Enables or disables click selection. Enabling it disables hover.
    pub fn set_on_click(&mut self, enabled: bool) {
        self.flags.set(ModeFlags::ON_CLICK, enabled);
        if enabled {
            self.flags.remove(ModeFlags::ON_HOVER);
        }
    }

    /// Returns true in click selection mode.
    pub fn is_on_click(&self) -> bool {
        self.flags.contains(ModeFlags::ON_CLICK)
    }

    /// Enables or disables hover selection. Enabling it disables click.
    pub fn set_on_hover(&mut self, enabled: bool) {
        self.flags.set(ModeFlags::ON_HOVER, enabled);
        if enabled {
            self.flags.remove(ModeFlags::ON_CLICK);
        }
    }

    /// Returns true in hover selection mode.
    pub fn is_on_hover(&self) -> bool {
        self.flags.contains(ModeFlags::ON_HOVER)
    }

    /// Requires a ray hit on the world axis-aligned box.
    pub fn set_check_aabb(&mut self, enabled: bool) {
        self.flags.set(ModeFlags::CHECK_AABB, enabled);
    }

    /// Returns true if the axis-aligned box check is enabled.
    pub fn is_check_aabb(&self) -> bool {
        self.flags.contains(ModeFlags::CHECK_AABB)
    }

    /// Requires the pointer to be over the projected on-screen box.
    pub fn set_check_on_screen_box(&mut self, enabled: bool) {
        self.flags.set(ModeFlags::CHECK_ON_SCREEN_BOX, enabled);
    }

    /// Returns true if the on-screen box check is enabled.
    pub fn is_check_on_screen_box(&self) -> bool {
        self.flags.contains(ModeFlags::CHECK_ON_SCREEN_BOX)
    }

    /// Requires a ray hit on the triangles of the oriented box.
    pub fn set_check_obb_triangles(&mut self, enabled: bool) {
        self.flags.set(ModeFlags::CHECK_OBB_TRIANGLES, enabled);
    }

    /// Returns true if the oriented box triangle check is enabled.
    pub fn is_check_obb_triangles(&self) -> bool {
        self.flags.contains(ModeFlags::CHECK_OBB_TRIANGLES)
    }

    /// Requires confirmation from the pick pass pixels.
    ///
    /// Without an attached pixel checker this has no effect.
    pub fn set_check_fbo_pixels(&mut self, enabled: bool) {
        self.flags.set(ModeFlags::CHECK_FBO_PIXELS, enabled);
    }

    /// Returns true if the pixel check is enabled.
    pub fn is_check_fbo_pixels(&self) -> bool {
        self.flags.contains(ModeFlags::CHECK_FBO_PIXELS)
    }

    /// Allows several objects to be selected at once.
    pub fn set_group_selection(&mut self, enabled: bool) {
        self.flags.set(ModeFlags::GROUP_SELECTION, enabled);
    }

    /// Returns true in group selection mode.
    pub fn is_group_selection(&self) -> bool {
        self.flags.contains(ModeFlags::GROUP_SELECTION)
    }

    /// Makes a second pick of a selected object deselect it.
    pub fn set_toggle_selection(&mut self, enabled: bool) {
        self.flags.set(ModeFlags::TOGGLE_SELECTION, enabled);
    }

    /// Returns true in toggle selection mode.
    pub fn is_toggle_selection(&self) -> bool {
        self.flags.contains(ModeFlags::TOGGLE_SELECTION)
    }

    /// Selects with a rectangle dragged from the click position.
    pub fn set_use_picking_box(&mut self, enabled: bool) {
        self.flags.set(ModeFlags::USE_PICKING_BOX, enabled);
    }

    /// Returns true if the dragged picking box is used.
    pub fn is_use_picking_box(&self) -> bool {
        self.flags.contains(ModeFlags::USE_PICKING_BOX)
    }

    /// Returns true while the picker (button, touch) is down.
    pub fn is_picker_active(&self) -> bool {
        self.flags.contains(ModeFlags::PICKER_ACTIVE)
    }

    /// Returns true if traversal should keep visiting objects.
    pub fn should_continue(&self) -> bool {
        self.flags.contains(ModeFlags::SHOULD_CONTINUE)
    }

    fn should_unselect(&self) -> bool {
        self.flags.contains(ModeFlags::SHOULD_UNSELECT)
    }

    /// Returns true if pixel confirmation takes part in this frame.
    fn pixel_check_active(&self) -> bool {
        self.flags.contains(ModeFlags::CHECK_FBO_PIXELS) && self.pixel_checker.is_some()
    }

    // ========================================================================
    // Pointer
    // ========================================================================

    /// Reports the pointer position in window coordinates (top-left origin).
    ///
    /// The position is stored flipped into pick space, so set the screen
    /// height first.
    pub fn set_pointer(&mut self, x: i32, y: i32) {
        let height = i32::try_from(self.screen_height).unwrap_or(i32::MAX);
        self.pick_pos = IVec2::new(x, height.saturating_sub(y));
    }

    /// Reports the pointer position directly in pick space (bottom-left origin).
    pub fn set_pick_position(&mut self, position: IVec2) {
        self.pick_pos = position;
    }

    /// Presses the picker.
    pub fn click(&mut self) {
        self.set_picker_active(true);
    }

    /// Releases the picker.
    pub fn unclick(&mut self) {
        self.set_picker_active(false);
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// Returns the selected ids in selection order.
    pub fn selected_objects(&self) -> &[ObjectId] {
        &self.selected
    }

    /// Returns the first selected id.
    pub fn selected_object(&self) -> Option<ObjectId> {
        self.selected.first().copied()
    }

    /// Returns the record of the `index`-th selected object.
    pub fn selected_info(&self, index: usize) -> Option<&PickingInfo> {
        self.pool.get(*self.selected.get(index)?)
    }

    /// Returns the record tracked for `id`.
    pub fn picking_info(&self, id: ObjectId) -> Option<&PickingInfo> {
        self.pool.get(id)
    }

    /// Returns every tracked id and its record.
    pub fn picking_infos(&self) -> impl Iterator<Item = (ObjectId, &PickingInfo)> {
        self.pool.iter()
    }

    /// Returns the intersection point of the first selected object.
    pub fn intersection(&self) -> Option<Vec3> {
        self.selected_info(0).map(|info| info.intersection)
    }

    /// Returns true if anything is selected.
    pub fn has_picked(&self) -> bool {
        !self.selected.is_empty()
    }

    /// Returns the number of selected objects.
    pub fn count(&self) -> usize {
        self.selected.len()
    }

    /// Returns the pick ray of the current frame.
    pub fn ray(&self) -> Option<Ray> {
        self.ray
    }

    /// Returns the picking box in pick space.
    pub fn pick_box(&self) -> Rect {
        self.pick_box
    }

    /// Returns the pointer position in pick space.
    pub fn pick_position(&self) -> IVec2 {
        self.pick_pos
    }

    /// Returns the tier a result must reach to count as a hit this frame.
    pub fn good_pick_result(&self) -> PickResult {
        self.good_pick_result
    }
}
