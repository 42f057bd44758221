//! Per-frame begin/traverse/end protocol.

use pickselect_core::{IVec2, ModeFlags, PickError, PickResult, Rect, Result, SpatialObject};

use super::{PickSelection, NO_PICK_BEGIN};

impl PickSelection {
    /// Opens a frame bracket.
    ///
    /// Returns false, doing nothing, if a bracket is already open. Otherwise
    /// recomputes the picking box, decides whether this frame picks at all
    /// and, if so, casts the pick ray and sets the good-pick threshold.
    pub fn begin(&mut self) -> bool {
        if self.flags.contains(ModeFlags::BEGAN) {
            return false;
        }
        self.flags.insert(ModeFlags::BEGAN);
        self.flags
            .remove(ModeFlags::SHOULD_CONTINUE | ModeFlags::SHOULD_UNSELECT);
        self.good_pick_result = PickResult::NotPicked;
        self.refresh_pick_box();

        let toggle = self.flags.contains(ModeFlags::TOGGLE_SELECTION);
        let group = self.flags.contains(ModeFlags::GROUP_SELECTION);
        let picking_box = self.flags.contains(ModeFlags::USE_PICKING_BOX);

        if self.flags.contains(ModeFlags::ON_CLICK) {
            self.flags
                .set(ModeFlags::SHOULD_CONTINUE, self.is_picker_active());
            // a miss clears the selection unless toggling or grouping keeps it
            if (!toggle && !group) || (picking_box && !toggle) {
                self.flags.insert(ModeFlags::SHOULD_UNSELECT);
            }
        } else if self.flags.contains(ModeFlags::ON_HOVER) {
            self.flags
                .insert(ModeFlags::SHOULD_CONTINUE | ModeFlags::SHOULD_UNSELECT);
        }

        if self.should_continue() {
            self.update_ray();
            self.good_pick_result = self.good_pick_threshold();
        }
        true
    }

    /// Closes a frame bracket.
    ///
    /// Returns false, doing nothing, if no bracket is open. In click mode a
    /// released picker ends the toggle window, so the next click starts a
    /// fresh one.
    pub fn end(&mut self) -> bool {
        if !self.flags.contains(ModeFlags::BEGAN) {
            return false;
        }
        self.flags.remove(ModeFlags::BEGAN);
        if self.flags.contains(ModeFlags::ON_CLICK) && !self.is_picker_active() {
            self.pick_time_begin = NO_PICK_BEGIN;
        }
        true
    }

    /// Runs one picking frame over `candidates`, in order.
    ///
    /// Invisible candidates are skipped. With `notify_listeners`, listeners
    /// hear about every selection change observed during the traversal:
    /// candidates knocked out of the selection by a single-selection hit are
    /// reported before the hit itself.
    ///
    /// Returns `Ok(false)` if a bracket was already open or nothing is to be
    /// picked this frame, otherwise the result of [`PickSelection::end`].
    /// Fails with [`PickError::MissingCamera`] if picking is due but no
    /// camera is attached; the bracket is closed either way.
    pub fn traverse(
        &mut self,
        candidates: &[&dyn SpatialObject],
        notify_listeners: bool,
    ) -> Result<bool> {
        if !self.begin() {
            return Ok(false);
        }
        if !self.should_continue() {
            self.end();
            return Ok(false);
        }

        let visited = self.visit(candidates, notify_listeners);
        let ended = self.end();
        visited.map(|()| ended)
    }

    fn visit(&mut self, candidates: &[&dyn SpatialObject], notify_listeners: bool) -> Result<()> {
        if self.camera.is_none() {
            return Err(PickError::MissingCamera);
        }

        for &object in candidates {
            if !object.is_visible() {
                continue;
            }
            let id = object.id();
            let was_selected = self.pool.get(id).is_some_and(|info| info.selected);

            self.displaced.clear();
            self.update_selection(object)?;

            if notify_listeners {
                for &other in &self.displaced {
                    let Some(&displaced) = candidates.iter().find(|c| c.id() == other) else {
                        continue;
                    };
                    if let Some(info) = self.pool.get(other) {
                        self.listeners.notify(displaced, info, false);
                    }
                }
                if let Some(info) = self.pool.get(id) {
                    if info.selected != was_selected {
                        self.listeners.notify(object, info, info.selected);
                    }
                }
            }

            if !self.should_continue() {
                break;
            }
        }
        Ok(())
    }

    /// Recomputes the pick ray from the camera and the pointer.
    pub fn update_ray(&mut self) {
        self.ray = self
            .camera
            .as_deref()
            .and_then(|camera| camera.pick_ray(self.pick_pos.as_vec2()));
        if self.ray.is_none() {
            log::debug!("no pick ray for pointer at {}", self.pick_pos);
        }
    }

    /// Recomputes the picking box from the drag anchor to the pointer,
    /// clamped to the screen. Outside picking-box mode it is the 1x1
    /// rectangle under the pointer.
    pub fn refresh_pick_box(&mut self) {
        self.pick_pos = self.pick_pos.max(IVec2::ZERO);

        if !self.flags.contains(ModeFlags::USE_PICKING_BOX) {
            self.pick_box = Rect::pixel(self.pick_pos.x, self.pick_pos.y);
            return;
        }

        let dragged = Rect::from_corners(self.pick_pos_begin, self.pick_pos);
        self.pick_box = if self.screen_width > 0 && self.screen_height > 0 {
            let screen = Rect::new(
                0,
                0,
                i32::try_from(self.screen_width).unwrap_or(i32::MAX),
                i32::try_from(self.screen_height).unwrap_or(i32::MAX),
            );
            dragged.intersection(&screen)
        } else {
            dragged
        };
    }
}
