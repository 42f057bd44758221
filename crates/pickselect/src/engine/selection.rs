//! Selection-set updates.

use pickselect_core::{ModeFlags, ObjectId, PickingInfo, Rect, Result, SpatialObject};

use super::PickSelection;

impl PickSelection {
    /// Presses or releases the picker.
    ///
    /// Pressing in click mode anchors the picking box and the toggle window
    /// at the current pointer position and time. Outside toggle mode it
    /// also clears the selection, so every click starts a fresh pick.
    /// Releasing leaves the selection alone.
    pub fn set_picker_active(&mut self, active: bool) {
        let was_active = self.flags.contains(ModeFlags::PICKER_ACTIVE);
        self.flags.set(ModeFlags::PICKER_ACTIVE, active);
        if !active || was_active {
            return;
        }

        self.pick_box = Rect::default();
        if self.flags.contains(ModeFlags::ON_CLICK) {
            self.pick_pos_begin = self.pick_pos;
            self.pick_time_begin = self.clock.elapsed_secs();
            log::debug!(
                "pick gesture started at {} (t={:.3})",
                self.pick_pos_begin,
                self.pick_time_begin
            );
            if !self.flags.contains(ModeFlags::TOGGLE_SELECTION) {
                self.clear();
            }
        }
    }

    /// Tests one object and updates the selection set accordingly.
    ///
    /// Returns the object's updated picking record. Normally called through
    /// [`PickSelection::traverse`]; when called directly, wrap the calls in
    /// [`PickSelection::begin`] / [`PickSelection::end`].
    pub fn perform_full_check(&mut self, object: &dyn SpatialObject) -> Result<&PickingInfo> {
        self.displaced.clear();
        self.update_selection(object)?;
        Ok(&*self.pool.obtain(object.id()))
    }

    pub(super) fn update_selection(&mut self, object: &dyn SpatialObject) -> Result<()> {
        let id = object.id();
        let result = self.evaluate(object)?;
        let now = self.clock.elapsed_secs();

        let toggle = self.flags.contains(ModeFlags::TOGGLE_SELECTION);
        let hover = self.flags.contains(ModeFlags::ON_HOVER);
        let group = self.flags.contains(ModeFlags::GROUP_SELECTION);
        let picker_active = self.flags.contains(ModeFlags::PICKER_ACTIVE);
        let should_unselect = self.should_unselect();
        let good = self.good_pick_result;

        let mut should_add = false;
        let mut should_remove = false;

        let info = self.pool.obtain(id);
        if good.is_picked() && result == good {
            if toggle && picker_active && !hover && info.timestamp < self.pick_time_begin {
                info.selected = !info.selected;
                should_add = info.selected;
                should_remove = !info.selected;
            } else if info.selected {
                // already selected, nothing changes
            } else if !toggle || hover {
                info.selected = true;
                should_add = true;
            }

            if !group || hover {
                // first hit wins; hover never holds more than one object
                self.flags.remove(ModeFlags::SHOULD_CONTINUE);
            }
        } else if should_unselect {
            info.selected = false;
            should_remove = true;
        }

        if should_add {
            if hover || !group {
                for other in self.selected.drain(..) {
                    if other == id {
                        continue;
                    }
                    if let Some(info) = self.pool.get_mut(other) {
                        info.selected = false;
                    }
                    self.displaced.push(other);
                }
                self.selected.push(id);
                self.stamp(id, now);
            } else if !self.selected.contains(&id) {
                self.selected.push(id);
                self.stamp(id, now);
            }
            log::debug!("{id} selected ({} total)", self.selected.len());
        }

        if should_remove {
            if let Some(index) = self.selected.iter().position(|&s| s == id) {
                self.selected.remove(index);
                if let Some(info) = self.pool.get_mut(id) {
                    info.selected = false;
                }
                self.stamp(id, now);
                log::debug!("{id} deselected ({} left)", self.selected.len());
            }
        }

        Ok(())
    }

    fn stamp(&mut self, id: ObjectId, now: f64) {
        if let Some(info) = self.pool.get_mut(id) {
            info.timestamp = now;
        }
    }

    /// Resets every tracked record and empties the selection set.
    ///
    /// Records stay allocated for the same ids. No listener is notified.
    pub fn clear(&mut self) {
        self.pool.reset_all();
        self.selected.clear();
        self.displaced.clear();
    }

    /// Forgets everything about `id`: its record goes back to the pool and it
    /// leaves the selection set.
    ///
    /// Call this when an object leaves the scene, before its id could ever
    /// name another object. Returns false if nothing was tracked for `id`.
    pub fn purge(&mut self, id: ObjectId) -> bool {
        let tracked = self.pool.release(id);
        let before = self.selected.len();
        self.selected.retain(|&s| s != id);
        let purged = tracked || self.selected.len() != before;
        if purged {
            log::debug!("{id} purged from pick selection");
        }
        purged
    }

    /// Purges every tracked id for which `keep` returns false.
    pub fn retain(&mut self, mut keep: impl FnMut(ObjectId) -> bool) {
        let stale: Vec<ObjectId> = self
            .pool
            .iter()
            .map(|(id, _)| id)
            .chain(self.selected.iter().copied())
            .filter(|&id| !keep(id))
            .collect();
        for id in stale {
            self.purge(id);
        }
    }
}
