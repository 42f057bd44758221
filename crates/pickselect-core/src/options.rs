//! Configuration options for pick selection.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::flags::ModeFlags;

/// What drives selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum SelectionTrigger {
    /// Select while the picker (mouse button, touch) is active.
    #[default]
    Click,
    /// Select whatever is under the pointer.
    Hover,
}

/// Serializable configuration of a pick-selection engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PickOptions {
    /// Screen width in pixels.
    pub screen_width: u32,

    /// Screen height in pixels.
    pub screen_height: u32,

    /// Click or hover selection.
    pub trigger: SelectionTrigger,

    /// Require a ray hit on the world axis-aligned box.
    pub check_aabb: bool,

    /// Require overlap with the projected on-screen box.
    pub check_on_screen_box: bool,

    /// Require a ray hit on the oriented box triangles.
    pub check_obb_triangles: bool,

    /// Require confirmation from the pick pass pixels.
    pub check_fbo_pixels: bool,

    /// Allow multiple selected objects.
    pub group_selection: bool,

    /// Second pick of a selected object deselects it.
    pub toggle_selection: bool,

    /// Use a dragged rectangle instead of a single point.
    pub use_picking_box: bool,
}

impl Default for PickOptions {
    fn default() -> Self {
        Self {
            screen_width: 0,
            screen_height: 0,
            trigger: SelectionTrigger::Click,
            check_aabb: false,
            check_on_screen_box: false,
            check_obb_triangles: false,
            check_fbo_pixels: false,
            group_selection: false,
            toggle_selection: false,
            use_picking_box: false,
        }
    }
}

impl PickOptions {
    /// Parses options from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serializes options to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Returns the public mode flags these options describe.
    #[must_use]
    pub fn mode_flags(&self) -> ModeFlags {
        let mut flags = match self.trigger {
            SelectionTrigger::Click => ModeFlags::ON_CLICK,
            SelectionTrigger::Hover => ModeFlags::ON_HOVER,
        };
        flags.set(ModeFlags::CHECK_AABB, self.check_aabb);
        flags.set(ModeFlags::CHECK_ON_SCREEN_BOX, self.check_on_screen_box);
        flags.set(ModeFlags::CHECK_OBB_TRIANGLES, self.check_obb_triangles);
        flags.set(ModeFlags::CHECK_FBO_PIXELS, self.check_fbo_pixels);
        flags.set(ModeFlags::GROUP_SELECTION, self.group_selection);
        flags.set(ModeFlags::TOGGLE_SELECTION, self.toggle_selection);
        flags.set(ModeFlags::USE_PICKING_BOX, self.use_picking_box);
        flags
    }

    /// Fills the mode fields from flags, leaving the screen size untouched.
    ///
    /// Flags with neither trigger set map to [`SelectionTrigger::Click`].
    pub fn set_mode_flags(&mut self, flags: ModeFlags) {
        self.trigger = if flags.contains(ModeFlags::ON_HOVER) {
            SelectionTrigger::Hover
        } else {
            SelectionTrigger::Click
        };
        self.check_aabb = flags.contains(ModeFlags::CHECK_AABB);
        self.check_on_screen_box = flags.contains(ModeFlags::CHECK_ON_SCREEN_BOX);
        self.check_obb_triangles = flags.contains(ModeFlags::CHECK_OBB_TRIANGLES);
        self.check_fbo_pixels = flags.contains(ModeFlags::CHECK_FBO_PIXELS);
        self.group_selection = flags.contains(ModeFlags::GROUP_SELECTION);
        self.toggle_selection = flags.contains(ModeFlags::TOGGLE_SELECTION);
        self.use_picking_box = flags.contains(ModeFlags::USE_PICKING_BOX);
    }
}
