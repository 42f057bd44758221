//! Selection listeners.

use pickselect_core::{PickingInfo, SpatialObject};

/// Receives selection transitions observed during a traversal.
pub trait SelectionListener {
    /// Called when `object` became selected (`selected == true`) or was
    /// deselected (`selected == false`).
    fn selection_changed(&mut self, object: &dyn SpatialObject, info: &PickingInfo, selected: bool);
}

impl<F> SelectionListener for F
where
    F: FnMut(&dyn SpatialObject, &PickingInfo, bool),
{
    fn selection_changed(&mut self, object: &dyn SpatialObject, info: &PickingInfo, selected: bool) {
        self(object, info, selected);
    }
}

/// Handle returned by [`crate::PickSelection::add_listener`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(pub(crate) u64);

/// Listeners in registration order.
#[derive(Default)]
pub(crate) struct ListenerList {
    entries: Vec<(ListenerId, Box<dyn SelectionListener>)>,
    next_id: u64,
}

impl ListenerList {
    pub(crate) fn add(&mut self, listener: Box<dyn SelectionListener>) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, listener));
        id
    }

    pub(crate) fn remove(&mut self, id: ListenerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry, _)| *entry != id);
        self.entries.len() != before
    }

    pub(crate) fn notify(&mut self, object: &dyn SpatialObject, info: &PickingInfo, selected: bool) {
        for (_, listener) in &mut self.entries {
            listener.selection_changed(object, info, selected);
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }
}

impl std::fmt::Debug for ListenerList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListenerList")
            .field("len", &self.entries.len())
            .finish()
    }
}
