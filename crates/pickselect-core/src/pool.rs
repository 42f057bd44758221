//! Pooled storage for picking records.
//!
//! Records live in a slot vector indexed through an id map. Releasing an id
//! resets its slot and puts it on a free list, so steady-state picking does
//! not allocate.

use std::collections::HashMap;

use crate::pick::PickingInfo;
use crate::spatial::ObjectId;

/// A pool slot: the id it is bound to, if any, and its record.
#[derive(Debug, Default)]
struct Slot {
    id: Option<ObjectId>,
    info: PickingInfo,
}

/// Arena of [`PickingInfo`] records keyed by object id.
#[derive(Debug, Default)]
pub struct PickingInfoPool {
    slots: Vec<Slot>,
    free: Vec<usize>,
    index: HashMap<ObjectId, usize>,
}

impl PickingInfoPool {
    /// Creates an empty pool.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a pool with room for `capacity` records.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free: Vec::new(),
            index: HashMap::with_capacity(capacity),
        }
    }

    /// Returns the record for `id`, allocating one on first use.
    ///
    /// A record whose back-reference was cleared by [`PickingInfoPool::reset_all`]
    /// is re-bound to `id`.
    pub fn obtain(&mut self, id: ObjectId) -> &mut PickingInfo {
        let slot = match self.index.get(&id) {
            Some(&slot) => slot,
            None => {
                let slot = if let Some(slot) = self.free.pop() {
                    slot
                } else {
                    self.slots.push(Slot::default());
                    self.slots.len() - 1
                };
                self.slots[slot].id = Some(id);
                self.index.insert(id, slot);
                slot
            }
        };
        let info = &mut self.slots[slot].info;
        if info.object.is_none() {
            info.object = Some(id);
        }
        info
    }

    /// Returns the record for `id`, if tracked.
    pub fn get(&self, id: ObjectId) -> Option<&PickingInfo> {
        self.index.get(&id).map(|&slot| &self.slots[slot].info)
    }

    /// Returns the mutable record for `id`, if tracked.
    pub fn get_mut(&mut self, id: ObjectId) -> Option<&mut PickingInfo> {
        self.index.get(&id).map(|&slot| &mut self.slots[slot].info)
    }

    /// Checks if `id` has a record.
    pub fn contains(&self, id: ObjectId) -> bool {
        self.index.contains_key(&id)
    }

    /// Resets the record for `id` and returns its slot to the free list.
    ///
    /// Returns false if `id` was not tracked.
    pub fn release(&mut self, id: ObjectId) -> bool {
        match self.index.remove(&id) {
            Some(slot) => {
                let entry = &mut self.slots[slot];
                entry.id = None;
                entry.info.reset();
                self.free.push(slot);
                log::debug!("released picking record of {id} (slot {slot})");
                true
            }
            None => false,
        }
    }

    /// Resets every tracked record while keeping the id bindings.
    pub fn reset_all(&mut self) {
        for entry in &mut self.slots {
            entry.info.reset();
        }
    }

    /// Returns an iterator over tracked ids and their records, in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (ObjectId, &PickingInfo)> {
        self.slots
            .iter()
            .filter_map(|entry| entry.id.map(|id| (id, &entry.info)))
    }

    /// Returns a mutable iterator over tracked ids and their records.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (ObjectId, &mut PickingInfo)> {
        self.slots
            .iter_mut()
            .filter_map(|entry| entry.id.map(|id| (id, &mut entry.info)))
    }

    /// Returns the number of tracked ids.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Returns true if no id is tracked.
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Returns the number of allocated slots, tracked or free.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }
}
