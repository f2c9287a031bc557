use egui::Id;

use super::index_map::apply_move;

/// One stable [`Id`] per logical item.
///
/// Item widgets are built under these ids, so anything `egui` keeps in memory for an item
/// (collapsing state, text edit cursor, animations) follows the item when the list is reordered.
#[derive(Clone, Debug)]
pub struct IdentityKeys {
    base: Id,
    next_serial: u64,
    keys: Vec<Id>,
}

impl IdentityKeys {
    pub fn new(base: Id) -> Self {
        Self {
            base,
            next_serial: 0,
            keys: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<Id> {
        self.keys.get(index).copied()
    }

    /// Grow or shrink the table to `len` items. New slots get fresh, never reused keys.
    pub fn sync_len(&mut self, len: usize) {
        if len <= self.keys.len() {
            self.keys.truncate(len);
            return;
        }
        while self.keys.len() < len {
            let serial = self.next_serial;
            self.next_serial = serial.wrapping_add(1);
            self.keys.push(self.base.with(("reorder_item", serial)));
        }
    }

    /// Move the key of `from` to `to`, mirroring the default reorder policy.
    ///
    /// For neighbouring slots this swaps the two keys; keys in between shift with their items.
    pub fn commit_move(&mut self, from: usize, to: usize) {
        apply_move(&mut self.keys, from, to);
    }
}
