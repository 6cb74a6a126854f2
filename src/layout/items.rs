use std::collections::BTreeMap;

use crate::foundation::core::{ItemId, Placement};

/// One grid-placed element.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Item {
    /// Stable external identity.
    pub id: ItemId,
    /// Assigned column, `None` until placed.
    pub column: Option<usize>,
    /// Vertical offset in layout units.
    pub top: f64,
    /// Width assigned from the column width.
    pub width: f64,
    /// Last height reported by the size provider; may be stale.
    pub measured_height: Option<f64>,
    /// Set when the rendered size changed and the item wants a partial reflow.
    pub needs_relayout: bool,
    #[serde(skip)]
    pub(crate) destroyed: bool,
}

impl Item {
    /// Unplaced, unmeasured item.
    pub fn new(id: ItemId) -> Self {
        Self {
            id,
            column: None,
            top: 0.0,
            width: 0.0,
            measured_height: None,
            needs_relayout: false,
            destroyed: false,
        }
    }

    /// Seed the measured height, e.g. when the collaborator already rendered the item.
    pub fn with_height(mut self, height: f64) -> Self {
        self.measured_height = Some(height);
        self
    }

    /// Whether the collaborator has destroyed this item.
    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    /// Current geometry, if the item has been placed.
    pub fn placement(&self) -> Option<Placement> {
        self.column.map(|column| Placement {
            column,
            top: self.top,
            width: self.width,
        })
    }
}

/// Item records plus the insertion-ordered list that partial reflow walks.
///
/// An item can be known (present in `records`) without being listed; that only happens
/// between "removed for re-placement" and the matching placement within one reflow pass.
#[derive(Clone, Debug, Default)]
pub(crate) struct ItemList {
    order: Vec<ItemId>,
    records: BTreeMap<ItemId, Item>,
}

impl ItemList {
    pub(crate) fn len(&self) -> usize {
        self.order.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub(crate) fn get(&self, id: ItemId) -> Option<&Item> {
        self.records.get(&id)
    }

    pub(crate) fn get_mut(&mut self, id: ItemId) -> Option<&mut Item> {
        self.records.get_mut(&id)
    }

    pub(crate) fn contains_record(&self, id: ItemId) -> bool {
        self.records.contains_key(&id)
    }

    pub(crate) fn position(&self, id: ItemId) -> Option<usize> {
        self.order.iter().position(|&other| other == id)
    }

    /// Register a record without listing it; placement lists it.
    pub(crate) fn insert_record(&mut self, item: Item) {
        self.records.insert(item.id, item);
    }

    /// Append to the ordered list. The id must not be listed already.
    pub(crate) fn push(&mut self, id: ItemId) {
        debug_assert!(!self.order.contains(&id), "{id} listed twice");
        self.order.push(id);
    }

    /// Drop an item from both the list and the records, marking the removed record destroyed.
    pub(crate) fn remove(&mut self, id: ItemId) -> Option<(usize, Item)> {
        let mut item = self.records.remove(&id)?;
        item.destroyed = true;
        let pos = self.position(id);
        if let Some(pos) = pos {
            self.order.remove(pos);
        }
        Some((pos.unwrap_or(self.order.len()), item))
    }

    /// Empty the list, returning its previous contents in order. Records are kept.
    pub(crate) fn take_order(&mut self) -> Vec<ItemId> {
        std::mem::take(&mut self.order)
    }

    /// Remove `[start, len)` from the list, returning it in order. Records are kept.
    pub(crate) fn split_off(&mut self, start: usize) -> Vec<ItemId> {
        if start >= self.order.len() {
            return Vec::new();
        }
        self.order.split_off(start)
    }

    /// First listed item with `needs_relayout` set.
    pub(crate) fn first_flagged(&self) -> Option<usize> {
        self.order.iter().position(|id| {
            self.records
                .get(id)
                .is_some_and(|item| item.needs_relayout)
        })
    }

    /// Listed items in order.
    pub(crate) fn iter(&self) -> impl Iterator<Item = &Item> + '_ {
        self.order.iter().filter_map(|id| self.records.get(id))
    }

    pub(crate) fn ids(&self) -> &[ItemId] {
        &self.order
    }

    pub(crate) fn records_mut(&mut self) -> impl Iterator<Item = &mut Item> + '_ {
        self.records.values_mut()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/items.rs"]
mod tests;
