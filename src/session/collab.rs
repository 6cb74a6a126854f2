use std::collections::BTreeMap;

use crate::foundation::core::{ItemId, Placement};

/// Supplies rendered sizes. Called only during a session's measurement phase.
pub trait SizeProvider {
    /// Rendered height of `id` laid out at `width`; `None` when not rendered yet.
    fn measure(&self, id: ItemId, width: f64) -> Option<f64>;

    /// Measured width of the grid container.
    fn container_width(&self) -> f64 {
        0.0
    }
}

/// Receives computed geometry.
///
/// Ordering contract: within one mutation phase `apply` is called once per item, in the order the
/// items were first placed; `apply_container_height` follows a completed reflow on a later turn.
pub trait LayoutSink {
    /// Write one item's placement.
    fn apply(&mut self, id: ItemId, placement: Placement);
    /// Write the container height (the tallest column).
    fn apply_container_height(&mut self, height: f64);
}

/// Size provider backed by a fixed table, for tests, replay and the CLI.
#[derive(Clone, Debug, Default)]
pub struct FixedSizeProvider {
    heights: BTreeMap<ItemId, f64>,
    container_width: f64,
}

impl FixedSizeProvider {
    /// Empty table with the given container width.
    pub fn new(container_width: f64) -> Self {
        Self {
            heights: BTreeMap::new(),
            container_width,
        }
    }

    /// Record (or replace) the rendered height of `id`.
    pub fn set_height(&mut self, id: ItemId, height: f64) {
        self.heights.insert(id, height);
    }

    /// Forget `id`; it measures as not rendered afterwards.
    pub fn forget(&mut self, id: ItemId) {
        self.heights.remove(&id);
    }

    /// Change the reported container width.
    pub fn set_container_width(&mut self, width: f64) {
        self.container_width = width;
    }
}

impl SizeProvider for FixedSizeProvider {
    fn measure(&self, id: ItemId, _width: f64) -> Option<f64> {
        self.heights.get(&id).copied()
    }

    fn container_width(&self) -> f64 {
        self.container_width
    }
}

/// One write observed by a [`RecordingSink`].
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SinkWrite {
    /// An item placement.
    Item {
        /// Placed item.
        id: ItemId,
        /// Geometry written.
        placement: Placement,
    },
    /// A container height.
    ContainerHeight {
        /// Height written.
        height: f64,
    },
}

/// Sink that records every write in order.
#[derive(Clone, Debug, Default)]
pub struct RecordingSink {
    /// Writes in the order they arrived.
    pub writes: Vec<SinkWrite>,
}

impl RecordingSink {
    /// Empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Most recent geometry written for `id`.
    pub fn last_placement(&self, id: ItemId) -> Option<Placement> {
        self.writes.iter().rev().find_map(|w| match *w {
            SinkWrite::Item { id: other, placement } if other == id => Some(placement),
            _ => None,
        })
    }

    /// Most recent container height written.
    pub fn last_container_height(&self) -> Option<f64> {
        self.writes.iter().rev().find_map(|w| match *w {
            SinkWrite::ContainerHeight { height } => Some(height),
            SinkWrite::Item { .. } => None,
        })
    }

    /// Number of item writes received so far.
    pub fn item_writes(&self) -> usize {
        self.writes
            .iter()
            .filter(|w| matches!(w, SinkWrite::Item { .. }))
            .count()
    }

    /// Forget everything recorded so far.
    pub fn clear(&mut self) {
        self.writes.clear();
    }
}

impl LayoutSink for RecordingSink {
    fn apply(&mut self, id: ItemId, placement: Placement) {
        self.writes.push(SinkWrite::Item { id, placement });
    }

    fn apply_container_height(&mut self, height: f64) {
        self.writes.push(SinkWrite::ContainerHeight { height });
    }
}
