//! Column bookkeeping and greedy placement.
//!
//! Everything here is synchronous and side-effect free with respect to the outside world:
//! placements are returned to the caller, which decides when they reach the layout sink.

pub(crate) mod columns;
pub(crate) mod heights;
pub(crate) mod items;
pub(crate) mod placement;

use crate::foundation::config::GridConfig;
use columns::{Column, columns_for};
use items::ItemList;

/// Canonical layout state: configuration, column set and the ordered item list.
#[derive(Clone, Debug)]
pub(crate) struct Grid {
    pub(crate) config: GridConfig,
    pub(crate) columns: Vec<Column>,
    pub(crate) items: ItemList,
}

impl Grid {
    pub(crate) fn new(config: GridConfig) -> Self {
        Self {
            config,
            columns: columns_for(config.columns),
            items: ItemList::default(),
        }
    }

    /// Replace the column set; all running heights start over at 0.
    pub(crate) fn rebuild_columns(&mut self, count: usize) {
        self.config.columns = count;
        self.columns = columns_for(count);
    }

    /// Fresh per-column heights derived from the current item list.
    pub(crate) fn column_heights(&self) -> Vec<Column> {
        heights::column_heights(&self.columns, &self.items, self.config.gutter)
    }

    /// Store freshly derived heights on the column records.
    pub(crate) fn refresh_heights(&mut self) {
        self.columns = self.column_heights();
    }
}
