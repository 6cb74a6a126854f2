/// One vertical track of the grid.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Column {
    /// 0-based index, stable until the column count changes.
    pub index: usize,
    /// Sum of `gutter + measured height` over the items assigned to this column.
    pub height: f64,
}

impl Column {
    /// Returned by extremal lookups on a grid without columns.
    pub const EMPTY: Column = Column {
        index: 0,
        height: 0.0,
    };
}

/// The only way columns are created: `count` contiguous records, all at height 0.
pub fn columns_for(count: usize) -> Vec<Column> {
    (0..count)
        .map(|index| Column { index, height: 0.0 })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/layout/columns.rs"]
mod tests;
