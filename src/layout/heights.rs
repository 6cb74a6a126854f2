use crate::{
    foundation::core::height_or_zero,
    layout::{columns::Column, items::ItemList},
};

/// Recompute every column's height from the items currently assigned to it.
///
/// Items pointing at a column outside `columns` (stale after a column-count change) are ignored.
pub(crate) fn column_heights(columns: &[Column], items: &ItemList, gutter: f64) -> Vec<Column> {
    let mut out: Vec<Column> = columns
        .iter()
        .map(|c| Column {
            index: c.index,
            height: 0.0,
        })
        .collect();
    for item in items.iter() {
        let Some(col) = item.column else {
            continue;
        };
        if let Some(slot) = out.iter_mut().find(|c| c.index == col) {
            slot.height += gutter + height_or_zero(item.measured_height);
        }
    }
    out
}

/// Tallest column; ties resolve to the earliest column in list order.
pub fn highest_column(columns: &[Column]) -> Column {
    extremal(columns, |candidate, best| candidate > best)
}

/// Shortest column; ties resolve to the earliest column in list order.
pub fn lowest_column(columns: &[Column]) -> Column {
    extremal(columns, |candidate, best| candidate < best)
}

// Strict comparison keeps the first of equal heights, matching a stable sort's head.
fn extremal(columns: &[Column], beats: impl Fn(f64, f64) -> bool) -> Column {
    columns
        .iter()
        .copied()
        .reduce(|best, c| if beats(c.height, best.height) { c } else { best })
        .unwrap_or(Column::EMPTY)
}

#[cfg(test)]
#[path = "../../tests/unit/layout/heights.rs"]
mod tests;
