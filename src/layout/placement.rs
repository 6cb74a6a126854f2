use crate::{
    foundation::core::{ItemId, Placement, height_or_zero},
    layout::{Grid, heights::lowest_column},
};

/// Greedy placement: put `id` at the bottom of the currently shortest column.
///
/// Reads the cached column heights on `grid` and bumps the chosen column, so callers must place
/// one item at a time, in list order, starting from heights that are fresh for the listed items.
/// The item must not be listed yet. Unknown or destroyed items are left alone and yield `None`.
pub(crate) fn place_item(grid: &mut Grid, id: ItemId, column_width: f64) -> Option<Placement> {
    let item = grid.items.get(id)?;
    if item.is_destroyed() {
        return None;
    }
    let height = height_or_zero(item.measured_height);

    let lowest = lowest_column(&grid.columns);
    let placement = Placement {
        column: lowest.index,
        top: lowest.height,
        width: column_width,
    };

    let item = grid.items.get_mut(id)?;
    item.column = Some(placement.column);
    item.top = placement.top;
    item.width = placement.width;
    item.needs_relayout = false;
    grid.items.push(id);
    if let Some(column) = grid.columns.get_mut(placement.column) {
        column.height += grid.config.gutter + height;
    }

    tracing::trace!(item = %id, column = placement.column, top = placement.top, "placed");
    Some(placement)
}

#[cfg(test)]
#[path = "../../tests/unit/layout/placement.rs"]
mod tests;
