use super::*;
use crate::foundation::config::GridConfig;
use crate::layout::items::Item;

fn grid_with(heights: &[f64]) -> (Grid, ReflowCoordinator) {
    let mut grid = Grid::new(GridConfig {
        columns: 3,
        gutter: 10.0,
        width: 0.0,
    });
    let mut coord = ReflowCoordinator::default();
    for (i, &h) in heights.iter().enumerate() {
        let id = ItemId(i as u64);
        grid.items.insert_record(Item::new(id).with_height(h));
        coord.place_one(&mut grid, id, 100.0);
    }
    coord.writes.clear();
    (grid, coord)
}

fn snapshot(grid: &Grid) -> Vec<(ItemId, Option<usize>, f64)> {
    grid.items.iter().map(|i| (i.id, i.column, i.top)).collect()
}

#[test]
fn full_reflow_rebuilds_identically() {
    let (mut grid, mut coord) = grid_with(&[100.0, 50.0, 80.0, 30.0, 20.0]);
    let before = snapshot(&grid);
    assert!(coord.run(&mut grid, ReflowRequest::Full, 100.0));
    assert_eq!(snapshot(&grid), before);
    assert_eq!(coord.writes.len(), 5);
    assert_eq!(coord.stats.full_passes, 1);
    assert!(coord.height_push_pending);
}

#[test]
fn full_reflow_drops_destroyed_items() {
    let (mut grid, mut coord) = grid_with(&[100.0, 50.0, 80.0]);
    grid.items.get_mut(ItemId(1)).unwrap().destroyed = true;
    coord.run(&mut grid, ReflowRequest::Full, 100.0);
    assert_eq!(grid.items.ids(), &[ItemId(0), ItemId(2)]);
    // item 2 now lands in the empty column 1
    assert_eq!(grid.items.get(ItemId(2)).unwrap().column, Some(1));
}

#[test]
fn partial_reflow_keeps_prefix() {
    let (mut grid, mut coord) = grid_with(&[100.0, 50.0, 80.0, 30.0, 20.0]);
    let before = snapshot(&grid);

    grid.items.get_mut(ItemId(1)).unwrap().measured_height = Some(200.0);
    grid.items.get_mut(ItemId(1)).unwrap().needs_relayout = true;
    assert!(coord.run(
        &mut grid,
        ReflowRequest::Partial(ReflowStart::FirstFlagged),
        100.0
    ));

    let after = snapshot(&grid);
    assert_eq!(after[0], before[0]);
    // item 1 restarts from col heights [110, 0, 0]
    assert_eq!(after[1], (ItemId(1), Some(1), 0.0));
    // then [110, 210, 0] -> col 2; [110, 210, 90] -> col 2 at 90; [110, 210, 130] -> col 0
    assert_eq!(after[2], (ItemId(2), Some(2), 0.0));
    assert_eq!(after[3], (ItemId(3), Some(2), 90.0));
    assert_eq!(after[4], (ItemId(4), Some(0), 110.0));
    assert!(grid.items.iter().all(|i| !i.needs_relayout));
    assert_eq!(coord.writes.len(), 4);
}

#[test]
fn partial_reflow_from_missing_item_is_dropped() {
    let (mut grid, mut coord) = grid_with(&[10.0, 20.0]);
    let before = snapshot(&grid);
    let ran = coord.run(
        &mut grid,
        ReflowRequest::Partial(ReflowStart::Item(ItemId(99))),
        100.0,
    );
    assert!(!ran);
    assert_eq!(snapshot(&grid), before);
    assert_eq!(coord.stats.dropped, 1);
    assert!(!coord.height_push_pending);
}

#[test]
fn partial_reflow_with_no_flagged_item_is_dropped() {
    let (mut grid, mut coord) = grid_with(&[10.0]);
    assert!(!coord.run(
        &mut grid,
        ReflowRequest::Partial(ReflowStart::FirstFlagged),
        100.0
    ));
    assert!(!coord.run(
        &mut grid,
        ReflowRequest::Partial(ReflowStart::Index(5)),
        100.0
    ));
}

#[test]
fn scheduling_tracks_state_and_cancellations() {
    let mut coord = ReflowCoordinator::default();
    assert_eq!(coord.state(), ReflowState::Idle);
    coord.schedule(0, ReflowRequest::Partial(ReflowStart::FirstFlagged));
    coord.schedule(0, ReflowRequest::Partial(ReflowStart::Index(2)));
    assert_eq!(coord.state(), ReflowState::ReflowScheduled);
    assert_eq!(coord.stats.cancelled, 1);
    assert_eq!(
        coord.pending_request(),
        Some(ReflowRequest::Partial(ReflowStart::Index(2)))
    );
    assert!(coord.take_due(0).is_none());
    assert!(coord.take_due(1).is_some());
    assert_eq!(coord.state(), ReflowState::Idle);
}

#[test]
fn latest_partial_replaces_plain_full() {
    let mut coord = ReflowCoordinator::default();
    coord.schedule(0, ReflowRequest::Full);
    coord.schedule(0, ReflowRequest::Partial(ReflowStart::Item(ItemId(3))));
    assert_eq!(
        coord.pending_request(),
        Some(ReflowRequest::Partial(ReflowStart::Item(ItemId(3))))
    );
    assert_eq!(coord.stats.cancelled, 1);
}

#[test]
fn partial_is_widened_until_relayout_runs() {
    let (mut grid, mut coord) = grid_with(&[10.0, 20.0]);
    coord.schedule_relayout(0);
    coord.schedule(0, ReflowRequest::Partial(ReflowStart::FirstFlagged));
    assert_eq!(coord.pending_request(), Some(ReflowRequest::Full));

    let (_, request) = coord.take_due(1).unwrap();
    coord.run(&mut grid, request, 100.0);
    coord.schedule(1, ReflowRequest::Partial(ReflowStart::Index(1)));
    assert_eq!(
        coord.pending_request(),
        Some(ReflowRequest::Partial(ReflowStart::Index(1)))
    );
}

#[test]
fn removal_keeps_pending_request_and_lowers_start() {
    let (mut grid, mut coord) = grid_with(&[100.0, 50.0, 80.0, 30.0, 20.0]);
    coord.schedule(0, ReflowRequest::Partial(ReflowStart::Item(ItemId(4))));

    grid.items.remove(ItemId(1));
    grid.refresh_heights();
    assert!(coord.close_gap(0, 1).is_none());
    assert_eq!(
        coord.pending_request(),
        Some(ReflowRequest::Partial(ReflowStart::Item(ItemId(4))))
    );

    let (_, request) = coord.take_due(1).unwrap();
    assert!(coord.run(&mut grid, request, 100.0));
    // [0, 2, 3, 4] re-placed from position 1: col heights [110, 0, 0]
    assert_eq!(
        snapshot(&grid),
        vec![
            (ItemId(0), Some(0), 0.0),
            (ItemId(2), Some(1), 0.0),
            (ItemId(3), Some(2), 0.0),
            (ItemId(4), Some(2), 40.0),
        ]
    );
    assert_eq!(coord.writes.len(), 3);
}

#[test]
fn successive_gaps_keep_the_lowest_position() {
    let (mut grid, mut coord) = grid_with(&[10.0, 20.0, 30.0, 40.0]);
    grid.items.remove(ItemId(1));
    assert!(coord.close_gap(0, 1).is_some());
    grid.items.remove(ItemId(3));
    assert!(coord.close_gap(0, 2).is_none());
    assert_eq!(coord.gap, Some(1));
    // the stale start is past the end; the gap still drives the pass
    assert!(coord.run(
        &mut grid,
        ReflowRequest::Partial(ReflowStart::Index(7)),
        100.0
    ));
    assert_eq!(coord.gap, None);
    assert_eq!(coord.stats.dropped, 0);
}

#[test]
fn abandon_clears_everything() {
    let (_, mut coord) = grid_with(&[]);
    coord.schedule(4, ReflowRequest::Full);
    coord.height_push_pending = true;
    coord.abandon();
    assert!(coord.is_quiet());
    assert_eq!(coord.state(), ReflowState::Idle);
}
