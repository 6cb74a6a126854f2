use super::*;
use crate::{ItemId, session::collab::SinkWrite};

const BASIC: &str = r#"{
    "config": { "columns": 3, "gutter": 10 },
    "container_width": 600,
    "items": [
        { "id": 0, "height": 100 },
        { "id": 1, "height": 50 },
        { "id": 2, "height": 80 },
        { "id": 3, "height": 30 }
    ]
}"#;

#[test]
fn replay_settles_initial_items() {
    let scenario = Scenario::from_json(BASIC).unwrap();
    let report = replay(&scenario).unwrap();
    assert_eq!(report.column_width, 190.0);
    assert_eq!(report.container_height, 110.0);
    let cols: Vec<_> = report.items.iter().map(|i| i.placement.column).collect();
    assert_eq!(cols, vec![0, 1, 2, 1]);
    assert_eq!(report.items[3].placement.top, 60.0);
    assert_eq!(report.turns, 1);
    assert!(!report.destroyed);
}

#[test]
fn events_drive_reflows() {
    let mut scenario = Scenario::from_json(BASIC).unwrap();
    scenario.events = vec![
        Event::Settle,
        Event::Resize {
            id: ItemId(1),
            height: 200.0,
        },
        Event::Settle,
        Event::Remove { id: ItemId(0) },
    ];
    let (report, sink) = replay_recorded(&scenario).unwrap();
    assert_eq!(report.stats.partial_passes, 2);
    assert_eq!(report.items.len(), 3);
    assert_eq!(report.items[0].id, ItemId(1));
    assert_eq!(report.items[0].height, 200.0);
    assert_eq!(
        sink.writes.last(),
        Some(&SinkWrite::ContainerHeight {
            height: report.container_height
        })
    );
}

#[test]
fn invalid_event_surfaces_validation_error() {
    let mut scenario = Scenario::from_json(BASIC).unwrap();
    scenario.events = vec![Event::SetColumns { columns: 0 }];
    let err = replay(&scenario).unwrap_err();
    assert!(err.to_string().contains("validation error:"));
}

#[test]
fn duplicate_initial_ids_are_rejected() {
    let json = r#"{ "items": [ { "id": 1 }, { "id": 1 } ] }"#;
    let err = Scenario::from_json(json).unwrap_err();
    assert!(err.to_string().contains("scenario error:"));
}

#[test]
fn destroy_freezes_report() {
    let mut scenario = Scenario::from_json(BASIC).unwrap();
    scenario.events = vec![
        Event::SetColumns { columns: 2 },
        Event::Destroy,
        Event::Tick { count: 3 },
    ];
    let (report, sink) = replay_recorded(&scenario).unwrap();
    assert!(report.destroyed);
    assert_eq!(report.turns, 0);
    assert!(sink.writes.is_empty());
    assert_eq!(report.stats.full_passes, 0);
}
