use super::*;

fn listed(ids: &[u64]) -> ItemList {
    let mut list = ItemList::default();
    for &id in ids {
        list.insert_record(Item::new(ItemId(id)));
        list.push(ItemId(id));
    }
    list
}

#[test]
fn push_appends_in_call_order() {
    let mut list = listed(&[3, 1]);
    list.insert_record(Item::new(ItemId(2)));
    list.push(ItemId(2));
    assert_eq!(list.ids(), &[ItemId(3), ItemId(1), ItemId(2)]);
}

#[test]
fn split_off_returns_suffix_and_keeps_records() {
    let mut list = listed(&[1, 2, 3, 4]);
    let tail = list.split_off(2);
    assert_eq!(tail, vec![ItemId(3), ItemId(4)]);
    assert_eq!(list.len(), 2);
    assert!(list.contains_record(ItemId(4)));
    assert!(list.split_off(10).is_empty());
}

#[test]
fn remove_reports_position_and_marks_destroyed() {
    let mut list = listed(&[1, 2, 3]);
    let (pos, item) = list.remove(ItemId(2)).unwrap();
    assert_eq!(pos, 1);
    assert!(item.is_destroyed());
    assert_eq!(list.ids(), &[ItemId(1), ItemId(3)]);
    assert!(list.remove(ItemId(2)).is_none());
}

#[test]
fn first_flagged_follows_list_order() {
    let mut list = listed(&[5, 1, 9]);
    list.get_mut(ItemId(9)).unwrap().needs_relayout = true;
    list.get_mut(ItemId(1)).unwrap().needs_relayout = true;
    assert_eq!(list.first_flagged(), Some(1));
}

#[test]
fn placement_is_none_until_column_assigned() {
    let mut item = Item::new(ItemId(7)).with_height(40.0);
    assert!(item.placement().is_none());
    item.column = Some(2);
    item.top = 15.0;
    item.width = 90.0;
    assert_eq!(
        item.placement(),
        Some(Placement {
            column: 2,
            top: 15.0,
            width: 90.0
        })
    );
}
