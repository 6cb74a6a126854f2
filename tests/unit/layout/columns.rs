use super::*;

#[test]
fn columns_are_contiguous_and_empty() {
    let cols = columns_for(4);
    assert_eq!(cols.len(), 4);
    for (i, c) in cols.iter().enumerate() {
        assert_eq!(c.index, i);
        assert_eq!(c.height, 0.0);
    }
}

#[test]
fn zero_count_yields_no_columns() {
    assert!(columns_for(0).is_empty());
}
