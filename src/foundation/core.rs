/// Stable external identity of a grid item.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(transparent)]
pub struct ItemId(pub u64);

impl std::fmt::Display for ItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Geometry written to the layout-apply sink for one item.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Placement {
    /// Column index the item was assigned to.
    pub column: usize,
    /// Vertical offset in layout units.
    pub top: f64,
    /// Width derived from the column width at placement time.
    pub width: f64,
}

/// Collapse an unmeasured or nonsensical height to 0.
///
/// Items that have not rendered yet report `None`; aggregation must not fail on them.
pub(crate) fn height_or_zero(h: Option<f64>) -> f64 {
    match h {
        Some(v) if v.is_finite() && v > 0.0 => v,
        _ => 0.0,
    }
}
