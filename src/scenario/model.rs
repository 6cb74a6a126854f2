use crate::{
    foundation::{
        config::GridConfig,
        core::{ItemId, Placement},
        error::{MasonryError, MasonryResult},
    },
    layout::columns::Column,
    reflow::coordinator::ReflowStats,
};

/// A scripted grid session: configuration, initial items and a stream of events.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct Scenario {
    /// Grid configuration the session opens with.
    #[serde(default)]
    pub config: GridConfig,
    /// Width reported by the size provider for the container.
    #[serde(default)]
    pub container_width: f64,
    /// Items added, in order, before the first event.
    #[serde(default)]
    pub items: Vec<ScenarioItem>,
    /// Events applied in order after the initial items.
    #[serde(default)]
    pub events: Vec<Event>,
    /// Run until idle after the last event (default true).
    #[serde(default = "default_settle")]
    pub settle: bool,
}

fn default_settle() -> bool {
    true
}

/// An item present before the first event.
#[derive(Clone, Copy, Debug, serde::Serialize, serde::Deserialize)]
pub struct ScenarioItem {
    /// Item identity.
    pub id: ItemId,
    /// Rendered height; omitted means not rendered yet.
    #[serde(default)]
    pub height: Option<f64>,
}

/// One scripted step, tagged by `op` in JSON.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Event {
    /// Add an item; `height` seeds both the item and the size provider.
    Add {
        id: ItemId,
        #[serde(default)]
        height: Option<f64>,
    },
    /// The item re-rendered at a new height and asks for a relayout.
    Resize { id: ItemId, height: f64 },
    /// Request a partial reflow starting at the item.
    ReflowFrom { id: ItemId },
    /// Remove the item and close its gap.
    Remove { id: ItemId },
    /// Set the forced layout width.
    SetWidth { width: f64 },
    /// Change the column count.
    SetColumns { columns: usize },
    /// Change the gutter.
    SetGutter { gutter: f64 },
    /// Change the container width the size provider reports.
    SetContainerWidth { width: f64 },
    /// Run `count` turns (default 1).
    Tick {
        #[serde(default = "one")]
        count: u64,
    },
    /// Run until idle.
    Settle,
    /// Destroy the session; later events are no-ops.
    Destroy,
}

fn one() -> u64 {
    1
}

impl Scenario {
    /// Parse and validate a scenario.
    pub fn from_json(s: &str) -> MasonryResult<Self> {
        let scenario: Scenario = serde_json::from_str(s)?;
        scenario.validate()?;
        Ok(scenario)
    }

    /// Check the configuration, container width and initial item ids.
    pub fn validate(&self) -> MasonryResult<()> {
        self.config.validate()?;
        if !self.container_width.is_finite() || self.container_width < 0.0 {
            return Err(MasonryError::scenario(
                "container_width must be finite and >= 0",
            ));
        }
        let mut seen = std::collections::BTreeSet::new();
        for item in &self.items {
            if !seen.insert(item.id) {
                return Err(MasonryError::scenario(format!(
                    "duplicate initial item id {}",
                    item.id
                )));
            }
        }
        Ok(())
    }
}

/// Final state of a replayed scenario.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct LayoutReport {
    /// Column width at the end of the run.
    pub column_width: f64,
    /// Height of the tallest column.
    pub container_height: f64,
    /// Aggregated column heights.
    pub columns: Vec<Column>,
    /// Listed items in order.
    pub items: Vec<PlacedItem>,
    /// Session counters.
    pub stats: ReflowStats,
    /// Turns run.
    pub turns: u64,
    /// Whether the script destroyed the session.
    pub destroyed: bool,
}

/// One listed item in a [`LayoutReport`].
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct PlacedItem {
    /// Item identity.
    pub id: ItemId,
    /// Column, top and width.
    #[serde(flatten)]
    pub placement: Placement,
    /// Last measured height, 0 when never measured.
    pub height: f64,
}
