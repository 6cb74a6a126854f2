//! Masonry is a column-balancing layout engine.
//!
//! Items of varying height are assigned to the currently shortest of a fixed number of columns,
//! and that assignment is kept consistent as items are added, resized or removed and as the
//! available width or column count changes.
//!
//! # Pipeline overview
//!
//! 1. **Configure**: a [`GridConfig`] (columns, gutter, forced width) opens a [`GridSession`]
//!    together with a [`SizeProvider`] and a [`LayoutSink`].
//! 2. **Mutate**: `add_item`, `notify_item_changed`, `request_reflow_from`, `remove_item`,
//!    `set_width`, `set_column_count` update state and schedule at most one reflow.
//! 3. **Tick**: each [`GridSession::tick`] flushes queued placement writes, re-measures items and
//!    runs a due reflow. A newer request replaces one that has not run yet.
//!
//! The key design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Deterministic**: the same heights in the same order always produce the same layout.
//! - **Degrade, don't fail**: empty grids, unknown items and destroyed sessions are no-ops.
#![forbid(unsafe_code)]

mod foundation;
mod layout;
mod reflow;
mod scenario;
mod session;

pub use foundation::config::GridConfig;
pub use foundation::core::{ItemId, Placement};
pub use foundation::error::{MasonryError, MasonryResult};
pub use layout::columns::{Column, columns_for};
pub use layout::heights::{highest_column, lowest_column};
pub use layout::items::Item;
pub use reflow::coordinator::{ReflowRequest, ReflowStart, ReflowState, ReflowStats};
pub use reflow::scheduler::TaskHandle;
pub use scenario::model::{Event, LayoutReport, PlacedItem, Scenario, ScenarioItem};
pub use scenario::replay::{replay, replay_recorded, report_for};
pub use session::collab::{
    FixedSizeProvider, LayoutSink, RecordingSink, SinkWrite, SizeProvider,
};
pub use session::grid_session::{GridSession, TickOutcome};
