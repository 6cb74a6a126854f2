use crate::{
    foundation::core::ItemId,
    layout::{Grid, placement::place_item},
    reflow::scheduler::{MutationQueue, TaskHandle, TaskSlot},
};

/// Where a partial reflow starts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReflowStart {
    /// The first listed item whose `needs_relayout` flag is set.
    FirstFlagged,
    /// The position of this item, resolved when the pass runs.
    Item(ItemId),
    /// A raw list position, e.g. the slot a removed item left behind.
    Index(usize),
}

/// A deferred reflow request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReflowRequest {
    /// Re-place every live item from empty columns.
    Full,
    /// Re-place the suffix starting at the resolved position.
    Partial(ReflowStart),
}

/// Externally observable coordinator state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReflowState {
    /// Nothing scheduled and nothing waiting to be committed.
    Idle,
    /// A reflow request waits for its turn.
    ReflowScheduled,
    /// A pass ran and its container height has not been pushed yet.
    Reflowing,
}

/// Counters accumulated over a session's lifetime.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ReflowStats {
    /// Full passes executed.
    pub full_passes: u64,
    /// Partial passes executed.
    pub partial_passes: u64,
    /// Requests cancelled by a newer request before they ran.
    pub cancelled: u64,
    /// Partial requests dropped because their start could not be resolved.
    pub dropped: u64,
    /// Individual item placements, including those made by `add_item`.
    pub placements: u64,
}

/// Owns the scheduled-request slot, the pending placement writes and the height push flag.
#[derive(Clone, Debug, Default)]
pub(crate) struct ReflowCoordinator {
    slot: TaskSlot<ReflowRequest>,
    pub(crate) writes: MutationQueue,
    pub(crate) height_push_pending: bool,
    pub(crate) stats: ReflowStats,
    in_pass: bool,
    /// Lowest list position opened up by a removal since the last pass.
    gap: Option<usize>,
    /// Set by a column rebuild or gutter change; every placed top is stale until a full pass.
    prefix_stale: bool,
}

impl ReflowCoordinator {
    pub(crate) fn state(&self) -> ReflowState {
        if self.slot.is_pending() {
            ReflowState::ReflowScheduled
        } else if self.in_pass || self.height_push_pending {
            ReflowState::Reflowing
        } else {
            ReflowState::Idle
        }
    }

    pub(crate) fn pending_request(&self) -> Option<ReflowRequest> {
        self.slot.pending().map(|(_, req)| *req)
    }

    /// Replace any waiting request with `request`, due on the turn after `turn`.
    ///
    /// The latest request wins, except that a partial request is widened to a full one while the
    /// placed prefix is stale.
    pub(crate) fn schedule(&mut self, turn: u64, request: ReflowRequest) -> TaskHandle {
        let request = match request {
            ReflowRequest::Partial(_) if self.prefix_stale => ReflowRequest::Full,
            _ => request,
        };
        let (handle, cancelled) = self.slot.schedule(turn + 1, request);
        if let Some(old) = cancelled {
            self.stats.cancelled += 1;
            tracing::debug!(cancelled = old.0, handle = handle.0, ?request, "reflow rescheduled");
        } else {
            tracing::debug!(handle = handle.0, ?request, "reflow scheduled");
        }
        handle
    }

    /// Full reflow after a change that invalidates every placed top (column set, gutter).
    pub(crate) fn schedule_relayout(&mut self, turn: u64) -> TaskHandle {
        self.prefix_stale = true;
        self.schedule(turn, ReflowRequest::Full)
    }

    /// Record that a removal opened list position `pos` and make sure a pass closes it.
    ///
    /// A waiting request is kept as is; whichever pass runs next starts no later than the gap.
    pub(crate) fn close_gap(&mut self, turn: u64, pos: usize) -> Option<TaskHandle> {
        let floor = self.gap.map_or(pos, |gap| gap.min(pos));
        self.gap = Some(floor);
        if self.slot.is_pending() {
            tracing::debug!(gap = floor, "removal folded into pending reflow");
            return None;
        }
        Some(self.schedule(turn, ReflowRequest::Partial(ReflowStart::Index(floor))))
    }

    pub(crate) fn take_due(&mut self, turn: u64) -> Option<(TaskHandle, ReflowRequest)> {
        self.slot.take_due(turn)
    }

    /// Drop all outstanding work; used when the session is destroyed.
    pub(crate) fn abandon(&mut self) {
        if let Some(handle) = self.slot.cancel() {
            tracing::debug!(handle = handle.0, "reflow abandoned");
        }
        self.writes.clear();
        self.height_push_pending = false;
        self.gap = None;
        self.prefix_stale = false;
    }

    pub(crate) fn is_quiet(&self) -> bool {
        !self.slot.is_pending() && self.writes.is_empty() && !self.height_push_pending
    }

    /// Execute one pass synchronously, queueing every placement it makes.
    ///
    /// Returns `false` when a partial request could not resolve its start and nothing happened.
    pub(crate) fn run(&mut self, grid: &mut Grid, request: ReflowRequest, column_width: f64) -> bool {
        self.in_pass = true;
        let ran = match request {
            ReflowRequest::Full => {
                self.full_reflow(grid, column_width);
                true
            }
            ReflowRequest::Partial(start) => self.partial_reflow(grid, start, column_width),
        };
        self.in_pass = false;
        if ran {
            self.height_push_pending = true;
        }
        ran
    }

    #[tracing::instrument(skip(self, grid), fields(items = grid.items.len()))]
    fn full_reflow(&mut self, grid: &mut Grid, column_width: f64) {
        let survivors: Vec<ItemId> = grid
            .items
            .take_order()
            .into_iter()
            .filter(|&id| grid.items.get(id).is_some_and(|item| !item.is_destroyed()))
            .collect();
        grid.refresh_heights();
        self.place_all(grid, survivors, column_width);
        self.gap = None;
        self.prefix_stale = false;
        self.stats.full_passes += 1;
    }

    #[tracing::instrument(skip(self, grid))]
    fn partial_reflow(&mut self, grid: &mut Grid, start: ReflowStart, column_width: f64) -> bool {
        let gap = self.gap.take();
        let index = match (resolve_start(grid, start), gap) {
            (Some(index), Some(gap)) => Some(index.min(gap)),
            (index, gap) => index.or(gap),
        };
        let Some(index) = index else {
            self.stats.dropped += 1;
            tracing::debug!(?start, "partial reflow start not found; dropped");
            return false;
        };
        let suffix = grid.items.split_off(index);
        grid.refresh_heights();
        self.place_all(grid, suffix, column_width);
        self.stats.partial_passes += 1;
        true
    }

    /// Place items strictly one after another; each placement changes the next lookup.
    ///
    /// Column heights must be fresh for the listed prefix; placement keeps them current.
    pub(crate) fn place_all(&mut self, grid: &mut Grid, ids: Vec<ItemId>, column_width: f64) {
        for id in ids {
            self.place_one(grid, id, column_width);
        }
    }

    pub(crate) fn place_one(&mut self, grid: &mut Grid, id: ItemId, column_width: f64) -> bool {
        match place_item(grid, id, column_width) {
            Some(placement) => {
                self.writes.push(id, placement);
                self.stats.placements += 1;
                true
            }
            None => false,
        }
    }
}

fn resolve_start(grid: &Grid, start: ReflowStart) -> Option<usize> {
    match start {
        ReflowStart::FirstFlagged => grid.items.first_flagged(),
        ReflowStart::Item(id) => grid.items.position(id),
        ReflowStart::Index(index) => (index < grid.items.len()).then_some(index),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/reflow/coordinator.rs"]
mod tests;
