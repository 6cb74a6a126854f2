use crate::{
    foundation::{
        config::{GridConfig, validate_columns, validate_gutter, validate_width},
        core::{ItemId, Placement},
        error::MasonryResult,
    },
    layout::{
        Grid,
        columns::Column,
        heights::highest_column,
        items::Item,
    },
    reflow::{
        coordinator::{ReflowCoordinator, ReflowRequest, ReflowStart, ReflowState, ReflowStats},
        scheduler::TaskHandle,
    },
    session::collab::{LayoutSink, SizeProvider},
};

/// What one run-loop turn did.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize)]
pub struct TickOutcome {
    /// Turn number this outcome belongs to (1-based).
    pub turn: u64,
    /// Placement writes flushed to the sink during the turn.
    pub writes_flushed: usize,
    /// Reflow request executed during the turn, if any.
    pub reflow: Option<ReflowRequest>,
    /// Container height pushed during the turn, if any.
    pub container_height: Option<f64>,
}

/// Masonry grid session: configuration, the ordered item list and the reflow scheduler.
///
/// Time only moves through [`GridSession::tick`]. Each turn first flushes queued placement writes
/// (mutation phase), then re-measures items and runs a due reflow (measurement phase). Requests
/// made during turn `n` run on turn `n + 1` at the earliest; a newer request replaces an older one
/// that has not run yet. After [`GridSession::destroy`] every operation is a no-op.
pub struct GridSession<P, S> {
    grid: Grid,
    coord: ReflowCoordinator,
    provider: P,
    sink: S,
    turn: u64,
    destroyed: bool,
}

impl<P: SizeProvider, S: LayoutSink> GridSession<P, S> {
    /// Create a session after validating `config`.
    pub fn new(config: GridConfig, provider: P, sink: S) -> MasonryResult<Self> {
        config.validate()?;
        Ok(Self {
            grid: Grid::new(config),
            coord: ReflowCoordinator::default(),
            provider,
            sink,
            turn: 0,
            destroyed: false,
        })
    }

    /// Current configuration.
    pub fn config(&self) -> GridConfig {
        self.grid.config
    }

    /// Larger of the forced width and the provider's container width.
    pub fn layout_width(&self) -> f64 {
        self.grid
            .config
            .layout_width(self.provider.container_width())
    }

    /// `ceil(layout_width / columns - gutter)`.
    pub fn column_width(&self) -> f64 {
        self.grid.config.column_width(self.layout_width())
    }

    /// Place a new item at the bottom of the shortest column.
    ///
    /// The write is queued for the next mutation phase. Adding an id that is already live is a
    /// no-op; an id whose previous item was removed starts over as a new item.
    pub fn add_item(&mut self, mut item: Item) -> Option<Placement> {
        if self.destroyed || self.grid.items.contains_record(item.id) {
            return None;
        }
        let id = item.id;
        item.column = None;
        item.destroyed = false;
        self.grid.items.insert_record(item);

        let width = self.column_width();
        if !self.coord.place_one(&mut self.grid, id, width) {
            return None;
        }
        self.coord.height_push_pending = true;
        self.grid.items.get(id).and_then(Item::placement)
    }

    /// Flag `id` as resized and schedule a partial reflow from the first flagged item.
    pub fn notify_item_changed(&mut self, id: ItemId) -> Option<TaskHandle> {
        if self.destroyed {
            return None;
        }
        let item = self.grid.items.get_mut(id)?;
        item.needs_relayout = true;
        Some(self.request(ReflowRequest::Partial(ReflowStart::FirstFlagged)))
    }

    /// Schedule a partial reflow starting at `id`'s position, resolved when the pass runs.
    pub fn request_reflow_from(&mut self, id: ItemId) -> Option<TaskHandle> {
        if self.destroyed {
            return None;
        }
        Some(self.request(ReflowRequest::Partial(ReflowStart::Item(id))))
    }

    /// Schedule a full reflow.
    pub fn request_full_reflow(&mut self) -> Option<TaskHandle> {
        if self.destroyed {
            return None;
        }
        Some(self.request(ReflowRequest::Full))
    }

    /// Drop a destroyed item and close the gap it leaves with a partial reflow.
    ///
    /// A reflow that is already waiting keeps its parameters and is widened to start at or before
    /// the gap when it runs.
    pub fn remove_item(&mut self, id: ItemId) -> bool {
        if self.destroyed {
            return false;
        }
        let Some((pos, _)) = self.grid.items.remove(id) else {
            return false;
        };
        self.coord.writes.discard(id);
        self.grid.refresh_heights();
        if pos < self.grid.items.len() {
            self.coord.close_gap(self.turn, pos);
        } else {
            self.coord.height_push_pending = true;
        }
        true
    }

    /// Set the forced layout width; any positive width schedules a full reflow.
    pub fn set_width(&mut self, width: f64) -> MasonryResult<Option<TaskHandle>> {
        if self.destroyed {
            return Ok(None);
        }
        validate_width(width)?;
        self.grid.config.width = width;
        if width > 0.0 {
            return Ok(Some(self.request(ReflowRequest::Full)));
        }
        Ok(None)
    }

    /// Change the column count; a change rebuilds the column set and schedules a full reflow.
    ///
    /// Partial requests made before that full reflow runs are widened to full ones.
    pub fn set_column_count(&mut self, columns: usize) -> MasonryResult<Option<TaskHandle>> {
        if self.destroyed {
            return Ok(None);
        }
        validate_columns(columns)?;
        if columns == self.grid.config.columns {
            return Ok(None);
        }
        self.grid.rebuild_columns(columns);
        self.grid.refresh_heights();
        Ok(Some(self.coord.schedule_relayout(self.turn)))
    }

    /// Change the gutter; a change schedules a full reflow.
    pub fn set_gutter(&mut self, gutter: f64) -> MasonryResult<Option<TaskHandle>> {
        if self.destroyed {
            return Ok(None);
        }
        validate_gutter(gutter)?;
        if gutter == self.grid.config.gutter {
            return Ok(None);
        }
        self.grid.config.gutter = gutter;
        self.grid.refresh_heights();
        Ok(Some(self.coord.schedule_relayout(self.turn)))
    }

    /// Abandon all scheduled and queued work. Terminal.
    pub fn destroy(&mut self) {
        if self.destroyed {
            return;
        }
        self.destroyed = true;
        self.coord.abandon();
        tracing::debug!(turn = self.turn, "grid session destroyed");
    }

    /// Whether [`GridSession::destroy`] has been called.
    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    fn request(&mut self, request: ReflowRequest) -> TaskHandle {
        self.coord.schedule(self.turn, request)
    }

    /// Run one cooperative turn: mutation phase, then measurement phase.
    #[tracing::instrument(skip(self), fields(turn = self.turn + 1))]
    pub fn tick(&mut self) -> TickOutcome {
        if self.destroyed {
            return TickOutcome {
                turn: self.turn,
                ..TickOutcome::default()
            };
        }
        self.turn += 1;
        let mut outcome = TickOutcome {
            turn: self.turn,
            ..TickOutcome::default()
        };

        outcome.writes_flushed += self.flush_writes();

        self.measure();
        if self.coord.height_push_pending {
            self.coord.height_push_pending = false;
            let height = self.container_height();
            self.sink.apply_container_height(height);
            outcome.container_height = Some(height);
        }

        if let Some((handle, request)) = self.coord.take_due(self.turn) {
            tracing::debug!(handle = handle.0, ?request, "reflow running");
            let width = self.column_width();
            if self.coord.run(&mut self.grid, request, width) {
                outcome.reflow = Some(request);
            }
            // Writes queued by the pass are committed within the same turn.
            outcome.writes_flushed += self.flush_writes();
        }

        outcome
    }

    /// Tick until nothing is scheduled, queued or waiting to be pushed; returns the turn count.
    pub fn run_until_idle(&mut self) -> u64 {
        let mut turns = 0;
        while !self.destroyed && !self.coord.is_quiet() {
            self.tick();
            turns += 1;
        }
        turns
    }

    fn flush_writes(&mut self) -> usize {
        let writes = self.coord.writes.drain();
        let n = writes.len();
        for (id, placement) in writes {
            self.sink.apply(id, placement);
        }
        n
    }

    /// Refresh every listed item's height from the provider. `None` keeps the previous value.
    fn measure(&mut self) {
        let provider = &self.provider;
        for item in self.grid.items.records_mut() {
            if let Some(h) = provider.measure(item.id, item.width) {
                item.measured_height = Some(h);
            }
        }
        self.grid.refresh_heights();
    }

    /// Coordinator state as seen from outside.
    pub fn state(&self) -> ReflowState {
        if self.destroyed {
            return ReflowState::Idle;
        }
        self.coord.state()
    }

    /// Request waiting for its turn, if any.
    pub fn pending_request(&self) -> Option<ReflowRequest> {
        self.coord.pending_request()
    }

    /// Placement writes waiting for the next mutation phase.
    pub fn pending_writes(&self) -> usize {
        self.coord.writes.len()
    }

    /// Lifetime counters.
    pub fn stats(&self) -> ReflowStats {
        self.coord.stats
    }

    /// Number of turns run so far.
    pub fn turn(&self) -> u64 {
        self.turn
    }

    /// Listed items in order.
    pub fn items(&self) -> impl Iterator<Item = &Item> + '_ {
        self.grid.items.iter()
    }

    /// Look up a live item.
    pub fn item(&self, id: ItemId) -> Option<&Item> {
        self.grid.items.get(id)
    }

    /// Listed item ids with their current geometry.
    pub fn placements(&self) -> Vec<(ItemId, Placement)> {
        self.grid
            .items
            .iter()
            .filter_map(|item| item.placement().map(|p| (item.id, p)))
            .collect()
    }

    /// Per-column heights derived from the current item list.
    pub fn column_heights(&self) -> Vec<Column> {
        self.grid.columns.clone()
    }

    /// Height of the tallest column.
    pub fn container_height(&self) -> f64 {
        highest_column(&self.grid.columns).height
    }

    /// The size provider.
    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Mutable access to the size provider, e.g. to simulate a re-render.
    pub fn provider_mut(&mut self) -> &mut P {
        &mut self.provider
    }

    /// The layout sink.
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Mutable access to the layout sink.
    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// Give back the collaborators.
    pub fn into_parts(self) -> (P, S) {
        (self.provider, self.sink)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/grid_session.rs"]
mod tests;
