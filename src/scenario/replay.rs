use crate::{
    foundation::{
        config::validate_width,
        core::{ItemId, height_or_zero},
        error::MasonryResult,
    },
    layout::items::Item,
    scenario::model::{Event, LayoutReport, PlacedItem, Scenario},
    session::{
        collab::{FixedSizeProvider, LayoutSink, RecordingSink, SizeProvider},
        grid_session::GridSession,
    },
};

/// Replay `scenario` against a fresh session backed by in-memory collaborators.
#[tracing::instrument(skip(scenario), fields(items = scenario.items.len(), events = scenario.events.len()))]
pub fn replay(scenario: &Scenario) -> MasonryResult<LayoutReport> {
    let (report, _) = replay_recorded(scenario)?;
    Ok(report)
}

/// Like [`replay`], also returning every write the sink observed.
pub fn replay_recorded(scenario: &Scenario) -> MasonryResult<(LayoutReport, RecordingSink)> {
    scenario.validate()?;
    let mut provider = FixedSizeProvider::new(scenario.container_width);
    for item in &scenario.items {
        if let Some(h) = item.height {
            provider.set_height(item.id, h);
        }
    }

    let mut session = GridSession::new(scenario.config, provider, RecordingSink::new())?;
    for item in &scenario.items {
        session.add_item(seeded(item.id, item.height));
    }

    for (idx, event) in scenario.events.iter().enumerate() {
        tracing::debug!(idx, ?event, "scenario event");
        apply_event(&mut session, event)?;
    }
    if scenario.settle {
        session.run_until_idle();
    }

    let report = report_for(&session);
    let (_, sink) = session.into_parts();
    Ok((report, sink))
}

fn seeded(id: ItemId, height: Option<f64>) -> Item {
    let item = Item::new(id);
    match height {
        Some(h) => item.with_height(h),
        None => item,
    }
}

fn apply_event(
    session: &mut GridSession<FixedSizeProvider, RecordingSink>,
    event: &Event,
) -> MasonryResult<()> {
    match *event {
        Event::Add { id, height } => {
            if let Some(h) = height {
                session.provider_mut().set_height(id, h);
            }
            session.add_item(seeded(id, height));
        }
        Event::Resize { id, height } => {
            session.provider_mut().set_height(id, height);
            session.notify_item_changed(id);
        }
        Event::ReflowFrom { id } => {
            session.request_reflow_from(id);
        }
        Event::Remove { id } => {
            session.provider_mut().forget(id);
            session.remove_item(id);
        }
        Event::SetWidth { width } => {
            session.set_width(width)?;
        }
        Event::SetColumns { columns } => {
            session.set_column_count(columns)?;
        }
        Event::SetGutter { gutter } => {
            session.set_gutter(gutter)?;
        }
        Event::SetContainerWidth { width } => {
            validate_width(width)?;
            session.provider_mut().set_container_width(width);
        }
        Event::Tick { count } => {
            for _ in 0..count {
                session.tick();
            }
        }
        Event::Settle => {
            session.run_until_idle();
        }
        Event::Destroy => session.destroy(),
    }
    Ok(())
}

/// Snapshot a session into a serializable report.
pub fn report_for<P: SizeProvider, S: LayoutSink>(session: &GridSession<P, S>) -> LayoutReport {
    let items = session
        .items()
        .filter_map(|item| {
            item.placement().map(|placement| PlacedItem {
                id: item.id,
                placement,
                height: height_or_zero(item.measured_height),
            })
        })
        .collect();
    LayoutReport {
        column_width: session.column_width(),
        container_height: session.container_height(),
        columns: session.column_heights(),
        items,
        stats: session.stats(),
        turns: session.turn(),
        destroyed: session.is_destroyed(),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scenario/replay.rs"]
mod tests;
