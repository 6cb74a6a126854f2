use crate::foundation::core::{ItemId, Placement};

/// Identity of one scheduled unit of work.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize)]
pub struct TaskHandle(pub u64);

#[derive(Clone, Debug)]
struct ScheduledTask<T> {
    handle: TaskHandle,
    due_turn: u64,
    task: T,
}

/// Single-slot deferred task: scheduling replaces (cancels) whatever was waiting.
#[derive(Clone, Debug)]
pub(crate) struct TaskSlot<T> {
    pending: Option<ScheduledTask<T>>,
    next_handle: u64,
}

impl<T> Default for TaskSlot<T> {
    fn default() -> Self {
        Self {
            pending: None,
            next_handle: 1,
        }
    }
}

impl<T> TaskSlot<T> {
    /// Schedule `task` to become due at `due_turn`, returning the new handle and the cancelled one.
    pub(crate) fn schedule(&mut self, due_turn: u64, task: T) -> (TaskHandle, Option<TaskHandle>) {
        let cancelled = self.cancel();
        let handle = TaskHandle(self.next_handle);
        self.next_handle += 1;
        self.pending = Some(ScheduledTask {
            handle,
            due_turn,
            task,
        });
        (handle, cancelled)
    }

    pub(crate) fn cancel(&mut self) -> Option<TaskHandle> {
        self.pending.take().map(|t| t.handle)
    }

    pub(crate) fn pending(&self) -> Option<(TaskHandle, &T)> {
        self.pending.as_ref().map(|t| (t.handle, &t.task))
    }

    pub(crate) fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Take the waiting task if its turn has come.
    pub(crate) fn take_due(&mut self, turn: u64) -> Option<(TaskHandle, T)> {
        if self.pending.as_ref()?.due_turn > turn {
            return None;
        }
        self.pending.take().map(|t| (t.handle, t.task))
    }
}

/// Placement writes waiting for the next mutation phase.
///
/// Writes to the same item coalesce: the latest geometry wins, the first queue position is kept.
#[derive(Clone, Debug, Default)]
pub(crate) struct MutationQueue {
    writes: Vec<(ItemId, Placement)>,
}

impl MutationQueue {
    pub(crate) fn push(&mut self, id: ItemId, placement: Placement) {
        match self.writes.iter_mut().find(|(other, _)| *other == id) {
            Some(slot) => slot.1 = placement,
            None => self.writes.push((id, placement)),
        }
    }

    pub(crate) fn discard(&mut self, id: ItemId) {
        self.writes.retain(|(other, _)| *other != id);
    }

    pub(crate) fn drain(&mut self) -> Vec<(ItemId, Placement)> {
        std::mem::take(&mut self.writes)
    }

    pub(crate) fn clear(&mut self) {
        self.writes.clear();
    }

    pub(crate) fn len(&self) -> usize {
        self.writes.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.writes.is_empty()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/reflow/scheduler.rs"]
mod tests;
