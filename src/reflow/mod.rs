//! Reflow scheduling: a single debounced request slot plus the passes it triggers.

pub(crate) mod coordinator;
pub(crate) mod scheduler;
