//! Session façade and the collaborator contracts it drives.

/// Size provider and layout sink traits, plus in-memory implementations.
pub(crate) mod collab;
pub(crate) mod grid_session;
