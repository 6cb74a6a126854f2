//! JSON-scripted sessions, used by the CLI and by fixture tests.

pub(crate) mod model;
pub(crate) mod replay;
