//! Shared editing-session layer for workflow frontends.
//!
//! The session owns the graph and exposes the operations a host UI forwards
//! its gestures to: load/save, add/update/remove, drag moves, connector
//! drags, and the single-selection model. Refused operations surface as
//! human-readable warnings through [`WarningSink`] instead of propagating.

pub mod session;

pub use session::{EditorSession, Selected, WarningSink};
