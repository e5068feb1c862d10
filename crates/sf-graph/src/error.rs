//! Graph-specific error types.

use sf_core::{EdgeId, NodeId};
use thiserror::Error;

/// Reasons a requested transition between two steps is refused.
///
/// The graph is left untouched in every case; the message text is what the
/// host surfaces as a warning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConnectError {
    #[error("an end step cannot be the source of a transition")]
    SourceIsTerminal,

    #[error("the source step already has an outgoing transition")]
    SourceAlreadyHasOutgoing,

    #[error("a begin step cannot be the target of a transition")]
    TargetIsInitial,

    #[error("the target step already has an incoming transition")]
    TargetAlreadyHasIncoming,

    #[error("the transition would close a loop in the flow")]
    WouldCreateCycle,
}

/// Errors from structural operations other than connect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GraphError {
    #[error("unknown step {0}")]
    UnknownNode(NodeId),

    #[error("unknown transition {0}")]
    UnknownEdge(EdgeId),

    #[error("begin and end steps cannot be deleted")]
    CannotDeleteEndpoint,
}
