//! Flow schema validation.

use std::collections::HashSet;
use thiserror::Error;

use crate::schema::FlowDef;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("step at position {position} has an empty id")]
    EmptyStepId { position: usize },

    #[error("duplicate step id '{id}'")]
    DuplicateStepId { id: String },
}

/// Check a flow definition before save and after load: every step needs an
/// id, and ids must be unique within the flow.
pub fn validate_flow(flow: &FlowDef) -> Result<(), ValidationError> {
    let mut seen: HashSet<&str> = HashSet::new();
    for (position, step) in flow.steps.iter().enumerate() {
        if step.id.is_empty() {
            return Err(ValidationError::EmptyStepId { position });
        }
        if !seen.insert(&step.id) {
            return Err(ValidationError::DuplicateStepId {
                id: step.id.clone(),
            });
        }
    }
    Ok(())
}
