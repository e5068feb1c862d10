//! Flow file schema definitions.

use serde::{Deserialize, Serialize};
use sf_graph::StepData;

/// A whole flow: an opaque id plus its ordered step list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FlowDef {
    pub id: String,
    #[serde(default)]
    pub steps: Vec<StepDef>,
}

/// One step record as stored in a flow file.
///
/// `tag` is an opaque payload carried through untouched;
/// `disconnected_from_next` and `next_line_dashed` describe the transition
/// that would follow this step.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct StepDef {
    #[serde(default)]
    pub index: i32,
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub tips: String,
    #[serde(default, skip_serializing_if = "serde_json::Value::is_null")]
    pub tag: serde_json::Value,
    #[serde(default)]
    pub disconnected_from_next: bool,
    #[serde(default)]
    pub next_line_dashed: bool,
}

impl StepDef {
    /// The payload a graph node carries for this record.
    pub fn to_data(&self) -> StepData {
        StepData {
            id: self.id.clone(),
            name: self.name.clone(),
            tips: self.tips.clone(),
            tag: self.tag.clone(),
            index: self.index,
            disconnected_from_next: self.disconnected_from_next,
            next_line_dashed: self.next_line_dashed,
        }
    }

    /// Rebuild a record from node payload, placing it at `index` in the
    /// emitted list. The transition flags reset to their defaults.
    pub fn from_data(data: &StepData, index: i32) -> Self {
        Self {
            index,
            id: data.id.clone(),
            name: data.name.clone(),
            tips: data.tips.clone(),
            tag: data.tag.clone(),
            disconnected_from_next: false,
            next_line_dashed: false,
        }
    }
}
