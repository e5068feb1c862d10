//! sf-project: canonical flow file format, import/export against the graph.

pub mod export;
pub mod import;
pub mod schema;
pub mod validate;

pub use export::{ExportError, export};
pub use import::import;
pub use schema::*;
pub use validate::{ValidationError, validate_flow};

pub type ProjectResult<T> = Result<T, ProjectError>;

#[derive(thiserror::Error, Debug)]
pub enum ProjectError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Export error: {0}")]
    Export(#[from] ExportError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub fn load_yaml(path: &std::path::Path) -> ProjectResult<FlowDef> {
    let content = std::fs::read_to_string(path)?;
    let flow: FlowDef = serde_yaml::from_str(&content)?;
    validate_flow(&flow)?;
    Ok(flow)
}

pub fn save_yaml(path: &std::path::Path, flow: &FlowDef) -> ProjectResult<()> {
    validate_flow(flow)?;
    let content = serde_yaml::to_string(flow)?;
    std::fs::write(path, content)?;
    Ok(())
}

pub fn load_json(path: &std::path::Path) -> ProjectResult<FlowDef> {
    let content = std::fs::read_to_string(path)?;
    let flow: FlowDef = serde_json::from_str(&content)?;
    validate_flow(&flow)?;
    Ok(flow)
}

pub fn save_json(path: &std::path::Path, flow: &FlowDef) -> ProjectResult<()> {
    validate_flow(flow)?;
    let content = serde_json::to_string_pretty(flow)?;
    std::fs::write(path, content)?;
    Ok(())
}
