//! Error types for catalog loading and the flight-plan wizard.

use crate::wizard::Step;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("zone '{0}' already exists")]
    DuplicateZone(String),
    #[error("zone '{id}' is invalid: {}", .reasons.join("; "))]
    InvalidZone { id: String, reasons: Vec<String> },
    #[error("regulation '{id}' is invalid: {}", .reasons.join("; "))]
    InvalidRegulation { id: String, reasons: Vec<String> },
    #[error("failed to parse catalog: {0}")]
    Json(#[from] serde_json::Error),
    #[error("failed to read catalog: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum WizardError {
    #[error("step {0} is not complete")]
    StepIncomplete(Step),
    #[error("step {0} is out of range (1-4)")]
    StepOutOfRange(u8),
    #[error("already at the first step")]
    AtFirstStep,
    #[error("already at the last step")]
    AtLastStep,
}
