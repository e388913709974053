//! Error types for the call script wizard.

use crate::script::catalog::StepId;
use crate::wizard::branch::SelectorId;
use crate::wizard::checklist::ChecklistKey;

/// Top-level error type.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Wizard error: {0}")]
    Wizard(#[from] WizardError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-related errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Rejected wizard actions. None of these change session state.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WizardError {
    #[error("Checklist incomplete, still unchecked: {}", join_keys(.missing))]
    GateBlocked { missing: Vec<ChecklistKey> },

    #[error("Reset discards the call in progress and must be confirmed")]
    ConfirmationRequired,

    #[error("Value {value} is not valid for selector {selector}")]
    InvalidBranchValue { selector: SelectorId, value: String },

    #[error("Selector {selector} cannot be used on step {step}")]
    SelectorNotActive { selector: SelectorId, step: StepId },

    #[error("Unknown selector: {0}")]
    UnknownSelector(String),

    #[error("Unknown checklist item: {0}")]
    UnknownChecklistKey(String),

    #[error("Unknown objection: {0}")]
    UnknownObjection(String),

    #[error("Unknown step: {0}")]
    UnknownStep(String),

    #[error("No script card {0} on this screen")]
    UnknownCard(usize),
}

impl WizardError {
    /// Whether the action was well-formed but not allowed in the current state.
    pub fn is_conflict(&self) -> bool {
        matches!(
            self,
            Self::GateBlocked { .. } | Self::ConfirmationRequired | Self::SelectorNotActive { .. }
        )
    }
}

fn join_keys(keys: &[ChecklistKey]) -> String {
    keys.iter()
        .map(|k| k.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Result type alias.
pub type Result<T> = std::result::Result<T, Error>;
