//! Call wizard: step sequencer, branch selectors, checklist gate, and
//! objection overlay.
//!
//! A [`Wizard`] owns one [`SessionState`]. Every user action maps to one of
//! its methods; the screen to show is recomputed from state with
//! [`render::render`] after each action.

pub mod branch;
pub mod checklist;
pub mod controller;
pub mod copy;
pub mod progress;
pub mod render;
pub mod state;

pub use branch::{BranchValue, Branches, HealthVerdict, SelectorId, TransferType};
pub use checklist::{Checklist, ChecklistKey};
pub use controller::{Advance, Retreat, Wizard};
pub use copy::{CopyFeedback, CopyMarker, CopyTarget};
pub use progress::{Controls, PhaseStatus, PrimaryControl, Progress};
pub use state::SessionState;
