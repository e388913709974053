//! Progress display and navigation controls derived from session state.

use serde::Serialize;

use crate::script::catalog::{self, Icon, PHASES, PhaseId};

use super::controller::Wizard;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PhaseStatus {
    Done,
    Current,
    Upcoming,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PhaseProgress {
    pub id: PhaseId,
    pub title: &'static str,
    pub icon: Icon,
    pub status: PhaseStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Progress {
    /// 1-based position of the current step.
    pub step_number: usize,
    pub step_count: usize,
    /// e.g. "Step 3 of 12".
    pub label: String,
    /// Share of the call reached, in `(0, 1]`.
    pub fraction: f32,
    pub phases: Vec<PhaseProgress>,
}

/// What the main forward button does right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PrimaryControl {
    Next,
    /// Gate step with unchecked items; the button is disabled.
    CompleteChecklist,
    /// Final step; the button resets for the next call.
    Finish,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Controls {
    pub back_enabled: bool,
    pub primary: PrimaryControl,
    pub primary_label: &'static str,
    pub primary_enabled: bool,
}

impl PrimaryControl {
    pub fn label(self) -> &'static str {
        match self {
            Self::Next => "Next Step",
            Self::CompleteChecklist => "Complete Checklist",
            Self::Finish => "Finish & Start New Call",
        }
    }
}

pub fn progress(wizard: &Wizard) -> Progress {
    let state = wizard.state();
    let step_number = state.current_step_index() + 1;
    let step_count = catalog::step_count();
    let current_phase = state.current_step().phase;

    let phases = PHASES
        .iter()
        .enumerate()
        .map(|(i, phase)| PhaseProgress {
            id: phase.id,
            title: phase.title,
            icon: phase.icon,
            status: match i.cmp(&current_phase) {
                std::cmp::Ordering::Less => PhaseStatus::Done,
                std::cmp::Ordering::Equal => PhaseStatus::Current,
                std::cmp::Ordering::Greater => PhaseStatus::Upcoming,
            },
        })
        .collect();

    Progress {
        step_number,
        step_count,
        label: format!("Step {step_number} of {step_count}"),
        fraction: step_number as f32 / step_count as f32,
        phases,
    }
}

pub fn controls(wizard: &Wizard) -> Controls {
    let state = wizard.state();
    let primary = if state.is_final_step() {
        PrimaryControl::Finish
    } else if wizard.is_blocked() {
        PrimaryControl::CompleteChecklist
    } else {
        PrimaryControl::Next
    };
    Controls {
        back_enabled: state.current_step_index() > 0,
        primary,
        primary_label: primary.label(),
        primary_enabled: primary != PrimaryControl::CompleteChecklist,
    }
}
