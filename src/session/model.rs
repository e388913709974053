//! Session snapshot and WebSocket message types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::script::catalog::{Phase, StepId};
use crate::script::content::Screen;
use crate::script::objections::{Objection, ObjectionId};
use crate::wizard::branch::{BranchValue, HealthVerdict, SelectorId, TransferType};
use crate::wizard::checklist::{Checklist, ChecklistKey};
use crate::wizard::copy::{CopyFeedback, CopyMarker, CopyTarget};
use crate::wizard::progress::{self, Controls, Progress};
use crate::wizard::Wizard;

/// Everything the presentation layer needs to draw the current call.
#[derive(Debug, Clone, Serialize)]
pub struct SessionSnapshot {
    pub session_id: Uuid,
    pub started_at: DateTime<Utc>,
    pub step: StepId,
    pub step_index: usize,
    pub step_count: usize,
    pub phase: Phase,
    pub transfer_type: Option<TransferType>,
    pub health_verdict: Option<HealthVerdict>,
    pub checklist: Checklist,
    /// True when every checklist item is ticked.
    pub gate_satisfied: bool,
    pub reset_needs_confirmation: bool,
    pub active_objection: Option<Objection>,
    pub screen: Screen,
    pub progress: Progress,
    pub controls: Controls,
    /// This client's own "Copied!" marker. Never set on broadcast snapshots.
    pub copied: Option<CopyMarker>,
}

impl SessionSnapshot {
    pub fn capture(wizard: &Wizard) -> Self {
        let state = wizard.state();
        Self {
            session_id: state.session_id(),
            started_at: state.started_at(),
            step: state.step_id(),
            step_index: state.current_step_index(),
            step_count: crate::script::catalog::step_count(),
            phase: state.current_phase(),
            transfer_type: state.transfer_type(),
            health_verdict: state.health_verdict(),
            checklist: *state.checklist(),
            gate_satisfied: wizard.all_true(),
            reset_needs_confirmation: wizard.reset_needs_confirmation(),
            active_objection: state.active_objection().map(|id| *id.entry()),
            screen: wizard.screen(),
            progress: progress::progress(wizard),
            controls: progress::controls(wizard),
            copied: None,
        }
    }

    /// Show one client's copy marker on this snapshot.
    pub fn set_copy_feedback(&mut self, copy: &CopyFeedback, now: DateTime<Utc>) {
        // A card marker only shows on the screen it was copied from.
        let step = self.step;
        let open = self.active_objection.map(|o| o.id);
        self.copied = copy.visible(now).filter(|marker| match marker.target {
            CopyTarget::Card { step: copied_on, .. } => copied_on == step,
            CopyTarget::Objection { objection } => open == Some(objection),
        });
    }
}

/// An action from the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum WizardAction {
    Advance,
    Retreat,
    Reset {
        #[serde(default)]
        confirmed: bool,
    },
    Select {
        selector: SelectorId,
        value: BranchValue,
    },
    Toggle {
        key: ChecklistKey,
    },
    OpenObjection {
        objection: ObjectionId,
    },
    CloseObjection,
    CopyCard {
        index: usize,
    },
    CopyObjection {
        objection: ObjectionId,
    },
}

impl WizardAction {
    /// Whether this action can change session state.
    pub fn is_mutation(&self) -> bool {
        !matches!(self, Self::CopyCard { .. } | Self::CopyObjection { .. })
    }
}

/// Result of an applied action.
#[derive(Debug, Clone, Serialize)]
pub struct Applied {
    pub snapshot: SessionSnapshot,
    /// Text to place on the clipboard, for copy actions.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clipboard: Option<String>,
    /// What a copy action copied.
    #[serde(skip)]
    pub copy_target: Option<CopyTarget>,
}

impl Applied {
    /// Record a copy in the requesting client's feedback and mark the
    /// returned snapshot with it. Does nothing for other actions.
    pub fn record_copy(&mut self, copy: &mut CopyFeedback, now: DateTime<Utc>) -> Option<CopyMarker> {
        let marker = copy.record(self.copy_target?, now);
        self.snapshot.set_copy_feedback(copy, now);
        Some(marker)
    }
}

/// Server → client messages on the session WebSocket.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WsMessage {
    /// Full state on connect.
    SessionSync { snapshot: Box<SessionSnapshot> },
    /// State after any change, sent to every client.
    SessionUpdate { snapshot: Box<SessionSnapshot> },
    /// Sent only to the client whose action was refused.
    ActionRejected { error: String, conflict: bool },
    /// Copy result, sent only to the requesting client.
    Clipboard {
        text: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        copied: Option<CopyMarker>,
    },
}
