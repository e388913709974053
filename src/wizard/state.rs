//! Session state: the only mutable data in a call.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::script::catalog::{self, Phase, Step, StepId};
use crate::script::objections::ObjectionId;

use super::branch::{Branches, HealthVerdict, TransferType};
use super::checklist::Checklist;

/// State of one call, from the first screen until reset.
///
/// Fields are only writable from the controller, which keeps
/// `current_step_index` inside the step catalog.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionState {
    pub(super) session_id: Uuid,
    pub(super) started_at: DateTime<Utc>,
    pub(super) current_step_index: usize,
    pub(super) branches: Branches,
    pub(super) checklist: Checklist,
    pub(super) active_objection: Option<ObjectionId>,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            session_id: Uuid::new_v4(),
            started_at: Utc::now(),
            current_step_index: 0,
            branches: Branches::default(),
            checklist: Checklist::default(),
            active_objection: None,
        }
    }
}

impl SessionState {
    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn current_step_index(&self) -> usize {
        self.current_step_index
    }

    pub fn current_step(&self) -> Step {
        catalog::STEPS[self.current_step_index]
    }

    pub fn step_id(&self) -> StepId {
        self.current_step().id
    }

    pub fn current_phase(&self) -> Phase {
        catalog::PHASES[self.current_step().phase]
    }

    /// Whether this is the last step of the call.
    pub fn is_final_step(&self) -> bool {
        self.current_step_index + 1 == catalog::step_count()
    }

    pub fn branches(&self) -> &Branches {
        &self.branches
    }

    pub fn transfer_type(&self) -> Option<TransferType> {
        self.branches.transfer_type
    }

    pub fn health_verdict(&self) -> Option<HealthVerdict> {
        self.branches.health_verdict
    }

    pub fn checklist(&self) -> &Checklist {
        &self.checklist
    }

    pub fn active_objection(&self) -> Option<ObjectionId> {
        self.active_objection
    }

    /// Compare everything except the session identity.
    pub fn same_progress(&self, other: &SessionState) -> bool {
        self.current_step_index == other.current_step_index
            && self.branches == other.branches
            && self.checklist == other.checklist
            && self.active_objection == other.active_objection
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::script::catalog::PhaseId;

    #[test]
    fn default_state() {
        let state = SessionState::default();
        assert_eq!(state.current_step_index(), 0);
        assert_eq!(state.step_id(), StepId::Setup);
        assert_eq!(state.current_phase().id, PhaseId::Setup);
        assert!(state.transfer_type().is_none());
        assert!(state.health_verdict().is_none());
        assert!(!state.checklist().all_true());
        assert!(state.active_objection().is_none());
        assert!(!state.is_final_step());
    }

    #[test]
    fn fresh_sessions_get_distinct_ids() {
        let a = SessionState::default();
        let b = SessionState::default();
        assert_ne!(a.session_id(), b.session_id());
        assert!(a.same_progress(&b));
    }

    #[test]
    fn final_step_is_last_catalog_entry() {
        let state = SessionState {
            current_step_index: catalog::step_count() - 1,
            ..Default::default()
        };
        assert!(state.is_final_step());
        assert_eq!(state.step_id(), StepId::Pivot);
        assert_eq!(state.current_phase().id, PhaseId::Close);
    }
}
