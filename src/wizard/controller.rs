//! Navigation controller: the only code that mutates session state.

use serde::Serialize;
use tracing::{debug, info};

use crate::error::WizardError;
use crate::script::catalog::{GATED_STEP, Phase, StepId};
use crate::script::content::Screen;
use crate::script::objections::ObjectionId;

use super::branch::{BranchValue, SelectorId};
use super::checklist::ChecklistKey;
use super::render;
use super::state::SessionState;

/// Result of a forward move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Advance {
    Moved { from: StepId, to: StepId },
    /// Already on the final step; nothing changed.
    AtEnd,
}

/// Result of a backward move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Retreat {
    Moved { from: StepId, to: StepId },
    /// Already on the first step; nothing changed.
    AtStart,
}

/// Owns one call's [`SessionState`] and enforces its invariants.
#[derive(Debug, Clone)]
pub struct Wizard {
    state: SessionState,
    /// Whether resetting before the final step needs explicit confirmation.
    confirm_reset: bool,
}

impl Default for Wizard {
    fn default() -> Self {
        Self::new()
    }
}

impl Wizard {
    pub fn new() -> Self {
        Self {
            state: SessionState::default(),
            confirm_reset: true,
        }
    }

    pub fn with_reset_confirmation(mut self, required: bool) -> Self {
        self.confirm_reset = required;
        self
    }

    // ── Read accessors ──────────────────────────────────────────────────

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn current_step(&self) -> StepId {
        self.state.step_id()
    }

    pub fn current_phase(&self) -> Phase {
        self.state.current_phase()
    }

    pub fn all_true(&self) -> bool {
        self.state.checklist.all_true()
    }

    /// Whether `advance` would currently be refused by the checklist gate.
    pub fn is_blocked(&self) -> bool {
        self.current_step() == GATED_STEP && !self.all_true()
    }

    /// Whether `reset(false)` would be refused right now.
    pub fn reset_needs_confirmation(&self) -> bool {
        self.confirm_reset && !self.state.is_final_step()
    }

    /// Screen for the current step and branch values.
    pub fn screen(&self) -> Screen {
        render::render(self.current_step(), &self.state.branches)
    }

    // ── Transitions ─────────────────────────────────────────────────────

    /// Move forward one step.
    ///
    /// Leaving the health questions needs every checklist item ticked. On the
    /// final step this is a no-op.
    pub fn advance(&mut self) -> Result<Advance, WizardError> {
        let from = self.current_step();
        if self.is_blocked() {
            let missing = self.state.checklist.missing();
            debug!(
                session_id = %self.state.session_id,
                step = %from,
                missing = missing.len(),
                "Advance blocked by checklist"
            );
            return Err(WizardError::GateBlocked { missing });
        }
        if self.state.is_final_step() {
            return Ok(Advance::AtEnd);
        }
        self.state.current_step_index += 1;
        let to = self.current_step();
        info!(session_id = %self.state.session_id, %from, %to, "Advanced");
        Ok(Advance::Moved { from, to })
    }

    /// Move back one step. Branch values and the checklist are kept.
    pub fn retreat(&mut self) -> Retreat {
        if self.state.current_step_index == 0 {
            return Retreat::AtStart;
        }
        let from = self.current_step();
        self.state.current_step_index -= 1;
        let to = self.current_step();
        info!(session_id = %self.state.session_id, %from, %to, "Retreated");
        Retreat::Moved { from, to }
    }

    /// Discard the call and start over with a fresh session.
    ///
    /// Before the final step this needs `confirmed` (unless confirmation is
    /// turned off).
    pub fn reset(&mut self, confirmed: bool) -> Result<(), WizardError> {
        if self.reset_needs_confirmation() && !confirmed {
            debug!(
                session_id = %self.state.session_id,
                step = %self.current_step(),
                "Reset refused without confirmation"
            );
            return Err(WizardError::ConfirmationRequired);
        }
        let previous = self.state.session_id;
        self.state = SessionState::default();
        info!(
            previous_session_id = %previous,
            session_id = %self.state.session_id,
            "Session reset"
        );
        Ok(())
    }

    /// Record a branch choice and move on.
    ///
    /// Only allowed on the selector's own step. Choosing again after stepping
    /// back overwrites the earlier value.
    pub fn select(&mut self, selector: SelectorId, value: BranchValue) -> Result<Advance, WizardError> {
        if !selector.accepts(value) {
            return Err(WizardError::InvalidBranchValue {
                selector,
                value: value.to_string(),
            });
        }
        let step = self.current_step();
        if step != selector.step() {
            return Err(WizardError::SelectorNotActive { selector, step });
        }
        self.state.branches.set(value);
        info!(session_id = %self.state.session_id, %selector, %value, "Branch selected");
        self.advance()
    }

    /// Flip one checklist item; returns its new value.
    pub fn toggle(&mut self, key: ChecklistKey) -> bool {
        let checked = self.state.checklist.toggle(key);
        debug!(session_id = %self.state.session_id, %key, checked, "Checklist toggled");
        checked
    }

    /// Show an objection rebuttal, replacing any already shown.
    pub fn open(&mut self, objection: ObjectionId) {
        debug!(session_id = %self.state.session_id, %objection, "Objection opened");
        self.state.active_objection = Some(objection);
    }

    pub fn close(&mut self) {
        self.state.active_objection = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wizard::branch::{HealthVerdict, TransferType};

    fn check_all(wizard: &mut Wizard) {
        for key in ChecklistKey::ALL {
            if !wizard.state().checklist().is_checked(key) {
                wizard.toggle(key);
            }
        }
    }

    /// Drive a fresh wizard to `target`, ticking the checklist on the way.
    fn wizard_at(target: StepId) -> Wizard {
        let mut wizard = Wizard::new();
        while wizard.current_step() != target {
            match wizard.current_step() {
                StepId::Setup => {
                    wizard.select(SelectorId::TransferType, BranchValue::Warm).unwrap();
                }
                StepId::VerdictSelect => {
                    wizard
                        .select(SelectorId::HealthVerdict, BranchValue::Healthy)
                        .unwrap();
                }
                StepId::HealthQuestions => {
                    check_all(&mut wizard);
                    wizard.advance().unwrap();
                }
                _ => {
                    wizard.advance().unwrap();
                }
            }
        }
        wizard
    }

    #[test]
    fn advance_moves_one_step() {
        let mut wizard = Wizard::new();
        assert_eq!(
            wizard.advance().unwrap(),
            Advance::Moved {
                from: StepId::Setup,
                to: StepId::Intro
            }
        );
        assert_eq!(wizard.state().current_step_index(), 1);
    }

    #[test]
    fn advance_at_end_is_noop() {
        let mut wizard = wizard_at(StepId::Pivot);
        let before = wizard.state().clone();
        assert_eq!(wizard.advance().unwrap(), Advance::AtEnd);
        assert_eq!(wizard.state(), &before);
    }

    #[test]
    fn retreat_at_start_is_noop() {
        let mut wizard = Wizard::new();
        assert_eq!(wizard.retreat(), Retreat::AtStart);
        assert_eq!(wizard.state().current_step_index(), 0);
    }

    #[test]
    fn index_stays_in_bounds_under_any_walk() {
        let mut wizard = Wizard::new();
        check_all(&mut wizard);
        // Deterministic pseudo-random walk.
        let mut seed: u32 = 0x2545_f491;
        for _ in 0..500 {
            seed ^= seed << 13;
            seed ^= seed >> 17;
            seed ^= seed << 5;
            if seed % 3 == 0 {
                wizard.retreat();
            } else {
                wizard.advance().unwrap();
            }
            assert!(wizard.state().current_step_index() < crate::script::catalog::step_count());
        }
    }

    #[test]
    fn gate_blocks_until_all_checked() {
        let mut wizard = wizard_at(StepId::HealthQuestions);
        for key in ChecklistKey::ALL {
            let err = wizard.advance().unwrap_err();
            assert!(matches!(err, WizardError::GateBlocked { .. }));
            assert_eq!(wizard.current_step(), StepId::HealthQuestions);
            wizard.toggle(key);
        }
        assert_eq!(
            wizard.advance().unwrap(),
            Advance::Moved {
                from: StepId::HealthQuestions,
                to: StepId::ValueStack
            }
        );
    }

    #[test]
    fn unchecking_one_item_blocks_again() {
        let mut wizard = wizard_at(StepId::HealthQuestions);
        check_all(&mut wizard);
        wizard.toggle(ChecklistKey::Oxygen);
        assert_eq!(
            wizard.advance().unwrap_err(),
            WizardError::GateBlocked {
                missing: vec![ChecklistKey::Oxygen]
            }
        );
        assert!(wizard.is_blocked());
    }

    #[test]
    fn gate_ignored_on_other_steps() {
        let mut wizard = wizard_at(StepId::Motivation);
        assert!(!wizard.all_true());
        assert!(!wizard.is_blocked());
        wizard.advance().unwrap();
        assert_eq!(wizard.current_step(), StepId::DebtReality);
    }

    #[test]
    fn retreat_then_advance_restores_step_and_screen() {
        for target in [StepId::Intro, StepId::ValueStack, StepId::VerdictReveal, StepId::Pivot] {
            let mut wizard = wizard_at(target);
            let screen = wizard.screen();
            wizard.retreat();
            wizard.advance().unwrap();
            assert_eq!(wizard.current_step(), target);
            assert_eq!(wizard.screen(), screen);
        }
    }

    #[test]
    fn retreat_keeps_branches_and_checklist() {
        let mut wizard = wizard_at(StepId::VerdictReveal);
        while wizard.retreat() != Retreat::AtStart {}
        assert_eq!(wizard.state().transfer_type(), Some(TransferType::Warm));
        assert_eq!(wizard.state().health_verdict(), Some(HealthVerdict::Healthy));
        assert!(wizard.all_true());
    }

    #[test]
    fn select_sets_value_and_advances() {
        let mut wizard = Wizard::new();
        let outcome = wizard
            .select(SelectorId::TransferType, BranchValue::Blind)
            .unwrap();
        assert_eq!(
            outcome,
            Advance::Moved {
                from: StepId::Setup,
                to: StepId::Intro
            }
        );
        assert_eq!(wizard.state().transfer_type(), Some(TransferType::Blind));
        assert_eq!(wizard.screen().card_titles(), vec!["Scenario A: Blind Transfer"]);
    }

    #[test]
    fn select_rejects_foreign_value() {
        let mut wizard = Wizard::new();
        let err = wizard
            .select(SelectorId::TransferType, BranchValue::Healthy)
            .unwrap_err();
        assert_eq!(
            err,
            WizardError::InvalidBranchValue {
                selector: SelectorId::TransferType,
                value: "healthy".into()
            }
        );
        assert_eq!(wizard.current_step(), StepId::Setup);
        assert!(wizard.state().transfer_type().is_none());
    }

    #[test]
    fn select_rejected_off_its_step() {
        let mut wizard = wizard_at(StepId::Motivation);
        let before = wizard.state().clone();
        let err = wizard
            .select(SelectorId::HealthVerdict, BranchValue::Healthy)
            .unwrap_err();
        assert_eq!(
            err,
            WizardError::SelectorNotActive {
                selector: SelectorId::HealthVerdict,
                step: StepId::Motivation
            }
        );
        assert_eq!(wizard.state(), &before);
    }

    #[test]
    fn reselect_after_stepping_back_overwrites() {
        let mut wizard = wizard_at(StepId::Intro);
        wizard.retreat();
        wizard.select(SelectorId::TransferType, BranchValue::Blind).unwrap();
        assert_eq!(wizard.state().transfer_type(), Some(TransferType::Blind));
        assert_eq!(wizard.current_step(), StepId::Intro);
    }

    #[test]
    fn reset_needs_confirmation_mid_call() {
        let mut wizard = wizard_at(StepId::DebtReality);
        let before = wizard.state().clone();
        assert_eq!(wizard.reset(false), Err(WizardError::ConfirmationRequired));
        assert_eq!(wizard.state(), &before);

        wizard.reset(true).unwrap();
        assert!(wizard.state().same_progress(&SessionState::default()));
        assert_ne!(wizard.state().session_id(), before.session_id());
    }

    #[test]
    fn reset_on_final_step_needs_no_confirmation() {
        let mut wizard = wizard_at(StepId::Pivot);
        wizard.open(ObjectionId::MailInfo);
        wizard.reset(false).unwrap();
        let state = wizard.state();
        assert_eq!(state.current_step_index(), 0);
        assert!(state.transfer_type().is_none());
        assert!(state.health_verdict().is_none());
        assert_eq!(state.checklist().missing(), ChecklistKey::ALL.to_vec());
        assert!(state.active_objection().is_none());
    }

    #[test]
    fn reset_confirmation_can_be_disabled() {
        let mut wizard = Wizard::new().with_reset_confirmation(false);
        wizard.advance().unwrap();
        assert!(!wizard.reset_needs_confirmation());
        wizard.reset(false).unwrap();
        assert_eq!(wizard.current_step(), StepId::Setup);
    }

    #[test]
    fn objection_replaces_and_closes() {
        let mut wizard = wizard_at(StepId::Goldilocks);
        wizard.open(ObjectionId::TooExpensive);
        wizard.open(ObjectionId::TalkToKids);
        assert_eq!(wizard.state().active_objection(), Some(ObjectionId::TalkToKids));
        assert_eq!(wizard.current_step(), StepId::Goldilocks);
        wizard.close();
        assert!(wizard.state().active_objection().is_none());
    }

    #[test]
    fn objection_survives_navigation() {
        let mut wizard = Wizard::new();
        wizard.open(ObjectionId::ThinkAboutIt);
        wizard.advance().unwrap();
        wizard.retreat();
        assert_eq!(wizard.state().active_objection(), Some(ObjectionId::ThinkAboutIt));
    }

    #[test]
    fn full_call_walkthrough() {
        let mut wizard = Wizard::new();

        wizard.select(SelectorId::TransferType, BranchValue::Warm).unwrap();
        assert_eq!(wizard.current_step(), StepId::Intro);
        assert_eq!(wizard.screen().card_titles(), vec!["Scenario B: Warm Transfer"]);

        for expected in [StepId::Motivation, StepId::DebtReality, StepId::HealthQuestions] {
            wizard.advance().unwrap();
            assert_eq!(wizard.current_step(), expected);
        }

        assert!(wizard.advance().is_err());
        for key in ChecklistKey::ALL {
            wizard.toggle(key);
        }
        wizard.advance().unwrap();
        assert_eq!(wizard.current_step(), StepId::ValueStack);

        wizard.advance().unwrap();
        wizard.advance().unwrap();
        assert_eq!(wizard.current_step(), StepId::VerdictSelect);

        wizard
            .select(SelectorId::HealthVerdict, BranchValue::Healthy)
            .unwrap();
        assert_eq!(wizard.current_step(), StepId::VerdictReveal);
        assert!(wizard
            .screen()
            .card_titles()
            .contains(&"Healthy Pivot: 'The Reward'"));

        while let Advance::Moved { .. } = wizard.advance().unwrap() {}
        assert_eq!(wizard.current_step(), StepId::Pivot);

        wizard.reset(false).unwrap();
        assert!(wizard.state().same_progress(&SessionState::default()));
    }
}
