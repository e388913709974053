//! Step and phase catalogs: the fixed shape of a call.

use serde::{Deserialize, Serialize};

use crate::error::WizardError;

/// One screen of the call, in traversal order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepId {
    Setup,
    Intro,
    Motivation,
    DebtReality,
    HealthQuestions,
    ValueStack,
    BudgetAnchor,
    VerdictSelect,
    VerdictReveal,
    Goldilocks,
    Close,
    Pivot,
}

/// Named grouping of consecutive steps, used for progress display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PhaseId {
    Setup,
    Opening,
    Discovery,
    Health,
    Mandate,
    Verdict,
    Presentation,
    Close,
}

/// Symbol shown next to a phase in the progress list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Icon {
    Phone,
    User,
    AlertTriangle,
    Heart,
    DollarSign,
    CheckCircle,
    Award,
    Shield,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Step {
    pub id: StepId,
    /// Index into [`PHASES`].
    pub phase: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Phase {
    pub id: PhaseId,
    pub title: &'static str,
    pub icon: Icon,
}

pub const STEPS: [Step; 12] = [
    Step { id: StepId::Setup, phase: 0 },
    Step { id: StepId::Intro, phase: 1 },
    Step { id: StepId::Motivation, phase: 2 },
    Step { id: StepId::DebtReality, phase: 2 },
    Step { id: StepId::HealthQuestions, phase: 3 },
    Step { id: StepId::ValueStack, phase: 3 },
    Step { id: StepId::BudgetAnchor, phase: 4 },
    Step { id: StepId::VerdictSelect, phase: 5 },
    Step { id: StepId::VerdictReveal, phase: 5 },
    Step { id: StepId::Goldilocks, phase: 6 },
    Step { id: StepId::Close, phase: 6 },
    Step { id: StepId::Pivot, phase: 7 },
];

pub const PHASES: [Phase; 8] = [
    Phase { id: PhaseId::Setup, title: "Setup", icon: Icon::Phone },
    Phase { id: PhaseId::Opening, title: "Opening", icon: Icon::User },
    Phase { id: PhaseId::Discovery, title: "Discovery", icon: Icon::AlertTriangle },
    Phase { id: PhaseId::Health, title: "Health", icon: Icon::Heart },
    Phase { id: PhaseId::Mandate, title: "Mandate", icon: Icon::DollarSign },
    Phase { id: PhaseId::Verdict, title: "Verdict", icon: Icon::CheckCircle },
    Phase { id: PhaseId::Presentation, title: "Presentation", icon: Icon::Award },
    Phase { id: PhaseId::Close, title: "Close", icon: Icon::Shield },
];

/// The step whose exit is gated on the health checklist.
pub const GATED_STEP: StepId = StepId::HealthQuestions;

pub fn step_count() -> usize {
    STEPS.len()
}

pub fn step_at(index: usize) -> Option<Step> {
    STEPS.get(index).copied()
}

pub fn phase_at(index: usize) -> Option<Phase> {
    PHASES.get(index).copied()
}

impl StepId {
    /// Position of this step in the call.
    pub fn index(self) -> usize {
        // STEPS is declared in variant order.
        self as usize
    }

    /// Index of the phase this step belongs to.
    pub fn phase(self) -> usize {
        STEPS[self.index()].phase
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Setup => "setup",
            Self::Intro => "intro",
            Self::Motivation => "motivation",
            Self::DebtReality => "debt_reality",
            Self::HealthQuestions => "health_questions",
            Self::ValueStack => "value_stack",
            Self::BudgetAnchor => "budget_anchor",
            Self::VerdictSelect => "verdict_select",
            Self::VerdictReveal => "verdict_reveal",
            Self::Goldilocks => "goldilocks",
            Self::Close => "close",
            Self::Pivot => "pivot",
        }
    }
}

impl std::fmt::Display for StepId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for StepId {
    type Err = WizardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        STEPS
            .iter()
            .map(|step| step.id)
            .find(|id| id.as_str() == s)
            .ok_or_else(|| WizardError::UnknownStep(s.to_string()))
    }
}

impl std::fmt::Display for PhaseId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Setup => "setup",
            Self::Opening => "opening",
            Self::Discovery => "discovery",
            Self::Health => "health",
            Self::Mandate => "mandate",
            Self::Verdict => "verdict",
            Self::Presentation => "presentation",
            Self::Close => "close",
        };
        write!(f, "{s}")
    }
}
