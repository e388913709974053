//! Content renderer: maps the current step and branch values to a screen.

use crate::script::catalog::StepId;
use crate::script::content::{self, Screen};

use super::branch::Branches;

type ScreenFn = fn(&Branches) -> Screen;

/// One entry per step, in catalog order. Only `intro` and `verdict_reveal`
/// look at the branch values.
static SCREENS: [(StepId, ScreenFn); 12] = [
    (StepId::Setup, |_| content::setup()),
    (StepId::Intro, |b: &Branches| content::intro(b.transfer_type)),
    (StepId::Motivation, |_| content::motivation()),
    (StepId::DebtReality, |_| content::debt_reality()),
    (StepId::HealthQuestions, |_| content::health_questions()),
    (StepId::ValueStack, |_| content::value_stack()),
    (StepId::BudgetAnchor, |_| content::budget_anchor()),
    (StepId::VerdictSelect, |_| content::verdict_select()),
    (StepId::VerdictReveal, |b: &Branches| content::verdict_reveal(b.health_verdict)),
    (StepId::Goldilocks, |_| content::goldilocks()),
    (StepId::Close, |_| content::close()),
    (StepId::Pivot, |_| content::pivot()),
];

/// Pure: same inputs always give the same screen.
pub fn render(step: StepId, branches: &Branches) -> Screen {
    let (_, screen) = SCREENS[step.index()];
    screen(branches)
}
