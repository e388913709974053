//! Script content table: what each screen shows.
//!
//! Content is opaque to the sequencer: the renderer hands these descriptors to
//! the presentation layer unmodified. Placeholders like `[Name]` are filled in
//! by the agent while reading.

use serde::Serialize;

use crate::script::catalog::StepId;
use crate::wizard::branch::{BranchValue, HealthVerdict, SelectorId, TransferType};
use crate::wizard::checklist::ChecklistKey;

/// Visual weight of a card or notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Tone {
    Standard,
    Warning,
    Success,
    Critical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Layout {
    /// Centered choice screen with large buttons.
    Choice,
    /// Column of script cards.
    Script,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Line {
    /// Spoken aloud.
    Say { text: &'static str },
    /// Stage direction, not read out.
    Cue { text: &'static str },
    /// Spoken aloud, with weight.
    Emphasis { text: &'static str },
    Bullet {
        #[serde(skip_serializing_if = "Option::is_none")]
        lead: Option<&'static str>,
        text: &'static str,
    },
    Option { label: &'static str, text: &'static str },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScriptCard {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<&'static str>,
    pub tone: Tone,
    pub lines: Vec<Line>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Choice {
    pub value: BranchValue,
    pub label: &'static str,
    pub hint: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChecklistPrompt {
    pub key: ChecklistKey,
    pub question: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
    Card(ScriptCard),
    Choices {
        selector: SelectorId,
        options: Vec<Choice>,
    },
    Checklist {
        items: Vec<ChecklistPrompt>,
    },
    Notice {
        tone: Tone,
        #[serde(skip_serializing_if = "Option::is_none")]
        label: Option<&'static str>,
        text: &'static str,
    },
}

/// Everything shown for one step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Screen {
    pub step: StepId,
    pub layout: Layout,
    pub heading: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subheading: Option<&'static str>,
    pub blocks: Vec<Block>,
}

impl ScriptCard {
    /// Card text as it would land on the clipboard.
    pub fn plain_text(&self) -> String {
        self.lines
            .iter()
            .map(|line| match line {
                Line::Say { text } | Line::Cue { text } | Line::Emphasis { text } => {
                    (*text).to_string()
                }
                Line::Bullet { lead: Some(lead), text } => format!("- {lead} {text}"),
                Line::Bullet { lead: None, text } => format!("- {text}"),
                Line::Option { label, text } => format!("{label}: {text}"),
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl Screen {
    /// Script cards on this screen, in display order.
    pub fn cards(&self) -> impl Iterator<Item = &ScriptCard> {
        self.blocks.iter().filter_map(|block| match block {
            Block::Card(card) => Some(card),
            _ => None,
        })
    }

    pub fn card(&self, index: usize) -> Option<&ScriptCard> {
        self.cards().nth(index)
    }

    /// Titles of the titled cards, in display order.
    pub fn card_titles(&self) -> Vec<&'static str> {
        self.cards().filter_map(|c| c.title).collect()
    }
}

// ── Builders ────────────────────────────────────────────────────────────

fn say(text: &'static str) -> Line {
    Line::Say { text }
}

fn cue(text: &'static str) -> Line {
    Line::Cue { text }
}

fn emphasis(text: &'static str) -> Line {
    Line::Emphasis { text }
}

fn card(title: Option<&'static str>, tone: Tone, lines: Vec<Line>) -> Block {
    Block::Card(ScriptCard { title, tone, lines })
}

fn script(step: StepId, heading: &'static str, blocks: Vec<Block>) -> Screen {
    Screen {
        step,
        layout: Layout::Script,
        heading,
        subheading: None,
        blocks,
    }
}

// ── Screens ─────────────────────────────────────────────────────────────

pub fn setup() -> Screen {
    Screen {
        step: StepId::Setup,
        layout: Layout::Choice,
        heading: "Select Transfer Type",
        subheading: None,
        blocks: vec![
            Block::Choices {
                selector: SelectorId::TransferType,
                options: vec![
                    Choice {
                        value: BranchValue::Blind,
                        label: "Blind Transfer",
                        hint: "Fronter drops off immediately.",
                    },
                    Choice {
                        value: BranchValue::Warm,
                        label: "Warm Transfer",
                        hint: "Fronter introduces you.",
                    },
                ],
            },
            Block::Notice {
                tone: Tone::Critical,
                label: Some("Forbidden Phrases"),
                text: "NEVER say \"How are you?\" or \"How may I help you?\"",
            },
        ],
    }
}

pub fn intro(transfer_type: Option<TransferType>) -> Screen {
    let opening = match transfer_type {
        Some(TransferType::Blind) => card(
            Some("Scenario A: Blind Transfer"),
            Tone::Standard,
            vec![
                cue("(Fronter connects call...)"),
                say("\"Hi, this is [Your Name]. Whom do I have the pleasure of speaking with?\""),
                cue("[WAIT FOR NAME. Do not ask to spell it.]"),
                say("\"Pleasure to meet you, [Name]. I appreciate you holding. The previous agent just transferred you to me because I’m the local licensed specialist for [State]. They mentioned you’re [Age] and living in [City], right?\""),
                say("\"Okay, great. Now [Name], I know you didn't wake up this morning expecting to hear from me—we called you. But since I have you on the line, my job is pretty simple — I'll ask you a few quick questions, show you exactly what you qualify for, and then you decide if it makes sense."),
                emphasis("Fair enough?\""),
            ],
        ),
        // Unset falls through to the warm script.
        Some(TransferType::Warm) | None => card(
            Some("Scenario B: Warm Transfer"),
            Tone::Standard,
            vec![
                cue("(To Fronter):"),
                say("\"Thanks [Fronter Name], I see the file here. I'll take it from here.\""),
                cue("(To Prospect):"),
                say("\"Hi [Prospect Name], this is [Your Name], the licensed specialist for [State]. I appreciate your patience while they got us connected. [Fronter Name] got me up to speed—they mentioned you're [Age] and looking to make sure the family isn't stuck with a bill, is that right?\""),
                say("\"Perfect. Like I said, I'm the specialist for the area. My job is simple—I'll ask a few quick questions to see if you qualify for the state-regulated benefits. If you do, I'll show you the numbers. If not, I'll tell you that too."),
                emphasis("Fair enough?\""),
            ],
        ),
    };
    script(StepId::Intro, "The Opening", vec![opening])
}

pub fn motivation() -> Screen {
    script(
        StepId::Motivation,
        "The Motivation Check",
        vec![card(
            Some("Dig Deep"),
            Tone::Standard,
            vec![
                say("\"Great. So [Name], when you were speaking with the other agent, you mentioned you wanted to make sure your family isn't stuck dealing with any final expenses when that time comes."),
                emphasis("Is that still the main thing on your mind, or is there something else driving this for you?\""),
                cue("(Listen to response)"),
                say("\"I appreciate you sharing that. You know, a lot of the folks I talk to—they're not worried about themselves. They've lived their life. What keeps them up at night is the thought of their kids or grandkids having to scramble to come up with $10,000 or $15,000 just to lay them to rest properly."),
                emphasis("Does that resonate with you at all?\""),
            ],
        )],
    )
}

pub fn debt_reality() -> Screen {
    script(
        StepId::DebtReality,
        "The Reality of Debt",
        vec![
            card(
                Some("Identify the Beneficiary"),
                Tone::Standard,
                vec![
                    say("\"Perfect. So, If you didn't wake up tomorrow morning... who is the one person that would have to pick up the phone and handle everything?\""),
                    cue("(Wait for name, e.g., 'Sarah')"),
                    say("\"Sarah. Okay. Now, [Name], most people don't realize that funeral homes are businesses. They generally require the full $10,000 to $15,000 upfront before they will even open the doors.\""),
                ],
            ),
            card(
                Some("The Pain Question"),
                Tone::Critical,
                vec![
                    emphasis("\"Knowing Sarah's financial situation... is she in a position to write a check that big on a Tuesday morning?\""),
                    cue("(Wait for 'No')"),
                    say("\"Ok. Sarah would have to come up with that money somehow. How would that affect her? Would she have to borrow it? Go into debt?\""),
                ],
            ),
            card(
                Some("The Bridge"),
                Tone::Success,
                vec![
                    say("\"That’s exactly why we're talking. We want to make sure Sarah gets a check, not a bill. My goal is to set this up so she never has to worry about the money."),
                    emphasis("Does that sound like what you want to accomplish?\""),
                ],
            ),
        ],
    )
}

/// Question text for each checklist item.
pub fn checklist_question(key: ChecklistKey) -> &'static str {
    match key {
        ChecklistKey::Meds => "\"Are you currently taking any medications for your heart—like blood thinners, or anything for cholesterol or blood pressure?\"",
        ChecklistKey::Cancer => "\"Any history of cancer, stroke, or diabetes?\"",
        ChecklistKey::Hospital => "\"Have you been hospitalized for anything in the last two years?\"",
        ChecklistKey::Oxygen => "\"Do you use any oxygen equipment or have any issues with your lungs?\"",
        ChecklistKey::Tobacco => "\"Do you smoke or use tobacco?\"",
    }
}

pub fn health_questions() -> Screen {
    script(
        StepId::HealthQuestions,
        "Health Discovery",
        vec![
            card(
                None,
                Tone::Standard,
                vec![say("\"Alright, so here's what I want to do. I'm going to ask you a few quick health questions—nothing invasive—just so I can match you with the right program and make sure you're not overpaying. Sound good?\"")],
            ),
            Block::Checklist {
                items: ChecklistKey::ALL
                    .into_iter()
                    .map(|key| ChecklistPrompt {
                        key,
                        question: checklist_question(key),
                    })
                    .collect(),
            },
        ],
    )
}

pub fn value_stack() -> Screen {
    script(
        StepId::ValueStack,
        "The Value Stack",
        vec![
            card(
                Some("The Good News"),
                Tone::Success,
                vec![say("\"Good news, [Name]—based on what you've told me, you qualify for our [Plan Tier] program. Let me tell you exactly what that means for you.\"")],
            ),
            card(
                Some("3 Key Benefits"),
                Tone::Standard,
                vec![
                    say("\"So here's what you're looking at. This is a whole life insurance policy—not term, whole life. That means a few important things:\""),
                    Line::Bullet { lead: Some("First, your rate is locked in."), text: "The price I give you today will never go up. Even if your health changes." },
                    Line::Bullet { lead: Some("Second, the benefit is guaranteed."), text: "There's no fine print. When that time comes, Sarah receives the full amount, tax-free, usually within 24 to 48 hours." },
                    Line::Bullet { lead: Some("Third, this is 'Day One' coverage."), text: "That means the full benefit is available immediately. No waiting period." },
                ],
            ),
        ],
    )
}

pub fn budget_anchor() -> Screen {
    script(
        StepId::BudgetAnchor,
        "The Mandate",
        vec![
            card(
                None,
                Tone::Standard,
                vec![
                    say("\"Okay. Based on what you've told me, I'm going to run a comparison across the top state-approved carriers. I'm filtering strictly for the 'Rate Lock' programs.\""),
                    say("\"Most folks on a fixed income tell me they want to keep this between $50 and $80 a month.\""),
                ],
            ),
            card(
                Some("The Takeaway (Crucial)"),
                Tone::Warning,
                vec![
                    emphasis("\"If I find the right plan but it comes back at $150 a month, are you going to kick me off the phone?\""),
                    cue("(Wait for laugh/agreement)"),
                    say("\"I figured. Let me pull the numbers now. Hold on.\""),
                ],
            ),
            Block::Notice {
                tone: Tone::Standard,
                label: None,
                text: "Silence for 10-15 seconds (Actually quote)",
            },
        ],
    )
}

pub fn verdict_select() -> Screen {
    Screen {
        step: StepId::VerdictSelect,
        layout: Layout::Choice,
        heading: "The Verdict",
        subheading: Some("You have analyzed the carriers. Based on their health, which path do we take?"),
        blocks: vec![Block::Choices {
            selector: SelectorId::HealthVerdict,
            options: vec![
                Choice {
                    value: BranchValue::Healthy,
                    label: "Client is Healthy",
                    hint: "They qualify for Preferred rates. Pivot to \"Reward\".",
                },
                Choice {
                    value: BranchValue::Unhealthy,
                    label: "Health Issues",
                    hint: "They have conditions (Diabetes, BP, etc). Pivot to \"Leniency\".",
                },
            ],
        }],
    }
}

pub fn verdict_reveal(health_verdict: Option<HealthVerdict>) -> Screen {
    let pivot = match health_verdict {
        Some(HealthVerdict::Healthy) => card(
            Some("Healthy Pivot: 'The Reward'"),
            Tone::Success,
            vec![
                say("\"The reason I picked them is simple:"),
                emphasis("Because you are in such good health for your age, they are rewarding you with their 'Preferred Standard Rate.'\""),
                say("\"Most carriers would try to charge you the normal price, but these guys are giving you the discount because you take care of yourself.\""),
            ],
        ),
        // Unset falls through to the leniency script.
        Some(HealthVerdict::Unhealthy) | None => card(
            Some("Issue Pivot: 'The Leniency'"),
            Tone::Warning,
            vec![
                say("\"The reason I picked them is simple:"),
                emphasis("They are the most lenient carrier regarding [Insert Condition].\""),
                say("\"Most companies would force you into a waiting period for that, but these guys are accepting you for the Immediate Payout from Day 1.\""),
            ],
        ),
    };
    script(
        StepId::VerdictReveal,
        "Expert Selection",
        vec![
            card(
                Some("The Choice"),
                Tone::Standard,
                vec![
                    say("\"Okay, I’ve got the comparison results. I’m looking at the top three carriers available in [State].\""),
                    emphasis("\"Looking at the hard numbers... [Carrier Name] is the clear winner for your situation.\""),
                ],
            ),
            pivot,
            card(
                None,
                Tone::Standard,
                vec![emphasis("\"So if God forbid something happens next week, Sarah gets the full check tax-free. That’s the most important part, right?\"")],
            ),
        ],
    )
}

pub fn goldilocks() -> Screen {
    script(
        StepId::Goldilocks,
        "Goldilocks Presentation",
        vec![card(
            Some("Choice Architecture"),
            Tone::Standard,
            vec![
                say("\"So, I’ve got three ways we can set this up for Sarah. You tell me which one feels right.\""),
                Line::Option {
                    label: "OPTION 1: Full Legacy",
                    text: "\"This creates a $15,000 safety net. It pays for the funeral, the stone, and leaves Sarah about $5,000 extra. That one is $XX a month.\"",
                },
                Line::Option {
                    label: "OPTION 2: Debt-Free (Recommended)",
                    text: "\"This gives her $10,000. It covers the funeral completely so she doesn't pay a dime out of pocket. That one is $XX a month.\"",
                },
                Line::Option {
                    label: "OPTION 3: Starter",
                    text: "\"It’s $7,000. It covers the cremation and the basics, but there won't be much left over. That is $XX a month.\"",
                },
            ],
        )],
    )
}

pub fn close() -> Screen {
    script(
        StepId::Close,
        "The Trade-Off Close",
        vec![
            card(
                Some("The Question"),
                Tone::Standard,
                vec![
                    cue("(Lower voice, casual tone)"),
                    emphasis("\"Looking at those three... do you want to leave her the extra cushion with the $15,000, or does the $10,000 feel like a better fit for the budget right now?\""),
                ],
            ),
            Block::Notice {
                tone: Tone::Warning,
                label: Some("Psychology"),
                text: "Notice we didn't ask \"Do you want to buy it?\". We asked \"Which one protects her best?\". This assumes the sale.",
            },
        ],
    )
}

pub fn pivot() -> Screen {
    script(
        StepId::Pivot,
        "The Checkbook Pivot",
        vec![
            card(
                Some("Transition"),
                Tone::Standard,
                vec![
                    cue("(Client picks $10,000)"),
                    say("\"Good choice. That’s exactly the one I would have recommended. It gets the job done without breaking the bank.\""),
                    say("\"Now, we need to make sure this money goes to Sarah and nobody else. I need to ask you the formal health questions for the recording to get you approved.\""),
                ],
            ),
            card(
                Some("The Banking Details"),
                Tone::Critical,
                vec![
                    say("\"Perfect. You passed with flying colors. Now, the last thing is setting up the start date. Most folks like the premiums to come out on the 1st or the 3rd to match their Social Security. Which day is better for you?\""),
                    cue("(Client picks 3rd)"),
                    say("\"Okay, the 3rd it is. And do you bank with a big bank like Chase or Wells Fargo, or a local credit union?\""),
                    cue("(Client responds)"),
                    emphasis("\"Okay, perfect. Grab your checkbook really quick—I need to get the 9-digit routing number off the bottom so the insurance company knows exactly which bank to verify. I'll hold on while you grab it.\""),
                ],
            ),
            Block::Notice {
                tone: Tone::Success,
                label: None,
                text: "🎉 SCRIPT COMPLETE",
            },
        ],
    )
}
