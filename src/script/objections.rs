//! Canned rebuttals for common objections.

use serde::{Deserialize, Serialize};

use crate::error::WizardError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObjectionId {
    TooExpensive,
    ThinkAboutIt,
    TalkToKids,
    MailInfo,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Objection {
    pub id: ObjectionId,
    /// What the prospect said.
    pub label: &'static str,
    /// What the agent says back.
    pub response: &'static str,
}

pub const OBJECTIONS: [Objection; 4] = [
    Objection {
        id: ObjectionId::TooExpensive,
        label: "It's too expensive",
        response: "I totally understand. Most of our clients are on a fixed income, so we have to be careful. But let me ask you—is it that you can't afford the $XX right now, or is it that you're just not sure if it's worth that amount?",
    },
    Objection {
        id: ObjectionId::ThinkAboutIt,
        label: "I need to think about it",
        response: "That's fair. But let me ask—what specifically is it that you need to think over? Is it the monthly amount, or is it who you want to leave the money to? usually when folks tell me that, it's just the price.",
    },
    Objection {
        id: ObjectionId::TalkToKids,
        label: "I need to talk to my kids",
        response: "I get that. But let me ask—if you told them you were buying this to protect them from a $15,000 bill, would they tell you NOT to do it? This is for them, not you. You're the one protecting them.",
    },
    Objection {
        id: ObjectionId::MailInfo,
        label: "Send me info by mail",
        response: "I wish I could, but these rates are state-regulated and change based on your exact age and health as of today. If I mail you something, it'll be wrong by the time you get it. My job is just to show you the accurate math right now. It takes 2 minutes.",
    },
];

impl ObjectionId {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::TooExpensive => "too_expensive",
            Self::ThinkAboutIt => "think_about_it",
            Self::TalkToKids => "talk_to_kids",
            Self::MailInfo => "mail_info",
        }
    }

    /// Look up by position in [`OBJECTIONS`].
    pub fn from_index(index: usize) -> Option<Self> {
        OBJECTIONS.get(index).map(|o| o.id)
    }

    pub fn entry(self) -> &'static Objection {
        // OBJECTIONS is declared in variant order.
        &OBJECTIONS[self as usize]
    }
}

impl std::fmt::Display for ObjectionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ObjectionId {
    type Err = WizardError;

    /// Accepts either the snake_case name or the catalog position.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Ok(index) = s.parse::<usize>() {
            return Self::from_index(index).ok_or_else(|| WizardError::UnknownObjection(s.to_string()));
        }
        OBJECTIONS
            .iter()
            .map(|o| o.id)
            .find(|id| id.as_str() == s)
            .ok_or_else(|| WizardError::UnknownObjection(s.to_string()))
    }
}
