//! Checklist gate: five required health questions.

use serde::{Deserialize, Serialize};

use crate::error::WizardError;

/// A required health question. The set is fixed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChecklistKey {
    Meds,
    Cancer,
    Hospital,
    Oxygen,
    Tobacco,
}

impl ChecklistKey {
    pub const ALL: [ChecklistKey; 5] = [
        Self::Meds,
        Self::Cancer,
        Self::Hospital,
        Self::Oxygen,
        Self::Tobacco,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Meds => "meds",
            Self::Cancer => "cancer",
            Self::Hospital => "hospital",
            Self::Oxygen => "oxygen",
            Self::Tobacco => "tobacco",
        }
    }

    fn slot(self) -> usize {
        self as usize
    }
}

impl std::fmt::Display for ChecklistKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ChecklistKey {
    type Err = WizardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| WizardError::UnknownChecklistKey(s.to_string()))
    }
}

/// Five independent flags, all unchecked at session start.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Checklist {
    checked: [bool; 5],
}

impl Checklist {
    /// Flip one flag and return its new value.
    pub fn toggle(&mut self, key: ChecklistKey) -> bool {
        let flag = &mut self.checked[key.slot()];
        *flag = !*flag;
        *flag
    }

    pub fn is_checked(&self, key: ChecklistKey) -> bool {
        self.checked[key.slot()]
    }

    pub fn all_true(&self) -> bool {
        self.checked.iter().all(|c| *c)
    }

    /// Unchecked keys, in question order.
    pub fn missing(&self) -> Vec<ChecklistKey> {
        ChecklistKey::ALL
            .into_iter()
            .filter(|k| !self.is_checked(*k))
            .collect()
    }
}

// Serialized as a `{ "meds": bool, ... }` map so clients can address flags by name.
impl Serialize for Checklist {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;
        let mut map = serializer.serialize_map(Some(ChecklistKey::ALL.len()))?;
        for key in ChecklistKey::ALL {
            map.serialize_entry(key.as_str(), &self.is_checked(key))?;
        }
        map.end()
    }
}
