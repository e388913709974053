//! Branch selectors: one-time choices that pick content variants later on.

use serde::{Deserialize, Serialize};

use crate::error::WizardError;
use crate::script::catalog::StepId;

/// How the prospect reached the agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransferType {
    /// Fronter drops off immediately.
    Blind,
    /// Fronter introduces the agent.
    Warm,
}

/// The agent's read on the prospect's health after the quote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HealthVerdict {
    Healthy,
    Unhealthy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectorId {
    TransferType,
    HealthVerdict,
}

/// Any value a selector can take. Each value belongs to exactly one selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BranchValue {
    Blind,
    Warm,
    Healthy,
    Unhealthy,
}

/// Current selector values, as read by the renderer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Branches {
    pub transfer_type: Option<TransferType>,
    pub health_verdict: Option<HealthVerdict>,
}

impl SelectorId {
    /// The only step on which this selector may be used.
    pub fn step(self) -> StepId {
        match self {
            Self::TransferType => StepId::Setup,
            Self::HealthVerdict => StepId::VerdictSelect,
        }
    }

    pub fn values(self) -> [BranchValue; 2] {
        match self {
            Self::TransferType => [BranchValue::Blind, BranchValue::Warm],
            Self::HealthVerdict => [BranchValue::Healthy, BranchValue::Unhealthy],
        }
    }

    pub fn accepts(self, value: BranchValue) -> bool {
        value.selector() == self
    }

    /// Parse a value name, rejecting names that belong to another selector.
    pub fn parse_value(self, s: &str) -> Result<BranchValue, WizardError> {
        self.values()
            .into_iter()
            .find(|v| v.as_str() == s)
            .ok_or_else(|| WizardError::InvalidBranchValue {
                selector: self,
                value: s.to_string(),
            })
    }
}

impl BranchValue {
    pub fn selector(self) -> SelectorId {
        match self {
            Self::Blind | Self::Warm => SelectorId::TransferType,
            Self::Healthy | Self::Unhealthy => SelectorId::HealthVerdict,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Blind => "blind",
            Self::Warm => "warm",
            Self::Healthy => "healthy",
            Self::Unhealthy => "unhealthy",
        }
    }
}

impl Branches {
    /// Store `value` in its selector's slot, replacing any earlier choice.
    pub fn set(&mut self, value: BranchValue) {
        match value {
            BranchValue::Blind => self.transfer_type = Some(TransferType::Blind),
            BranchValue::Warm => self.transfer_type = Some(TransferType::Warm),
            BranchValue::Healthy => self.health_verdict = Some(HealthVerdict::Healthy),
            BranchValue::Unhealthy => self.health_verdict = Some(HealthVerdict::Unhealthy),
        }
    }
}

impl std::fmt::Display for SelectorId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TransferType => write!(f, "transfer_type"),
            Self::HealthVerdict => write!(f, "health_verdict"),
        }
    }
}

impl std::str::FromStr for SelectorId {
    type Err = WizardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "transfer_type" => Ok(Self::TransferType),
            "health_verdict" => Ok(Self::HealthVerdict),
            _ => Err(WizardError::UnknownSelector(s.to_string())),
        }
    }
}

impl std::fmt::Display for BranchValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn each_value_belongs_to_one_selector() {
        for selector in [SelectorId::TransferType, SelectorId::HealthVerdict] {
            for value in selector.values() {
                assert!(selector.accepts(value));
                assert_eq!(value.selector(), selector);
            }
        }
        assert!(!SelectorId::TransferType.accepts(BranchValue::Healthy));
        assert!(!SelectorId::HealthVerdict.accepts(BranchValue::Warm));
    }

    #[test]
    fn parse_value_rejects_foreign_and_unknown() {
        assert_eq!(
            SelectorId::TransferType.parse_value("warm").unwrap(),
            BranchValue::Warm
        );
        assert_eq!(
            SelectorId::TransferType.parse_value("healthy"),
            Err(WizardError::InvalidBranchValue {
                selector: SelectorId::TransferType,
                value: "healthy".into(),
            })
        );
        assert!(SelectorId::HealthVerdict.parse_value("lukewarm").is_err());
    }

    #[test]
    fn set_overwrites_only_its_own_slot() {
        let mut branches = Branches::default();
        branches.set(BranchValue::Blind);
        branches.set(BranchValue::Unhealthy);
        branches.set(BranchValue::Warm);
        assert_eq!(branches.transfer_type, Some(TransferType::Warm));
        assert_eq!(branches.health_verdict, Some(HealthVerdict::Unhealthy));
    }

    #[test]
    fn selector_serde() {
        let s: SelectorId = serde_json::from_str("\"health_verdict\"").unwrap();
        assert_eq!(s, SelectorId::HealthVerdict);
        assert_eq!(s.to_string(), "health_verdict");
        assert_eq!("transfer_type".parse::<SelectorId>().unwrap(), SelectorId::TransferType);
        assert!("mood".parse::<SelectorId>().is_err());
    }
}
