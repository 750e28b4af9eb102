// crates/nodegen-model/src/halc.rs

//! Hardware abstraction layer configuration (HALC).

use crate::datapool::{Value, ValueType};
use serde::{Deserialize, Serialize};

/// Global safety mode of the HALC configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SafetyMode {
    /// Safe and non-safe variants each only see their own channels.
    TwoLevelsWithDropping,
    /// Both variants see every channel.
    TwoLevelsWithoutDropping,
    OneLevelAllSafe,
    OneLevelAllNonSafe,
}

/// Which of the two generated configurations is meant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HalcVariant {
    Safe,
    NonSafe,
}

impl HalcVariant {
    pub fn from_safety(is_safety: bool) -> Self {
        if is_safety {
            HalcVariant::Safe
        } else {
            HalcVariant::NonSafe
        }
    }

    pub fn is_safe(self) -> bool {
        self == HalcVariant::Safe
    }
}

/// A configurable parameter of a domain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HalcParameter {
    pub name: String,
    pub value_type: ValueType,
}

/// One hardware channel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HalcChannel {
    pub name: String,
    #[serde(default)]
    pub comment: String,
    #[serde(default)]
    pub safety_relevant: bool,
    pub use_case: u32,
    /// One value per domain parameter.
    #[serde(default)]
    pub values: Vec<Value>,
}

/// A group of channels of the same kind (e.g. digital inputs).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HalcDomain {
    pub name: String,
    #[serde(default)]
    pub parameters: Vec<HalcParameter>,
    /// Parameter values used when the domain has no channels.
    #[serde(default)]
    pub domain_values: Vec<Value>,
    #[serde(default)]
    pub channels: Vec<HalcChannel>,
}

/// The complete HALC configuration of a node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HalcConfig {
    pub safety_mode: SafetyMode,
    pub domains: Vec<HalcDomain>,
}

impl SafetyMode {
    /// Whether a channel appears in the configuration generated for `variant`.
    pub fn channel_visible(self, safety_relevant: bool, variant: HalcVariant) -> bool {
        match self {
            SafetyMode::TwoLevelsWithDropping => safety_relevant == variant.is_safe(),
            SafetyMode::TwoLevelsWithoutDropping
            | SafetyMode::OneLevelAllSafe
            | SafetyMode::OneLevelAllNonSafe => true,
        }
    }
}
