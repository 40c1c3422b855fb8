//! Model type classification
//!
//! Requests are routed by coarse capability class rather than by concrete
//! model name. Each provider lists its own model names per class.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Capability class a request is classified into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelType {
    /// Largest models (opus class)
    Big,
    /// Mid-sized models (sonnet class)
    Middle,
    /// Smallest, cheapest models (haiku class)
    Small,
}

impl ModelType {
    /// All model types, in declaration order
    pub const ALL: [ModelType; 3] = [ModelType::Big, ModelType::Middle, ModelType::Small];

    /// Classify a requested model name by substring match
    ///
    /// `haiku` maps to Small, `sonnet` to Middle; `opus` and anything
    /// unrecognised map to Big.
    pub fn classify(model_name: &str) -> Self {
        let lower = model_name.to_lowercase();
        if lower.contains("haiku") {
            ModelType::Small
        } else if lower.contains("sonnet") {
            ModelType::Middle
        } else {
            ModelType::Big
        }
    }

    /// Lowercase tag used in configuration files
    pub fn as_str(&self) -> &'static str {
        match self {
            ModelType::Big => "big",
            ModelType::Middle => "middle",
            ModelType::Small => "small",
        }
    }

    /// Slot index for per-type arrays
    pub(crate) fn index(self) -> usize {
        match self {
            ModelType::Big => 0,
            ModelType::Middle => 1,
            ModelType::Small => 2,
        }
    }
}

impl fmt::Display for ModelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ModelType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "big" => Ok(ModelType::Big),
            "middle" => Ok(ModelType::Middle),
            "small" => Ok(ModelType::Small),
            other => Err(format!("Unknown model type: {}", other)),
        }
    }
}
