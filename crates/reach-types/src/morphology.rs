//! Token decomposition results.

use serde::{Deserialize, Serialize};

/// Prefix / middle / suffix split of a single token.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Morphology {
    /// Base marker family the prefix belongs to.
    pub family: String,
    /// Prefix text exactly as matched (an extended variant when remapped).
    pub marker: String,
    /// Text strictly between prefix and suffix. May be empty.
    pub middle: String,
    /// Longest universal suffix matched at the token's end, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suffix: Option<String>,
}

impl Morphology {
    /// True when the marker was an extended variant remapped to its family.
    pub fn is_extended(&self) -> bool {
        self.marker != self.family
    }

    pub fn has_middle(&self) -> bool {
        !self.middle.is_empty()
    }
}

/// Outcome of decomposing one token.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Decomposition {
    /// Known structural floor token; carries no middle.
    Infrastructure,
    /// No marker family matched; dropped from aggregation.
    Invalid,
    /// Regular token.
    Parsed(Morphology),
}

impl Decomposition {
    pub fn morphology(&self) -> Option<&Morphology> {
        match self {
            Decomposition::Parsed(m) => Some(m),
            _ => None,
        }
    }

    pub fn is_invalid(&self) -> bool {
        matches!(self, Decomposition::Invalid)
    }

    pub fn is_infrastructure(&self) -> bool {
        matches!(self, Decomposition::Infrastructure)
    }
}
