//! Per-entry output records.
//!
//! One [`EntryReport`] is written per registry entry. Downstream report
//! generators read these as JSON Lines.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::bundle::ConstraintBundle;
use crate::middle::MiddlePartition;

// ============================================================================
// TARGET CLASSIFICATION
// ============================================================================

/// Terminal label for one (entry, target) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReachStatus {
    /// Footprint reachable in every zone.
    Reachable,
    /// Footprint reachable in some zones but not all.
    Conditional,
    /// Footprint reachable in no zone.
    Unreachable,
}

impl ReachStatus {
    pub const ALL: [ReachStatus; 3] = [
        ReachStatus::Reachable,
        ReachStatus::Conditional,
        ReachStatus::Unreachable,
    ];
}

impl fmt::Display for ReachStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ReachStatus::Reachable => "REACHABLE",
            ReachStatus::Conditional => "CONDITIONAL",
            ReachStatus::Unreachable => "UNREACHABLE",
        };
        f.write_str(label)
    }
}

/// Label for a single downstream target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetVerdict {
    pub target: String,
    pub status: ReachStatus,
}

// ============================================================================
// DIAGNOSTICS
// ============================================================================

/// Per-zone intermediate sizes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneDiagnostics {
    pub zone: String,
    /// Size of the zone-legal vocabulary
    pub legal_vocabulary_size: usize,
    /// Number of reachable instruction classes
    pub reachable_classes: usize,
}

/// Intermediate pipeline state, emitted only when diagnostics are requested.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryDiagnostics {
    pub bundle: ConstraintBundle,
    pub partition: MiddlePartition,
    /// Tokens that matched no marker family
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub invalid_tokens: Vec<String>,
    pub infrastructure_tokens: usize,
    /// Compatible context-folio ids, in catalog order
    pub compatible_folios: Vec<String>,
    pub effective_vocabulary_size: usize,
    pub zones: Vec<ZoneDiagnostics>,
}

// ============================================================================
// ENTRY REPORT
// ============================================================================

/// Pipeline output for one registry entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryReport {
    pub entry_id: String,
    /// One verdict per target, in target catalog order
    pub verdicts: Vec<TargetVerdict>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diagnostics: Option<EntryDiagnostics>,
}

impl EntryReport {
    pub fn status_of(&self, target: &str) -> Option<ReachStatus> {
        self.verdicts
            .iter()
            .find(|v| v.target == target)
            .map(|v| v.status)
    }

    pub fn count(&self, status: ReachStatus) -> usize {
        self.verdicts.iter().filter(|v| v.status == status).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_serializes_screaming_case() {
        let json = serde_json::to_string(&ReachStatus::Conditional).unwrap();
        assert_eq!(json, r#""CONDITIONAL""#);
    }

    #[test]
    fn report_omits_absent_diagnostics() {
        let report = EntryReport {
            entry_id: "f1r.1".into(),
            verdicts: vec![TargetVerdict {
                target: "f103r".into(),
                status: ReachStatus::Reachable,
            }],
            diagnostics: None,
        };
        let json = serde_json::to_string(&report).unwrap();
        assert!(!json.contains("diagnostics"));
        assert_eq!(report.status_of("f103r"), Some(ReachStatus::Reachable));
        assert_eq!(report.count(ReachStatus::Unreachable), 0);
    }
}
