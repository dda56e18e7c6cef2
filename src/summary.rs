//! Batch-level statistics and expectation checks.

use std::collections::BTreeMap;

use reach_core::{EntryOutcome, ExpectedRange, ReferenceTables};
use reach_types::ReachStatus;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Label tallies for a set of (entry, target) pairs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelCounts {
    pub reachable: usize,
    pub conditional: usize,
    pub unreachable: usize,
}

impl LabelCounts {
    pub fn record(&mut self, status: ReachStatus) {
        match status {
            ReachStatus::Reachable => self.reachable += 1,
            ReachStatus::Conditional => self.conditional += 1,
            ReachStatus::Unreachable => self.unreachable += 1,
        }
    }

    pub fn get(&self, status: ReachStatus) -> usize {
        match status {
            ReachStatus::Reachable => self.reachable,
            ReachStatus::Conditional => self.conditional,
            ReachStatus::Unreachable => self.unreachable,
        }
    }

    pub fn total(&self) -> usize {
        self.reachable + self.conditional + self.unreachable
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetSummary {
    pub target: String,
    pub labels: LabelCounts,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SizeStats {
    pub min: usize,
    pub mean: f64,
    pub max: usize,
}

impl SizeStats {
    fn from_sizes(sizes: &[usize]) -> Self {
        Self {
            min: sizes.iter().copied().min().unwrap_or(0),
            mean: mean(sizes),
            max: sizes.iter().copied().max().unwrap_or(0),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZoneSummary {
    pub zone: String,
    pub mean_reachable_classes: f64,
}

/// Observed statistic compared against a configured band.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpectationCheck {
    pub name: String,
    pub expected: ExpectedRange,
    pub observed: f64,
    pub passed: bool,
}

impl ExpectationCheck {
    fn new(name: &str, expected: ExpectedRange, observed: f64) -> Self {
        Self {
            name: name.to_string(),
            expected,
            observed,
            passed: expected.contains(observed),
        }
    }
}

/// Aggregate view of one batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchSummary {
    pub entries: usize,
    pub labels: LabelCounts,
    /// In target catalog order
    pub targets: Vec<TargetSummary>,
    /// Compatible-folio count -> number of entries
    pub compatible_folio_histogram: BTreeMap<usize, usize>,
    pub compatible_folios_mean: f64,
    pub effective_vocabulary: SizeStats,
    /// Entries with no compatible folio
    pub closed_entries: usize,
    /// Entries with no RESTRICTED middle
    pub unrestricted_entries: usize,
    pub invalid_tokens: usize,
    /// In zone order; closed entries count as zero everywhere
    pub zones: Vec<ZoneSummary>,
    /// Entries whose zone-legal vocabularies widened somewhere
    pub monotonicity_violations: usize,
    pub expectations: Vec<ExpectationCheck>,
}

impl BatchSummary {
    pub fn compute(outcomes: &[EntryOutcome], tables: &ReferenceTables) -> Self {
        let mut labels = LabelCounts::default();
        let mut targets: Vec<TargetSummary> = tables
            .targets
            .iter()
            .map(|t| TargetSummary {
                target: t.id().to_string(),
                labels: LabelCounts::default(),
            })
            .collect();
        let mut histogram = BTreeMap::new();
        let mut compatible_counts = Vec::with_capacity(outcomes.len());
        let mut vocabulary_sizes = Vec::with_capacity(outcomes.len());
        let mut zone_totals = vec![0usize; tables.zones.len()];
        let mut closed_entries = 0;
        let mut unrestricted_entries = 0;
        let mut invalid_tokens = 0;
        let mut monotonicity_violations = 0;

        for outcome in outcomes {
            let propagation = &outcome.propagation;

            for (slot, verdict) in targets.iter_mut().zip(&propagation.verdicts) {
                slot.labels.record(verdict.status);
                labels.record(verdict.status);
            }

            let compatible = propagation.compatible_folios.len();
            *histogram.entry(compatible).or_insert(0) += 1;
            compatible_counts.push(compatible);
            vocabulary_sizes.push(propagation.effective_vocabulary.len());

            for (total, zone) in zone_totals
                .iter_mut()
                .zip(propagation.reachability.zones())
            {
                *total += zone.reachable.len();
            }

            closed_entries += usize::from(propagation.reachability.is_closed());
            unrestricted_entries += usize::from(outcome.bundle.restricted().is_empty());
            invalid_tokens += outcome.bundle.aggregate.invalid_tokens.len();
            monotonicity_violations += usize::from(!propagation.violations.is_empty());
        }

        let entries = outcomes.len();
        let zones = tables
            .zones
            .labels()
            .zip(zone_totals)
            .map(|(zone, total)| ZoneSummary {
                zone: zone.to_string(),
                mean_reachable_classes: ratio(total, entries),
            })
            .collect();

        let compatible_folios_mean = mean(&compatible_counts);
        let effective_vocabulary = SizeStats::from_sizes(&vocabulary_sizes);

        let expected = &tables.settings.expectations;
        let expectations = [
            (
                "compatible_folios_mean",
                expected.compatible_folios_mean,
                compatible_folios_mean,
            ),
            (
                "effective_vocabulary_mean",
                expected.effective_vocabulary_mean,
                effective_vocabulary.mean,
            ),
        ]
        .into_iter()
        .filter_map(|(name, range, observed)| {
            range.map(|r| ExpectationCheck::new(name, r, observed))
        })
        .collect::<Vec<_>>();

        for check in expectations.iter().filter(|c| !c.passed) {
            warn!(
                expectation = %check.name,
                observed = check.observed,
                low = check.expected.0,
                high = check.expected.1,
                "batch expectation not met"
            );
        }

        Self {
            entries,
            labels,
            targets,
            compatible_folio_histogram: histogram,
            compatible_folios_mean,
            effective_vocabulary,
            closed_entries,
            unrestricted_entries,
            invalid_tokens,
            zones,
            monotonicity_violations,
            expectations,
        }
    }

    pub fn expectations_passed(&self) -> bool {
        self.expectations.iter().all(|c| c.passed)
    }
}

fn mean(values: &[usize]) -> f64 {
    ratio(values.iter().sum(), values.len())
}

fn ratio(total: usize, count: usize) -> f64 {
    if count == 0 {
        0.0
    } else {
        total as f64 / count as f64
    }
}
