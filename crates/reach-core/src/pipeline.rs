//! Per-entry constraint propagation
//!
//! Composes the stages in order over one registry entry:
//!
//! ```text
//! tokens ─► BundleStage (bundle + partition)
//!                 │ restricted middles
//!                 ▼
//!           Propagation (compatible folios ─► effective vocabulary
//!                        ─► zone vocabularies ─► reachable classes ─► verdicts)
//! ```
//!
//! Everything after the partition depends only on the RESTRICTED set, so a
//! [`Propagation`] can be computed once per distinct restricted set and
//! shared between entries.

use std::collections::BTreeSet;
use std::sync::Arc;

use reach_types::{
    EntryDiagnostics, EntryReport, MiddlePartition, RegistryEntry, TargetVerdict, ZoneDiagnostics,
};
use tracing::debug;

use crate::stages::{
    aggregate_as_union, aggregate_tokens, classify_middles, classify_target, compatible_folios,
    legal_vocabularies, monotonicity_violations, reachable_classes, BundleAggregate,
    MonotonicityViolation, Reachability, ZoneReach,
};
use crate::tables::ReferenceTables;

/// Output of stages 2–4 for one entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BundleStage {
    pub aggregate: BundleAggregate,
    pub partition: MiddlePartition,
}

impl BundleStage {
    pub fn restricted(&self) -> &BTreeSet<String> {
        &self.partition.restricted
    }
}

/// Output of stages 5–7 for one restricted set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Propagation {
    /// Compatible folio ids, in catalog order
    pub compatible_folios: Vec<String>,
    pub effective_vocabulary: BTreeSet<String>,
    pub reachability: Reachability,
    /// Places where zone-legal vocabularies widened along the ordering
    pub violations: Vec<MonotonicityViolation>,
    /// One verdict per target, in catalog order
    pub verdicts: Vec<TargetVerdict>,
}

/// Complete result for one entry.
#[derive(Debug, Clone)]
pub struct EntryOutcome {
    pub entry_id: String,
    pub bundle: BundleStage,
    pub propagation: Arc<Propagation>,
}

/// Stateless pipeline over a frozen table set. Cheap to clone and share
/// between worker threads.
#[derive(Debug, Clone)]
pub struct ConstraintPipeline {
    tables: Arc<ReferenceTables>,
}

impl ConstraintPipeline {
    pub fn new(tables: Arc<ReferenceTables>) -> Self {
        Self { tables }
    }

    pub fn tables(&self) -> &ReferenceTables {
        &self.tables
    }

    /// Decompose, aggregate and classify one entry's tokens.
    pub fn bundle_entry(&self, entry: &RegistryEntry) -> BundleStage {
        let aggregate = aggregate_tokens(entry.tokens(), &self.tables.markers);
        let partition = classify_middles(
            &aggregate.bundle.middles,
            &self.tables.spreads,
            self.tables.settings.restricted_max_spread(),
        );
        BundleStage {
            aggregate,
            partition,
        }
    }

    /// Run the compatibility, vocabulary, zone and reachability stages.
    pub fn propagate(&self, restricted: &BTreeSet<String>) -> Propagation {
        let tables = &*self.tables;
        let compatible = compatible_folios(restricted, &tables.folios);
        let compatible_ids: Vec<String> = compatible.iter().map(|f| f.id().to_string()).collect();

        if compatible.is_empty() {
            debug!(
                restricted = ?restricted,
                "no compatible context-folio; every target unreachable"
            );
            return self.finish(
                compatible_ids,
                BTreeSet::new(),
                Reachability::Closed,
                Vec::new(),
            );
        }

        let effective = aggregate_as_union(compatible.iter().map(|f| f.vocabulary()));
        let zones = legal_vocabularies(&effective, &tables.zones, &tables.legality);
        let violations = monotonicity_violations(&zones);
        if !violations.is_empty() {
            debug!(count = violations.len(), "zone-legal vocabulary widened");
        }

        let reach = zones
            .into_iter()
            .map(|z| ZoneReach {
                reachable: reachable_classes(&z.legal, &tables.classes),
                zone: z.zone,
                legal_vocabulary: z.legal,
            })
            .collect();

        self.finish(
            compatible_ids,
            effective,
            Reachability::Open(reach),
            violations,
        )
    }

    fn finish(
        &self,
        compatible_folios: Vec<String>,
        effective_vocabulary: BTreeSet<String>,
        reachability: Reachability,
        violations: Vec<MonotonicityViolation>,
    ) -> Propagation {
        let verdicts = self
            .tables
            .targets
            .iter()
            .map(|t| TargetVerdict {
                target: t.id().to_string(),
                status: classify_target(t.footprint(), &reachability),
            })
            .collect();

        Propagation {
            compatible_folios,
            effective_vocabulary,
            reachability,
            violations,
            verdicts,
        }
    }

    /// Full pipeline for a single entry.
    pub fn run_entry(&self, entry: &RegistryEntry) -> EntryOutcome {
        let bundle = self.bundle_entry(entry);
        let propagation = Arc::new(self.propagate(bundle.restricted()));
        debug!(
            entry = %entry.id,
            middles = bundle.aggregate.bundle.middles.len(),
            restricted = bundle.partition.restricted.len(),
            compatible = propagation.compatible_folios.len(),
            "entry propagated"
        );
        EntryOutcome {
            entry_id: entry.id.clone(),
            bundle,
            propagation,
        }
    }

    /// Output record for an outcome, optionally with intermediate state.
    pub fn report(&self, outcome: &EntryOutcome, diagnostics: bool) -> EntryReport {
        let propagation = &outcome.propagation;
        let diagnostics = diagnostics.then(|| EntryDiagnostics {
            bundle: outcome.bundle.aggregate.bundle.clone(),
            partition: outcome.bundle.partition.clone(),
            invalid_tokens: outcome.bundle.aggregate.invalid_tokens.clone(),
            infrastructure_tokens: outcome.bundle.aggregate.infrastructure_tokens,
            compatible_folios: propagation.compatible_folios.clone(),
            effective_vocabulary_size: propagation.effective_vocabulary.len(),
            zones: self.zone_diagnostics(&propagation.reachability),
        });

        EntryReport {
            entry_id: outcome.entry_id.clone(),
            verdicts: propagation.verdicts.clone(),
            diagnostics,
        }
    }

    fn zone_diagnostics(&self, reachability: &Reachability) -> Vec<ZoneDiagnostics> {
        match reachability {
            Reachability::Closed => self
                .tables
                .zones
                .labels()
                .map(|zone| ZoneDiagnostics {
                    zone: zone.to_string(),
                    legal_vocabulary_size: 0,
                    reachable_classes: 0,
                })
                .collect(),
            Reachability::Open(zones) => zones
                .iter()
                .map(|z| ZoneDiagnostics {
                    zone: z.zone.clone(),
                    legal_vocabulary_size: z.legal_vocabulary.len(),
                    reachable_classes: z.reachable.len(),
                })
                .collect(),
        }
    }
}
