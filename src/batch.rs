//! Parallel batch runner
//!
//! Entries are independent of each other and share only the frozen tables,
//! so the runner fans them out over rayon's pool:
//!
//! 1. bundle + classify every entry in parallel
//! 2. collect the distinct RESTRICTED sets
//! 3. propagate each distinct set once, in parallel
//! 4. fan results back out to entries in input order
//!
//! Step 3 is skipped in favour of per-entry propagation when deduplication
//! is disabled; both paths produce identical outcomes.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;
use std::time::Instant;

use rayon::prelude::*;
use reach_core::{ConstraintPipeline, EntryOutcome, Propagation};
use reach_types::{EntryReport, RegistryEntry};
use tracing::info;

/// Batch configuration.
#[derive(Debug, Clone, Copy)]
pub struct BatchOptions {
    /// Share stages 5–7 between entries with equal RESTRICTED sets
    pub dedupe: bool,
    /// Attach intermediate state to every report
    pub diagnostics: bool,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            dedupe: true,
            diagnostics: false,
        }
    }
}

/// Everything one batch produced.
#[derive(Debug, Clone)]
pub struct BatchOutcome {
    /// Outcomes in input order
    pub outcomes: Vec<EntryOutcome>,
    /// Number of propagations actually computed
    pub distinct_keys: usize,
    pub duration_ms: u64,
}

impl BatchOutcome {
    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }
}

/// Runs a [`ConstraintPipeline`] over a whole registry.
#[derive(Debug, Clone)]
pub struct BatchRunner {
    pipeline: ConstraintPipeline,
    options: BatchOptions,
}

impl BatchRunner {
    pub fn new(pipeline: ConstraintPipeline, options: BatchOptions) -> Self {
        Self { pipeline, options }
    }

    pub fn pipeline(&self) -> &ConstraintPipeline {
        &self.pipeline
    }

    pub fn options(&self) -> BatchOptions {
        self.options
    }

    pub fn run(&self, entries: &[RegistryEntry]) -> BatchOutcome {
        let start = Instant::now();
        let (outcomes, distinct_keys) = if self.options.dedupe {
            self.run_deduplicated(entries)
        } else {
            let outcomes: Vec<EntryOutcome> = entries
                .par_iter()
                .map(|entry| self.pipeline.run_entry(entry))
                .collect();
            let computed = outcomes.len();
            (outcomes, computed)
        };
        let duration_ms = start.elapsed().as_millis() as u64;

        info!(
            entries = outcomes.len(),
            distinct_keys, duration_ms, "batch complete"
        );

        BatchOutcome {
            outcomes,
            distinct_keys,
            duration_ms,
        }
    }

    fn run_deduplicated(&self, entries: &[RegistryEntry]) -> (Vec<EntryOutcome>, usize) {
        let bundles: Vec<_> = entries
            .par_iter()
            .map(|entry| self.pipeline.bundle_entry(entry))
            .collect();

        // position of each bundle's RESTRICTED set among the distinct keys
        let mut positions: BTreeMap<&BTreeSet<String>, usize> = BTreeMap::new();
        let mut keys: Vec<&BTreeSet<String>> = Vec::new();
        let slots: Vec<usize> = bundles
            .iter()
            .map(|bundle| {
                *positions.entry(bundle.restricted()).or_insert_with(|| {
                    keys.push(bundle.restricted());
                    keys.len() - 1
                })
            })
            .collect();

        let propagations: Vec<Arc<Propagation>> = keys
            .par_iter()
            .map(|key| Arc::new(self.pipeline.propagate(key)))
            .collect();
        let distinct = propagations.len();

        let outcomes = entries
            .iter()
            .zip(bundles)
            .zip(slots)
            .map(|((entry, bundle), slot)| EntryOutcome {
                entry_id: entry.id.clone(),
                bundle,
                propagation: Arc::clone(&propagations[slot]),
            })
            .collect();

        (outcomes, distinct)
    }

    /// Output records for a finished batch, in input order.
    pub fn reports(&self, batch: &BatchOutcome) -> Vec<EntryReport> {
        batch
            .outcomes
            .par_iter()
            .map(|outcome| self.pipeline.report(outcome, self.options.diagnostics))
            .collect()
    }
}
