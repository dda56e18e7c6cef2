//! End-to-end pipeline scenarios over YAML-loaded tables.

mod helpers;

use folio_reach::reach_core::stages::aggregate_as_union;
use folio_reach::reach_types::{ClassId, ClassSet, MiddleClass, ReachStatus};
use helpers::{entry, regression_entry, set, TablesFixture};
use pretty_assertions::assert_eq;

fn ids(raw: &[u32]) -> ClassSet {
    raw.iter().map(|r| ClassId::new(*r).unwrap()).collect()
}

#[test]
fn regression_single_restricted_middle() {
    let pipeline = TablesFixture::regression().pipeline();
    let outcome = pipeline.run_entry(&regression_entry("f1r.1"));
    let tables = pipeline.tables();

    assert_eq!(
        outcome.bundle.aggregate.bundle.middles,
        set(&["sho", "e", "i", "od", "air"])
    );
    assert_eq!(outcome.bundle.aggregate.invalid_tokens, vec!["ytal".to_string()]);
    assert_eq!(outcome.bundle.aggregate.infrastructure_tokens, 1);

    let partition = &outcome.bundle.partition;
    assert_eq!(partition.restricted, set(&["sho"]));
    assert_eq!(partition.class_of("air"), Some(MiddleClass::Universal));

    let propagation = &outcome.propagation;
    assert_eq!(propagation.compatible_folios, vec!["f-sho".to_string()]);

    // the whole folio vocabulary, not just the bundle's middles
    let folio = tables.folios.get("f-sho").unwrap();
    assert_eq!(&propagation.effective_vocabulary, folio.vocabulary());
    assert_eq!(propagation.effective_vocabulary.len(), 20);

    let zones = propagation.reachability.zones();
    assert_eq!(zones.len(), 6);
    let s = &zones[5];
    assert_eq!(s.zone, "S");
    assert_eq!(s.legal_vocabulary.len(), 17);

    // only classes whose entire requirement is illegal are pruned
    assert_eq!(s.reachable, ClassSet::full().difference(&ids(&[5, 7, 8])));
    assert!(s.reachable.contains(ClassId::new(6).unwrap()));
    for zone in &zones[..5] {
        assert_eq!(zone.reachable, ClassSet::full().difference(&ids(&[8])));
    }
    assert!(propagation.violations.is_empty());

    let report = pipeline.report(&outcome, false);
    assert_eq!(report.status_of("t-floor"), Some(ReachStatus::Reachable));
    assert_eq!(report.status_of("t-cth"), Some(ReachStatus::Conditional));
    assert_eq!(report.status_of("t-mixed"), Some(ReachStatus::Reachable));
    assert_eq!(report.status_of("t-te"), Some(ReachStatus::Conditional));
    assert_eq!(report.status_of("t-zz"), Some(ReachStatus::Unreachable));
    assert_eq!(report.status_of("t-none"), Some(ReachStatus::Reachable));
}

#[test]
fn zero_restricted_middles_admit_every_folio() {
    let pipeline = TablesFixture::regression().pipeline();
    let outcome = pipeline.run_entry(&entry("x.1", &["qoey", "shiy", "daiin"]));
    let tables = pipeline.tables();

    assert!(outcome.bundle.partition.restricted.is_empty());
    assert_eq!(outcome.propagation.compatible_folios.len(), tables.folios.len());

    let everything = aggregate_as_union(tables.folios.iter().map(|f| f.vocabulary()));
    assert_eq!(outcome.propagation.effective_vocabulary, everything);
}

#[test]
fn restricted_middle_in_no_folio_is_unreachable_everywhere() {
    let mut fixture = TablesFixture::regression();
    // "qq" is RESTRICTED by explicit spread but no folio lists it
    fixture.spreads = Some("sho: 2\nqq: 1\ne: 5\n".into());
    let pipeline = fixture.pipeline();
    let outcome = pipeline.run_entry(&entry("x.2", &["chqqy", "qoey"]));

    assert_eq!(outcome.bundle.partition.restricted, set(&["qq"]));
    assert!(outcome.propagation.compatible_folios.is_empty());
    assert!(outcome.propagation.reachability.is_closed());

    let report = pipeline.report(&outcome, true);
    assert_eq!(report.count(ReachStatus::Unreachable), report.verdicts.len());
    // including the empty footprint
    assert_eq!(report.status_of("t-none"), Some(ReachStatus::Unreachable));

    let diagnostics = report.diagnostics.unwrap();
    assert_eq!(diagnostics.effective_vocabulary_size, 0);
    assert_eq!(diagnostics.zones.len(), 6);
}

#[test]
fn unknown_middles_do_not_restrict() {
    let pipeline = TablesFixture::regression().pipeline();
    let outcome = pipeline.run_entry(&entry("x.3", &["chxyzy", "qoey"]));

    assert_eq!(outcome.bundle.partition.unknown, set(&["xyz"]));
    assert!(outcome.bundle.partition.restricted.is_empty());
    assert_eq!(outcome.propagation.compatible_folios.len(), 5);
}

#[test]
fn empty_entry_is_unrestricted() {
    let pipeline = TablesFixture::regression().pipeline();
    let outcome = pipeline.run_entry(&entry("x.4", &[]));

    assert!(outcome.bundle.aggregate.bundle.is_empty());
    assert_eq!(outcome.propagation.compatible_folios.len(), 5);
}

#[test]
fn token_order_and_duplicates_do_not_matter() {
    let pipeline = TablesFixture::regression().pipeline();
    let a = pipeline.run_entry(&entry("a", &["chshoy", "qoey", "okody"]));
    let b = pipeline.run_entry(&entry("b", &["okody", "qoey", "chshoy", "qoey"]));

    assert_eq!(a.bundle.aggregate.bundle, b.bundle.aggregate.bundle);
    assert_eq!(a.propagation, b.propagation);
}

#[test]
fn derived_spreads_follow_folio_counts() {
    let mut fixture = TablesFixture::regression();
    fixture.spreads = None;
    let pipeline = fixture.pipeline();

    // "sho" appears in one folio, "e" in all five
    assert_eq!(pipeline.tables().spreads.spread("sho"), 1);
    assert_eq!(pipeline.tables().spreads.spread("e"), 5);

    let outcome = pipeline.run_entry(&regression_entry("r"));
    assert_eq!(outcome.bundle.partition.restricted, set(&["sho"]));
}

#[test]
fn classification_is_exhaustive_and_consistent() {
    let pipeline = TablesFixture::regression().pipeline();
    let entries = [
        regression_entry("a"),
        entry("b", &["qoey"]),
        entry("c", &["chqqy"]),
        entry("d", &["chshoy", "chcthy"]),
    ];

    for e in &entries {
        let outcome = pipeline.run_entry(e);
        let zones = outcome.propagation.reachability.zones();
        let report = pipeline.report(&outcome, false);
        assert_eq!(report.verdicts.len(), pipeline.tables().targets.len());

        for (target, verdict) in pipeline.tables().targets.iter().zip(&report.verdicts) {
            let fits = zones
                .iter()
                .filter(|z| target.footprint().is_subset(&z.reachable))
                .count();
            match verdict.status {
                ReachStatus::Reachable => assert_eq!(fits, zones.len()),
                ReachStatus::Unreachable => assert_eq!(fits, 0),
                ReachStatus::Conditional => assert!(fits > 0 && fits < zones.len()),
            }
        }
    }
}
