//! Shared fixtures for integration tests.
//!
//! Table sets are written as YAML into a temp directory and loaded through
//! `TableLoader`, so every scenario also exercises the loader.

#![allow(dead_code)]

use std::fmt::Write as _;
use std::fs;
use std::path::Path;
use std::sync::Arc;

use folio_reach::reach_core::{ConstraintPipeline, ReferenceTables, TableLoader};
use folio_reach::reach_types::RegistryEntry;
use tempfile::TempDir;

/// One YAML document per table file; `None` leaves an optional file out.
#[derive(Debug, Clone)]
pub struct TablesFixture {
    pub markers: String,
    pub folios: String,
    pub spreads: Option<String>,
    pub zones: String,
    pub classes: String,
    pub targets: String,
    pub settings: Option<String>,
}

impl TablesFixture {
    /// Middles {sho, e, i, od, air}: `sho` RESTRICTED (spread 2) and found
    /// only in `f-sho`, whose 20-middle vocabulary is 85% legal in zone S.
    ///
    /// Classes: 1 kernel; 2-4 atomic; 5 needs {ckh, cth} (both illegal in S);
    /// 6 needs {ckh, e}; 7 needs {te} (illegal in S); 8 needs {zz} (never in
    /// any vocabulary); 9-49 need {e}.
    pub fn regression() -> Self {
        let sho_vocabulary = [
            "sho", "e", "i", "od", "air", "k", "t", "o", "a", "d", "ch", "ee", "ke", "te", "ol",
            "al", "ar", "or", "ckh", "cth",
        ];
        let shared = ["e", "i", "od", "air", "k", "o"];

        let mut folios = String::new();
        writeln!(folios, "- id: f-sho\n  vocabulary: [{}]", sho_vocabulary.join(", ")).ok();
        for id in ["f-a", "f-b", "f-c", "f-d"] {
            writeln!(folios, "- id: {id}\n  vocabulary: [{}]", shared.join(", ")).ok();
        }

        Self {
            markers: "prefixes: [ch, sh, qo, ok, ot]\n\
                      extended_prefixes: { lch: ch }\n\
                      suffixes: [y, aiin, ol]\n\
                      infrastructure: [daiin, s]\n"
                .into(),
            folios,
            spreads: Some("sho: 2\ne: 5\ni: 5\nod: 5\nair: 5\nk: 5\no: 5\n".into()),
            zones: "zones:\n\
                    \x20 - label: C\n\
                    \x20 - label: P\n\
                    \x20 - { label: R1, canonical: R }\n\
                    \x20 - { label: R2, canonical: R }\n\
                    \x20 - { label: R3, canonical: R }\n\
                    \x20 - label: S\n\
                    legality:\n\
                    \x20 ckh: [C, P, R]\n\
                    \x20 cth: [C, P, R]\n\
                    \x20 te: [C, P, R]\n"
                .into(),
            classes: classes_yaml(|id| match id {
                1 => "kind: kernel".into(),
                2..=4 => "kind: atomic".into(),
                5 => "kind: decomposable, middles: [ckh, cth]".into(),
                6 => "kind: decomposable, middles: [ckh, e]".into(),
                7 => "kind: decomposable, middles: [te]".into(),
                8 => "kind: decomposable, middles: [zz]".into(),
                _ => "kind: decomposable, middles: [e]".into(),
            }),
            targets: "- { id: t-floor, footprint: [1, 2] }\n\
                      - { id: t-cth, footprint: [5] }\n\
                      - { id: t-mixed, footprint: [6, 9] }\n\
                      - { id: t-te, footprint: [1, 7] }\n\
                      - { id: t-zz, footprint: [8] }\n\
                      - { id: t-none, footprint: [] }\n"
                .into(),
            settings: None,
        }
    }

    pub fn write_to(&self, dir: &Path) {
        fs::write(dir.join("markers.yaml"), &self.markers).unwrap();
        fs::write(dir.join("folios.yaml"), &self.folios).unwrap();
        fs::write(dir.join("zones.yaml"), &self.zones).unwrap();
        fs::write(dir.join("classes.yaml"), &self.classes).unwrap();
        fs::write(dir.join("targets.yaml"), &self.targets).unwrap();
        if let Some(spreads) = &self.spreads {
            fs::write(dir.join("spreads.yaml"), spreads).unwrap();
        }
        if let Some(settings) = &self.settings {
            fs::write(dir.join("settings.yaml"), settings).unwrap();
        }
    }

    /// Write into a fresh temp directory; the directory lives as long as
    /// the returned guard.
    pub fn write(&self) -> TempDir {
        let dir = tempfile::tempdir().unwrap();
        self.write_to(dir.path());
        dir
    }

    pub fn load(&self) -> Arc<ReferenceTables> {
        let dir = self.write();
        Arc::new(TableLoader::new(dir.path()).load().unwrap())
    }

    pub fn pipeline(&self) -> ConstraintPipeline {
        ConstraintPipeline::new(self.load())
    }
}

/// `classes.yaml` covering every id, with `body(id)` as the mapping body.
pub fn classes_yaml(body: impl Fn(u32) -> String) -> String {
    (1..=49).fold(String::new(), |mut out, id| {
        writeln!(out, "- {{ id: {id}, {} }}", body(id)).ok();
        out
    })
}

/// Tokens yielding middles {sho, e, i, od, air}, plus one infrastructure
/// and one invalid token.
pub fn regression_entry(id: &str) -> RegistryEntry {
    RegistryEntry::new(
        id,
        ["chshoy", "qoey", "shiy", "okody", "qoairy", "daiin", "ytal"],
    )
}

pub fn entry(id: &str, tokens: &[&str]) -> RegistryEntry {
    RegistryEntry::new(id, tokens.iter().copied())
}

pub fn set(items: &[&str]) -> std::collections::BTreeSet<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Path of the demo table set shipped with the crate.
pub fn demo_tables_dir() -> std::path::PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tables")
}

pub fn demo_registry(name: &str) -> std::path::PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("demos").join(name)
}
